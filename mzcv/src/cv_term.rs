use crate::{CURIEParsingError, Curie, OboStanza};

/// A single term from a controlled vocabulary, with the information needed to resolve a
/// modification by identifier or name.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CVTerm {
    /// The stable identifier
    pub curie: Curie,
    /// The preferred name
    pub name: Box<str>,
    /// The definition text, if given
    pub definition: Option<Box<str>>,
    /// All synonyms, regardless of scope
    pub synonyms: Vec<Box<str>>,
    /// The monoisotopic mass delta, if the term defines one
    pub monoisotopic_mass: Option<f64>,
    /// The direct `is_a` parents
    pub parents: Vec<Curie>,
    /// If the term is marked obsolete
    pub obsolete: bool,
}

impl CVTerm {
    /// Create a term from a parsed Obo stanza. Returns `None` if the stanza has no name.
    /// # Errors
    /// If the stanza id is not a valid CURIE.
    pub fn from_stanza(stanza: &OboStanza) -> Result<Option<Self>, CURIEParsingError> {
        let curie: Curie = stanza.id.parse()?;
        let Some(name) = stanza.name.clone() else {
            return Ok(None);
        };
        Ok(Some(Self {
            curie,
            name,
            definition: stanza.definition.as_ref().map(|(text, _)| text.clone()),
            synonyms: stanza
                .synonyms
                .iter()
                .map(|s| s.synonym.clone())
                .collect(),
            monoisotopic_mass: stanza.xrefs.iter().find_map(|x| mass_from_xref(x)),
            parents: stanza
                .is_a
                .iter()
                .filter_map(|parent| parent.parse().ok())
                .collect(),
            obsolete: stanza.obsolete,
        }))
    }
}

/// Unimod writes `delta_mono_mass "79.966331"`, PSI-MOD writes `DiffMono: "79.966331"`
fn mass_from_xref(xref: &str) -> Option<f64> {
    let (key, value) = xref.split_once(char::is_whitespace)?;
    match key.trim_end_matches(':') {
        "delta_mono_mass" | "DiffMono" => value.trim().trim_matches('"').trim().parse().ok(),
        _ => None,
    }
}

//! The [`CVIndex`] itself with the core functionality.

use std::{
    collections::{HashMap, hash_map::Entry},
    path::Path,
    sync::Arc,
};

use context_error::BoxedError;

use crate::{CVError, CVTerm, Curie, OboOntology, OboStanzaType, text::levenshtein_distance};

/// Version information for a CV
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CVVersion {
    /// The last updated date as reported by the CV (year, month, day, hour, minute)
    pub last_updated: Option<(u16, u8, u8, u8, u8)>,
    /// The version of the CV
    pub version: Option<String>,
}

/// Read only access to a controlled vocabulary. This is all a modification resolver needs to
/// know about a term store, so any store can be plugged in.
pub trait CVLookup {
    /// Get a term by its identifier
    fn term(&self, curie: &Curie) -> Option<Arc<CVTerm>>;
    /// Get all identifiers with this name or synonym, matched case insensitively, in insertion order
    fn curies_for_name(&self, name: &str) -> &[Curie];
    /// The number of terms
    fn len(&self) -> usize;
    /// See if this CV does not contain any terms
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Names close to the given text, to help a user figure out what was meant
    fn suggest(&self, _text: &str, _limit: usize) -> Vec<Box<str>> {
        Vec::new()
    }
}

/// An in memory index into a CV.
///
/// Data can be accessed using the following main ways:
/// * Unique indexing (constant time) [`Self::get_by_curie`] and [`CVLookup::curies_for_name`].
/// * Searching for matches in names and synonyms using [`Self::search`].
/// * Walking the `is_a` hierarchy with [`Self::children`].
/// * Iterate through all terms using [`Self::data`].
#[derive(Debug, Default)]
pub struct CVIndex {
    /// All terms in insertion order
    data: Vec<Arc<CVTerm>>,
    /// CURIE index
    index: HashMap<Curie, Arc<CVTerm>>,
    /// Uppercased name and synonym index, one name can link to multiple terms
    names: HashMap<Box<str>, Vec<Curie>>,
    /// Direct children for every parent
    children: HashMap<Curie, Vec<Curie>>,
    /// The version
    version: CVVersion,
}

impl CVIndex {
    /// Create an empty CV
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an index from terms. Obsolete terms are skipped, if a CURIE is defined twice the
    /// first definition is kept.
    pub fn from_terms(terms: impl IntoIterator<Item = CVTerm>, version: CVVersion) -> Self {
        let mut cv = Self {
            version,
            ..Self::default()
        };
        for term in terms {
            cv.add(term);
        }
        cv
    }

    /// Build an index from all `[Term]` stanzas of a parsed Obo file.
    pub fn from_obo(obo: &OboOntology) -> Self {
        let terms = obo
            .objects
            .iter()
            .filter(|stanza| stanza.stanza_type == OboStanzaType::Term)
            .filter_map(|stanza| match CVTerm::from_stanza(stanza) {
                Ok(Some(term)) => Some(term),
                Ok(None) => {
                    log::warn!("Skipping term '{}' as it has no name", stanza.id);
                    None
                }
                Err(err) => {
                    log::warn!("Skipping term with invalid id '{}': {err}", stanza.id);
                    None
                }
            });
        let cv = Self::from_terms(terms, obo.version());
        log::debug!(
            "Indexed {} terms (version {:?})",
            cv.len(),
            cv.version.version
        );
        cv
    }

    /// Read an Obo file and index it.
    /// # Errors
    /// If the file could not be read or is not a valid Obo file.
    pub fn from_obo_file(path: impl AsRef<Path>) -> Result<Self, BoxedError<'static, CVError>> {
        OboOntology::from_file(path).map(|obo| Self::from_obo(&obo))
    }

    /// Get the number of terms in this CV
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// See if this CV does not contain any terms
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a term by its CURIE
    pub fn get_by_curie(&self, curie: &Curie) -> Option<Arc<CVTerm>> {
        self.index.get(curie).cloned()
    }

    /// Get the first term with this name or synonym, names are matched in a case insensitive manner.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<CVTerm>> {
        self.names
            .get(name.trim().to_uppercase().as_str())
            .and_then(|curies| curies.first())
            .and_then(|curie| self.get_by_curie(curie))
    }

    /// Search through the names and synonyms to find terms matching the text. Terms with a name
    /// or synonym starting with the text come first, followed by those that contain the text. Within
    /// both groups shorter names are placed first. Every term is reported at most once.
    pub fn search(&self, text: &str, limit: usize) -> Vec<Arc<CVTerm>> {
        let query = text.trim().to_uppercase();
        if query.is_empty() {
            return Vec::new();
        }
        let mut hits: Vec<(u8, usize, usize)> = self
            .data
            .iter()
            .enumerate()
            .filter_map(|(position, term)| {
                std::iter::once(&term.name)
                    .chain(&term.synonyms)
                    .filter_map(|name| {
                        let upper = name.to_uppercase();
                        if upper.starts_with(&query) {
                            Some((0, upper.len()))
                        } else if upper.contains(&query) {
                            Some((1, upper.len()))
                        } else {
                            None
                        }
                    })
                    .min()
                    .map(|(group, length)| (group, length, position))
            })
            .collect();
        hits.sort_unstable();
        hits.into_iter()
            .take(limit)
            .map(|(_, _, position)| self.data[position].clone())
            .collect()
    }

    /// All terms that are (transitively) `is_a` children of the given term, in breadth first order.
    pub fn children(&self, curie: &Curie) -> Vec<Arc<CVTerm>> {
        let mut seen = std::collections::HashSet::new();
        let mut queue = std::collections::VecDeque::from([curie.clone()]);
        let mut result = Vec::new();
        while let Some(parent) = queue.pop_front() {
            for child in self.children.get(&parent).into_iter().flatten() {
                if seen.insert(child.clone()) {
                    if let Some(term) = self.get_by_curie(child) {
                        result.push(term);
                    }
                    queue.push_back(child.clone());
                }
            }
        }
        result
    }

    /// Get the underlying terms in insertion order.
    pub fn data(&self) -> impl Iterator<Item = &Arc<CVTerm>> + '_ {
        self.data.iter()
    }

    /// Get the version
    pub const fn version(&self) -> &CVVersion {
        &self.version
    }

    /// Add a single term to the index, returns false if it was not added because it is obsolete
    /// or its CURIE is already present.
    pub fn add(&mut self, term: CVTerm) -> bool {
        if term.obsolete {
            log::trace!("Skipping obsolete term {}", term.curie);
            return false;
        }
        let term = Arc::new(term);
        match self.index.entry(term.curie.clone()) {
            Entry::Occupied(_) => {
                log::warn!(
                    "Duplicate definition for {}, keeping the first one",
                    term.curie
                );
                return false;
            }
            Entry::Vacant(entry) => {
                entry.insert(term.clone());
            }
        }
        for name in std::iter::once(&term.name).chain(&term.synonyms) {
            let key = name.trim().to_uppercase().into_boxed_str();
            let curies = self.names.entry(key).or_default();
            if !curies.contains(&term.curie) {
                curies.push(term.curie.clone());
            }
        }
        for parent in &term.parents {
            self.children
                .entry(parent.clone())
                .or_default()
                .push(term.curie.clone());
        }
        self.data.push(term);
        true
    }
}

impl CVLookup for CVIndex {
    fn term(&self, curie: &Curie) -> Option<Arc<CVTerm>> {
        self.get_by_curie(curie)
    }

    fn curies_for_name(&self, name: &str) -> &[Curie] {
        self.names
            .get(name.trim().to_uppercase().as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    /// Prefix and substring matches first, if those are not enough the names within a small edit
    /// distance are added.
    fn suggest(&self, text: &str, limit: usize) -> Vec<Box<str>> {
        let mut result: Vec<Box<str>> = self
            .search(text, limit)
            .into_iter()
            .map(|term| term.name.clone())
            .collect();
        if result.len() < limit {
            let query = text.trim().to_uppercase();
            let max_distance = (query.chars().count() / 3).max(2);
            let mut close: Vec<(usize, &Box<str>)> = self
                .data
                .iter()
                .map(|term| {
                    let distance = levenshtein_distance(&query, &term.name.to_uppercase());
                    (distance, &term.name)
                })
                .filter(|(distance, name)| *distance <= max_distance && !result.contains(*name))
                .collect();
            close.sort();
            result.extend(
                close
                    .into_iter()
                    .take(limit - result.len())
                    .map(|(_, name)| name.clone()),
            );
        }
        result
    }
}

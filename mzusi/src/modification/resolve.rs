use std::sync::LazyLock;

use itertools::Itertools;
use mzcv::Curie;
use regex::Regex;

use crate::{
    diagnostics::{DiagnosticCode, DiagnosticResponse},
    modification::{
        Lookup, ModificationDescriptor, OntologyMatch, Resolution, UnsupportedCategory,
    },
    ontology::{Ontologies, Ontology},
};

static DELTA_MASS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-][\d.]+$").unwrap());
static UNIMOD_IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^UNIMOD:(\d+)$").unwrap());
static PSIMOD_IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^MOD:(\d+)$").unwrap());

/// The number of names suggested when a name cannot be found
const SUGGESTIONS: usize = 3;

impl ModificationDescriptor {
    /// Resolve the text of a single modification bracket (without the enclosing brackets).
    ///
    /// Multiple modifications on the same position (`Phospho][Oxidation`) result in a
    /// [`Resolution::Compound`]. Within one modification multiple pieces can be given separated
    /// by `|`, for example a mass and a free text note (`+11.9784|info:suspected frobinylation`).
    /// All problems are stored on the descriptor and added to the response.
    pub fn resolve(text: &str, ontologies: &Ontologies, response: &mut DiagnosticResponse) -> Self {
        if !text.contains("][") {
            return Self::resolve_single(text, ontologies, response);
        }
        let parts = text
            .split("][")
            .map(|part| Self::resolve_single(part, ontologies, response))
            .collect_vec();
        Self {
            modification_string: text.to_string(),
            custom_info: parts.iter().flat_map(|p| p.custom_info.clone()).collect(),
            warnings: parts.iter().flat_map(|p| p.warnings.clone()).collect(),
            errors: parts.iter().flat_map(|p| p.errors.clone()).collect(),
            resolution: Resolution::Compound(parts),
        }
    }

    fn resolve_single(
        text: &str,
        ontologies: &Ontologies,
        response: &mut DiagnosticResponse,
    ) -> Self {
        let mut descriptor = Self {
            modification_string: text.to_string(),
            resolution: Resolution::Unresolved,
            custom_info: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        };
        let mut resolved: Option<Resolution> = None;

        for piece in text.split('|').map(str::trim) {
            let resolution = descriptor.resolve_piece(piece, ontologies, response);
            // A later mass overrides an earlier one, but notes never override a mass
            resolved = match resolved {
                Some(current)
                    if matches!(resolution, Resolution::CustomInfo)
                        || (current.is_mass_bearing() && !resolution.is_mass_bearing()) =>
                {
                    Some(current)
                }
                _ => Some(resolution),
            };
        }

        if let Some(resolution) = resolved {
            descriptor.resolution = resolution;
        }
        descriptor
    }

    fn resolve_piece(
        &mut self,
        piece: &str,
        ontologies: &Ontologies,
        response: &mut DiagnosticResponse,
    ) -> Resolution {
        for category in UnsupportedCategory::ALL {
            if strip_prefix_ignore_case(piece, category.prefix()).is_some() {
                self.warning(
                    response,
                    DiagnosticCode::UnsupportedModification,
                    format!(
                        "The '{}' prefix is recognized and legal but is not yet supported by this system",
                        category.prefix()
                    ),
                );
                return Resolution::Unsupported(category);
            }
        }

        if let Some(info) = strip_prefix_ignore_case(piece, "info:") {
            self.custom_info.push(info.to_string());
            return Resolution::CustomInfo;
        }

        if DELTA_MASS_REGEX.is_match(piece) {
            return if let Ok(mass) = piece.parse::<f64>() {
                Resolution::DeltaMass(mass)
            } else {
                self.error(
                    response,
                    DiagnosticCode::UnresolvedModification,
                    format!("The mass shift '{piece}' is not a valid number"),
                );
                Resolution::Unresolved
            };
        }

        for (ontology, identifier) in [
            (Ontology::Unimod, &*UNIMOD_IDENTIFIER_REGEX),
            (Ontology::Psimod, &*PSIMOD_IDENTIFIER_REGEX),
        ] {
            if let Some(accession) = identifier.captures(piece).and_then(|c| c.get(1)) {
                let curie = Curie::new(ontology.name(), accession.as_str());
                return if let Some(term) = ontologies.get(ontology).term(&curie) {
                    Resolution::Ontology(OntologyMatch {
                        ontology,
                        lookup: Lookup::Identifier,
                        curie: term.curie.clone(),
                        name: term.name.clone(),
                        delta_mass: term.monoisotopic_mass,
                    })
                } else {
                    self.error(
                        response,
                        DiagnosticCode::UnknownOntologyIdentifier,
                        format!("The curie '{piece}' cannot be found in {ontology}"),
                    );
                    Resolution::Unresolved
                };
            }

            if let Some(name) = piece.strip_prefix(ontology.name_prefix()) {
                return if let Some(resolution) =
                    self.lookup_name(ontology, name, ontologies, response)
                {
                    resolution
                } else {
                    let message = format!(
                        "The name after the {} in '{piece}' cannot be found in {ontology}{}",
                        ontology.name_prefix(),
                        suggestions(&ontologies.get(ontology).suggest(name, SUGGESTIONS)),
                    );
                    self.error(response, DiagnosticCode::UnknownOntologyName, message);
                    Resolution::Unresolved
                };
            }

            if let Some(resolution) = self.lookup_name(ontology, piece, ontologies, response) {
                return resolution;
            }
        }

        let options = if piece.is_empty() {
            Vec::new()
        } else {
            ontologies
                .unimod()
                .suggest(piece, SUGGESTIONS)
                .into_iter()
                .chain(ontologies.psimod().suggest(piece, SUGGESTIONS))
                .unique()
                .take(SUGGESTIONS)
                .collect_vec()
        };
        self.error(
            response,
            DiagnosticCode::UnresolvedModification,
            format!(
                "The modification element '{piece}' cannot be understood by the parser{}",
                suggestions(&options)
            ),
        );
        Resolution::Unresolved
    }

    /// Find a term by name, if the name is ambiguous all terms are applied in order so the last one wins
    fn lookup_name(
        &mut self,
        ontology: Ontology,
        name: &str,
        ontologies: &Ontologies,
        response: &mut DiagnosticResponse,
    ) -> Option<Resolution> {
        let lookup = ontologies.get(ontology);
        let curies = lookup.curies_for_name(name);
        let term = curies.iter().filter_map(|curie| lookup.term(curie)).last()?;
        if curies.len() > 1 {
            self.warning(
                response,
                DiagnosticCode::AmbiguousOntologyName,
                format!(
                    "The name '{name}' matches multiple terms in {ontology} ({}), using {}",
                    curies.iter().join(", "),
                    term.curie
                ),
            );
        }
        Some(Resolution::Ontology(OntologyMatch {
            ontology,
            lookup: Lookup::Name,
            curie: term.curie.clone(),
            name: term.name.clone(),
            delta_mass: term.monoisotopic_mass,
        }))
    }

    fn error(
        &mut self,
        response: &mut DiagnosticResponse,
        code: DiagnosticCode,
        message: String,
    ) {
        response.add(code, message.clone());
        self.errors.push(message);
    }

    fn warning(
        &mut self,
        response: &mut DiagnosticResponse,
        code: DiagnosticCode,
        message: String,
    ) {
        response.add(code, message.clone());
        self.warnings.push(message);
    }
}

/// Strip the prefix if the text starts with it (case insensitive) and something follows
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.get(..prefix.len())
        .filter(|start| start.eq_ignore_ascii_case(prefix))
        .map(|_| &text[prefix.len()..])
        .filter(|rest| !rest.is_empty())
}

fn suggestions(options: &[Box<str>]) -> String {
    if options.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", options.join(", "))
    }
}

use std::sync::LazyLock;

use itertools::Itertools;
use log::{debug, trace};
use regex::Regex;

use crate::{
    chemistry,
    diagnostics::{DiagnosticCode, DiagnosticResponse},
    ontology::Ontologies,
    peptidoform::Peptidoform,
    usi::{IdentifierType, IndexType, UniversalSpectrumIdentifier, UsiSettings},
};

const PREFIX: &str = "mzspec:";

static PROVENANCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)/(\d+):(.+)$").unwrap());
static CHARGE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+)/(\d+)$").unwrap());

/// Parse USIs, resolving embedded peptidoforms with the given ontologies
#[derive(Clone, Debug)]
pub struct UsiParser<'a> {
    ontologies: &'a Ontologies,
    settings: UsiSettings,
}

impl<'a> UsiParser<'a> {
    /// Create a parser with the default collection templates
    pub fn new(ontologies: &'a Ontologies) -> Self {
        Self::with_settings(ontologies, UsiSettings::default())
    }

    /// Create a parser with custom settings
    pub const fn with_settings(ontologies: &'a Ontologies, settings: UsiSettings) -> Self {
        Self {
            ontologies,
            settings,
        }
    }

    /// The settings in use
    pub const fn settings(&self) -> &UsiSettings {
        &self.settings
    }

    /// The ontologies in use
    pub const fn ontologies(&self) -> &'a Ontologies {
        self.ontologies
    }

    /// Parse a USI. This never fails, all problems are reported in the returned response.
    /// ```rust
    /// use mzusi::{IdentifierType, Ontologies, UsiParser};
    /// let ontologies = Ontologies::empty();
    /// let (usi, response) = UsiParser::new(&ontologies)
    ///     .parse("mzspec:PXD000561:Adult_Frontalcortex_bRP_Elite_85_f09:scan:17555:VLHPLEGAVVIIFK/2");
    /// assert!(response.is_valid());
    /// assert_eq!(usi.identifier_type, Some(IdentifierType::Upsmi));
    /// assert_eq!(usi.charge, Some(2));
    /// assert!(usi.mz.is_some());
    /// ```
    pub fn parse(&self, text: &str) -> (UniversalSpectrumIdentifier, DiagnosticResponse) {
        let mut usi = UniversalSpectrumIdentifier::default();
        let response = self.parse_into(&mut usi, text);
        (usi, response)
    }

    /// Parse a USI into an existing value, every field is reset first so nothing of an
    /// earlier parse remains.
    pub fn parse_into(
        &self,
        usi: &mut UniversalSpectrumIdentifier,
        text: &str,
    ) -> DiagnosticResponse {
        *usi = UniversalSpectrumIdentifier {
            usi: text.to_string(),
            ..UniversalSpectrumIdentifier::default()
        };
        let mut response = DiagnosticResponse::new();
        self.parse_fields(usi, text, &mut response);
        usi.is_valid = response.is_valid()
            && usi
                .identifier_type
                .is_some_and(|t| t != IdentifierType::RunIdentifier);
        debug!(
            "Parsed USI '{text}': {} with {} errors and {} warnings",
            usi.identifier_type
                .map_or_else(|| "unknown".to_string(), |t| t.to_string()),
            response.n_errors(),
            response.n_warnings()
        );
        response
    }

    fn parse_fields(
        &self,
        usi: &mut UniversalSpectrumIdentifier,
        text: &str,
        response: &mut DiagnosticResponse,
    ) {
        let Some(body) = text.strip_prefix(PREFIX) else {
            response.add(
                DiagnosticCode::MissingPrefix,
                format!("USI string does not begin with prefix '{PREFIX}'"),
            );
            return;
        };

        let elements = body.split(':').collect_vec();
        if elements.len() < 2 {
            response.add(
                DiagnosticCode::InsufficientComponents,
                format!(
                    "USI string does not have the minimum required 2 colon-separated components after {PREFIX}"
                ),
            );
            return;
        }

        if elements[0].is_empty() {
            response.add(
                DiagnosticCode::EmptyCollectionIdentifier,
                "USI component collection identifier is empty",
            );
            return;
        }
        usi.collection_identifier = Some(elements[0].to_string());
        trace!("Collection identifier is '{}'", elements[0]);

        let mut rest = elements[2..].iter().copied();
        let mut run_name = elements[1].to_string();
        for element in rest.by_ref() {
            if let Ok(index_type) = element.parse::<IndexType>() {
                trace!("Found index type '{index_type}'");
                usi.index_type = Some(index_type);
                break;
            }
            run_name.push(':');
            run_name.push_str(element);
            trace!("Run name is now '{run_name}'");
        }

        match split_subfolder(&run_name) {
            Some((subfolder, run)) => {
                trace!("Subfolder is '{subfolder}', run name is '{run}'");
                usi.dataset_subfolder = Some(subfolder.to_string());
                usi.ms_run_name = Some(run.to_string());
            }
            None => usi.ms_run_name = Some(run_name),
        }

        match self.settings.collection(elements[0]) {
            Some(template) => usi.collection_type = Some(template.name.clone()),
            None => response.add(
                DiagnosticCode::UnknownCollection,
                format!(
                    "The collection identifier '{}' does not match any known collection",
                    elements[0]
                ),
            ),
        }

        let Some(index_type) = usi.index_type else {
            usi.identifier_type = Some(IdentifierType::RunIdentifier);
            response.add(
                DiagnosticCode::NoIndexType,
                "Did not detect an index type of 'scan', 'index', 'nativeId', or 'trace', this is only a run identifier",
            );
            return;
        };

        match rest.next() {
            None => {
                response.add(
                    DiagnosticCode::MissingIndex,
                    format!("There is no component after '{index_type}'"),
                );
                return;
            }
            Some("") => {
                usi.index = Some(String::new());
                response.add(DiagnosticCode::MissingIndex, "The index is empty");
            }
            Some(index) => {
                trace!("Index is '{index}'");
                usi.index = Some(index.to_string());
            }
        }
        usi.identifier_type = Some(IdentifierType::Usi);

        let remaining = rest.collect_vec();
        if remaining.is_empty() {
            return;
        }
        let interpretation = remaining.join(":");
        usi.identifier_type = Some(IdentifierType::Upsmi);
        trace!("Interpretation is '{interpretation}'");

        let (peptidoform, charge) =
            if let Some(captures) = PROVENANCE_REGEX.captures(&interpretation) {
                usi.identifier_type = Some(IdentifierType::Upsmpi);
                usi.provenance_identifier = Some(captures[3].to_string());
                usi.interpretation = Some(format!("{}/{}", &captures[1], &captures[2]));
                (captures[1].to_string(), captures[2].to_string())
            } else if let Some(captures) = CHARGE_REGEX.captures(&interpretation) {
                usi.interpretation = Some(interpretation.clone());
                (captures[1].to_string(), captures[2].to_string())
            } else {
                response.add(
                    DiagnosticCode::MissingCharge,
                    format!("The interpretation '{interpretation}' does not end in '/<charge>'"),
                );
                usi.interpretation = Some(interpretation);
                return;
            };

        match charge.parse::<i32>() {
            Ok(0) => {
                usi.charge = Some(0);
                response.add(
                    DiagnosticCode::ZeroCharge,
                    "The charge is zero, no m/z can be calculated",
                );
            }
            Ok(charge) => usi.charge = Some(charge),
            Err(err) => response.add(
                DiagnosticCode::InvalidCharge,
                format!("The charge '{charge}' is not a valid charge: {err}"),
            ),
        }

        let (parsed, peptidoform_response) = Peptidoform::parse(&peptidoform, self.ontologies);
        if !peptidoform_response.is_valid() {
            response.add(
                DiagnosticCode::ErrorInPeptidoform,
                format!(
                    "The peptidoform '{peptidoform}' contains {} error(s)",
                    peptidoform_response.n_errors()
                ),
            );
        }
        response.merge(peptidoform_response);
        if parsed.is_valid
            && let Some(charge) = usi.charge.filter(|c| *c > 0)
        {
            usi.mz = parsed
                .neutral_mass
                .and_then(|mass| chemistry::mz(mass, charge));
        }
        usi.peptidoform_string = Some(peptidoform);
        usi.peptidoform = Some(parsed);
    }
}

/// Split off a bracketed subfolder at the start of a run name: `[sub[1]]run` becomes
/// (`sub[1]`, `run`). Brackets are balanced so nested brackets can occur in the subfolder. If
/// the run name does not start with a bracket or the first bracket is never closed there is
/// no subfolder.
fn split_subfolder(run_name: &str) -> Option<(&str, &str)> {
    let inner = run_name.strip_prefix('[')?;
    let mut depth = 1_usize;
    for (index, c) in inner.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&inner[..index], &inner[index + 1..]));
                }
            }
            _ => (),
        }
    }
    None
}

use std::collections::BTreeMap;

use itertools::Itertools;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    diagnostics::{DiagnosticCode, DiagnosticResponse},
    usi::{UniversalSpectrumIdentifier, UsiParser},
};

/// The outcome for a single USI in a list
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ValidationResult {
    /// The parsed USI
    pub usi: UniversalSpectrumIdentifier,
    /// All errors and warnings for this USI
    pub response: DiagnosticResponse,
}

/// The outcome of validating a list of USIs
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UsiValidationReport {
    /// `OK`, or the code of the problem with the list as a whole
    pub error_code: String,
    /// Explanation of the error code, empty if `OK`
    pub error_message: String,
    /// The result per distinct USI
    pub validation_results: BTreeMap<String, ValidationResult>,
    /// The number of valid distinct USIs
    pub n_valid: usize,
    /// The number of invalid distinct USIs
    pub n_invalid: usize,
}

impl UsiValidationReport {
    /// If the list as a whole could be validated, individual USIs can still be invalid
    pub fn is_ok(&self) -> bool {
        self.error_code == "OK"
    }
}

impl UsiParser<'_> {
    /// Validate a list of USIs. Every distinct USI is parsed once, duplicates are skipped.
    /// With the `rayon` feature the USIs are parsed in parallel.
    pub fn validate_list(
        &self,
        items: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> UsiValidationReport {
        let distinct = items
            .into_iter()
            .map(|item| item.as_ref().to_string())
            .unique()
            .collect_vec();

        if distinct.is_empty() {
            return UsiValidationReport {
                error_code: DiagnosticCode::EmptyUsiList.to_string(),
                error_message: "The list of USIs is empty".to_string(),
                validation_results: BTreeMap::new(),
                n_valid: 0,
                n_invalid: 0,
            };
        }
        log::debug!("Validating {} distinct USIs", distinct.len());

        #[cfg(feature = "rayon")]
        let iter = distinct.into_par_iter();
        #[cfg(not(feature = "rayon"))]
        let iter = distinct.into_iter();
        let validation_results: BTreeMap<String, ValidationResult> = iter
            .map(|text| {
                let (usi, response) = self.parse(&text);
                (text, ValidationResult { usi, response })
            })
            .collect();

        let n_valid = validation_results
            .values()
            .filter(|result| result.usi.is_valid)
            .count();
        UsiValidationReport {
            error_code: "OK".to_string(),
            error_message: String::new(),
            n_invalid: validation_results.len() - n_valid,
            n_valid,
            validation_results,
        }
    }
}

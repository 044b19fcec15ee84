//! Universal Spectrum Identifiers: `mzspec:<collection>:<run>:<index type>:<index>[:<interpretation>]`

mod collection;
mod parse;
#[cfg(test)]
mod tests;
mod validate;

pub use collection::{CollectionTemplate, UsiSettings};
pub use parse::UsiParser;
pub use validate::{UsiValidationReport, ValidationResult};

use serde::{Deserialize, Serialize};

use crate::peptidoform::Peptidoform;

/// The way the spectrum is indexed within the run
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexType {
    /// A scan number
    Scan,
    /// A zero based index in the file
    Index,
    /// A vendor specific native identifier
    NativeId,
    /// A chromatogram trace
    Trace,
}

impl IndexType {
    /// All index types
    pub const ALL: [Self; 4] = [Self::Scan, Self::Index, Self::NativeId, Self::Trace];

    /// The keyword as written in a USI
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Index => "index",
            Self::NativeId => "nativeId",
            Self::Trace => "trace",
        }
    }
}

impl std::str::FromStr for IndexType {
    type Err = ();
    /// Case insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl std::fmt::Display for IndexType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// How much of a full identifier is present
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum IdentifierType {
    /// Only a collection and run, no index type was found
    RunIdentifier,
    /// Collection, run, and index
    #[serde(rename = "USI")]
    Usi,
    /// A USI with an interpretation
    #[serde(rename = "UPSMI")]
    Upsmi,
    /// A USI with an interpretation and a provenance identifier
    #[serde(rename = "UPSMPI")]
    Upsmpi,
}

impl std::fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::RunIdentifier => "RunIdentifier",
                Self::Usi => "USI",
                Self::Upsmi => "UPSMI",
                Self::Upsmpi => "UPSMPI",
            }
        )
    }
}

/// A parsed USI. Create one with [`UsiParser::parse`]. All fields that could not be found are
/// `None`, the diagnostics returned by the parser explain why.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct UniversalSpectrumIdentifier {
    /// The full text as given
    pub usi: String,
    /// If no errors were found and this is a full USI (not only a run identifier)
    pub is_valid: bool,
    /// How much of a full identifier is present
    pub identifier_type: Option<IdentifierType>,
    /// The collection, e.g. `PXD000561`
    pub collection_identifier: Option<String>,
    /// The name of the collection template the collection identifier matches
    pub collection_type: Option<String>,
    /// The subfolder, written as a bracketed prefix of the run name
    pub dataset_subfolder: Option<String>,
    /// The run name, without subfolder
    pub ms_run_name: Option<String>,
    /// The index type
    pub index_type: Option<IndexType>,
    /// The index, opaque text
    pub index: Option<String>,
    /// The full interpretation, without provenance identifier
    pub interpretation: Option<String>,
    /// The peptidoform part of the interpretation
    pub peptidoform_string: Option<String>,
    /// The parsed peptidoform
    pub peptidoform: Option<Peptidoform>,
    /// The charge part of the interpretation
    pub charge: Option<i32>,
    /// The provenance identifier, anything after `/charge:`
    pub provenance_identifier: Option<String>,
    /// The m/z of the interpreted ion, only if the peptidoform is valid and the charge positive
    pub mz: Option<f64>,
}

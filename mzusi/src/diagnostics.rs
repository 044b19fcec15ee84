//! Collect all errors and warnings found while parsing a single identifier or peptidoform.

use context_error::{BoxedError, Context, CreateError, ErrorKind};
use serde::{Deserialize, Serialize};

/// The kind of problem found while parsing, this decides if a diagnostic is an error or a warning.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum DiagnosticCode {
    /// The USI does not start with `mzspec:`
    #[default]
    MissingPrefix,
    /// The USI has fewer than two colon separated components after the prefix
    InsufficientComponents,
    /// The collection identifier is empty
    EmptyCollectionIdentifier,
    /// The index value is missing or empty
    MissingIndex,
    /// The collection identifier does not match any known collection
    UnknownCollection,
    /// There is an interpretation but it does not end in `/charge`
    MissingCharge,
    /// The charge could not be read as a number
    InvalidCharge,
    /// The embedded peptidoform is invalid
    ErrorInPeptidoform,
    /// There is no peptidoform to parse
    NoPeptidoform,
    /// A closing bracket without opening bracket or the other way around
    UnmatchedBracket,
    /// A residue letter that has no known mass
    UnknownAminoAcid,
    /// A terminal dash that is not at either end of the peptidoform
    MisplacedTerminal,
    /// A modification that could not be understood at all
    UnresolvedModification,
    /// An ontology identifier that is not defined in that ontology
    UnknownOntologyIdentifier,
    /// An ontology name that is not defined in that ontology
    UnknownOntologyName,
    /// An empty list of USIs was given for validation
    EmptyUsiList,
    /// A modification that is valid but cannot be used to calculate a mass
    UnsupportedModification,
    /// A modification name that matches multiple terms in the same ontology
    AmbiguousOntologyName,
    /// A run identifier without index type, so not a full USI
    NoIndexType,
    /// A charge of zero, no m/z can be calculated
    ZeroCharge,
}

impl DiagnosticCode {
    /// A short description of this code, used as title of an error
    pub const fn description(self) -> &'static str {
        match self {
            Self::MissingPrefix => "Missing prefix",
            Self::InsufficientComponents => "Insufficient components",
            Self::EmptyCollectionIdentifier => "Empty collection identifier",
            Self::MissingIndex => "Missing index",
            Self::UnknownCollection => "Unknown collection",
            Self::MissingCharge => "Missing charge",
            Self::InvalidCharge => "Invalid charge",
            Self::ErrorInPeptidoform => "Error in peptidoform",
            Self::NoPeptidoform => "No peptidoform",
            Self::UnmatchedBracket => "Unmatched bracket",
            Self::UnknownAminoAcid => "Unknown amino acid",
            Self::MisplacedTerminal => "Misplaced terminal",
            Self::UnresolvedModification => "Unresolved modification",
            Self::UnknownOntologyIdentifier => "Unknown ontology identifier",
            Self::UnknownOntologyName => "Unknown ontology name",
            Self::EmptyUsiList => "Empty USI list",
            Self::UnsupportedModification => "Unsupported modification",
            Self::AmbiguousOntologyName => "Ambiguous ontology name",
            Self::NoIndexType => "No index type",
            Self::ZeroCharge => "Zero charge",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl ErrorKind for DiagnosticCode {
    type Settings = ();
    fn descriptor(&self) -> &'static str {
        if self.is_error(()) { "error" } else { "warning" }
    }
    fn ignored(&self, _settings: Self::Settings) -> bool {
        false
    }
    fn is_error(&self, _settings: Self::Settings) -> bool {
        !matches!(
            self,
            Self::UnsupportedModification
                | Self::AmbiguousOntologyName
                | Self::NoIndexType
                | Self::ZeroCharge
        )
    }
}

/// A single error or warning
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Diagnostic {
    /// What kind of problem this is
    pub code: DiagnosticCode,
    /// A human readable message
    pub message: String,
    /// The character offset in the parsed text, if the problem is tied to one position
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub position: Option<usize>,
}

impl Diagnostic {
    /// Create a new diagnostic that is not tied to a position
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            position: None,
        }
    }

    /// Tie this diagnostic to a position in the parsed text
    #[must_use]
    pub const fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Convert into a rich error that shows the parsed text, and the position if known.
    pub fn to_error<'a>(&self, text: &'a str) -> BoxedError<'a, DiagnosticCode> {
        let context = Context::none().lines(0, text);
        BoxedError::new(
            self.code,
            self.code.description(),
            self.message.clone(),
            match self.position {
                Some(position) => context.add_highlight((0, position..=position)),
                None => context,
            },
        )
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// All diagnostics for one parse operation, the operation is valid if there are no errors.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DiagnosticResponse {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl DiagnosticResponse {
    /// Create an empty response
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic, it is sorted into errors or warnings based on its code
    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::trace!("{diagnostic}");
        if diagnostic.code.is_error(()) {
            self.errors.push(diagnostic);
        } else {
            self.warnings.push(diagnostic);
        }
    }

    /// Add a diagnostic with the given code and message
    pub fn add(&mut self, code: DiagnosticCode, message: impl Into<String>) {
        self.push(Diagnostic::new(code, message));
    }

    /// Take over all diagnostics from another response, keeping their order
    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// All errors in the order they were found
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// All warnings in the order they were found
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// The number of errors
    pub fn n_errors(&self) -> usize {
        self.errors.len()
    }

    /// The number of warnings
    pub fn n_warnings(&self) -> usize {
        self.warnings.len()
    }

    /// If no errors were found, warnings do not count
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if any diagnostic with the given code is present
    pub fn contains(&self, code: DiagnosticCode) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .any(|d| d.code == code)
    }
}

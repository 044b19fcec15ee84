//! The [`CVError`] which makes it easy for downstream users of the error type to match on the exact error.

use context_error::ErrorKind;

/// All possible errors when locating or reading a controlled vocabulary
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub enum CVError {
    /// None of the searched locations contained the file
    #[default]
    FileDoesNotExist,
    /// If the file could not be opened
    FileCouldNotBeOpened,
    /// If a line gave an error while reading
    CouldNotReadLine,
    /// If a line is wholly invalid
    InvalidLine,
    /// If a def line is invalid
    InvalidDefinition,
    /// If a synonym line is invalid
    InvalidSynonym,
    /// If a date was formatted incorrectly
    InvalidDate,
    /// If an invalid stanza type was specified
    InvalidStanzaType,
}

impl ErrorKind for CVError {
    type Settings = ();
    fn descriptor(&self) -> &'static str {
        "error"
    }
    fn ignored(&self, _settings: Self::Settings) -> bool {
        false
    }
    fn is_error(&self, _settings: Self::Settings) -> bool {
        true
    }
}

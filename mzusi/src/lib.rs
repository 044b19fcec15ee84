#![doc = include_str!("../README.md")]

/// The masses of amino acids, water, and protons.
pub mod chemistry;
pub mod diagnostics;
pub mod modification;
pub mod ontology;
mod peptidoform;
mod usi;

pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticResponse};
pub use modification::ModificationDescriptor;
pub use ontology::{Ontologies, Ontology, OntologyPaths};
pub use peptidoform::{Peptidoform, Residue, Terminal};
pub use usi::{
    CollectionTemplate, IdentifierType, IndexType, UniversalSpectrumIdentifier, UsiParser,
    UsiSettings, UsiValidationReport, ValidationResult,
};

#[cfg(test)]
static TEST_ONTOLOGIES: std::sync::LazyLock<Ontologies> = std::sync::LazyLock::new(|| {
    Ontologies::from_readers(
        include_str!("../tests/data/unimod.obo").as_bytes(),
        include_str!("../tests/data/PSI-MOD.obo").as_bytes(),
    )
    .unwrap()
});

/// The small test ontologies, shared between all unit tests
#[cfg(test)]
pub(crate) fn test_ontologies() -> &'static Ontologies {
    &TEST_ONTOLOGIES
}

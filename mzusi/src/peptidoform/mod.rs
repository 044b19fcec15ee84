//! Peptidoforms: peptide sequences with localised, terminal, and unlocalised modifications.

mod parse;
#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::modification::ModificationDescriptor;

/// The terminus of a peptide
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Terminal {
    /// The N terminus, written as `[mod]-PEPTIDE`
    #[serde(rename = "nterm")]
    NTerm,
    /// The C terminus, written as `PEPTIDE-[mod]`
    #[serde(rename = "cterm")]
    CTerm,
}

impl std::fmt::Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::NTerm => "nterm",
                Self::CTerm => "cterm",
            }
        )
    }
}

/// A single position in a peptidoform, either an amino acid or a terminal pseudo residue
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Residue {
    /// The index, assigned densely from 0 in the order the residues are written
    pub index: usize,
    /// The text of this residue as written, including any modifications
    pub residue_string: String,
    /// The amino acid, `None` for terminal pseudo residues
    pub base_residue: Option<char>,
    /// If this is a terminal pseudo residue, which terminus
    pub terminal: Option<Terminal>,
    /// The modification on this residue, labile modifications are listed on the peptidoform instead
    pub modification: Option<ModificationDescriptor>,
}

/// A parsed peptidoform. Create one with [`Peptidoform::parse`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Peptidoform {
    /// The peptidoform as written
    pub peptidoform_string: String,
    /// The plain amino acid sequence, without any modifications
    pub peptide_sequence: String,
    /// All residues in order
    pub residues: Vec<Residue>,
    /// The modifications on amino acids, keyed by residue index
    pub residue_modifications: BTreeMap<usize, ModificationDescriptor>,
    /// The modifications on the termini
    pub terminal_modifications: BTreeMap<Terminal, ModificationDescriptor>,
    /// Labile modifications (`{...}`), whose location is not known
    pub unlocalized_modifications: Vec<ModificationDescriptor>,
    /// The monoisotopic neutral mass: water plus all residues plus all non labile modifications.
    /// `None` if there was nothing to parse.
    pub neutral_mass: Option<f64>,
    /// The summed mass of all labile modifications, not included in the neutral mass
    pub labile_mass: f64,
    /// If no errors were found
    pub is_valid: bool,
}

impl Peptidoform {
    /// The number of amino acids
    pub fn len(&self) -> usize {
        self.peptide_sequence.chars().count()
    }

    /// If there are no amino acids
    pub fn is_empty(&self) -> bool {
        self.peptide_sequence.is_empty()
    }

    /// All modifications on this peptidoform: terminal, localised, and labile
    pub fn modifications(&self) -> impl Iterator<Item = &ModificationDescriptor> {
        self.terminal_modifications
            .values()
            .chain(self.residue_modifications.values())
            .chain(&self.unlocalized_modifications)
    }
}

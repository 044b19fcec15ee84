//! Modifications as written in a peptidoform, and what they resolved to.

mod resolve;

use itertools::Itertools;
use mzcv::Curie;
use serde::{Deserialize, Serialize};

use crate::ontology::Ontology;

/// How an ontology term was found
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Lookup {
    /// By identifier, as in `UNIMOD:21`
    Identifier,
    /// By name or synonym, as in `Phospho` or `U:Phospho`
    Name,
}

/// A modification category that is valid notation but is not resolved to a mass
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum UnsupportedCategory {
    /// `Glycan:` compositions
    Glycan,
    /// `Formula:` elemental formulas
    Formula,
    /// `GNO:` GNOme glycan identifiers
    Gno,
    /// `RESID:` identifiers
    Resid,
}

impl UnsupportedCategory {
    /// All categories
    pub const ALL: [Self; 4] = [Self::Glycan, Self::Formula, Self::Gno, Self::Resid];

    /// The prefix that introduces this category, including the colon
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Glycan => "Glycan:",
            Self::Formula => "Formula:",
            Self::Gno => "GNO:",
            Self::Resid => "RESID:",
        }
    }
}

/// A term that was found in an ontology
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct OntologyMatch {
    /// The ontology the term was found in
    pub ontology: Ontology,
    /// If it was found by identifier or by name
    pub lookup: Lookup,
    /// The stable identifier of the term
    pub curie: Curie,
    /// The preferred name of the term
    pub name: Box<str>,
    /// The mass of the term, not all terms define a mass
    pub delta_mass: Option<f64>,
}

/// What a modification resolved to
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Resolution {
    /// A bare mass shift, as in `+79.966`
    DeltaMass(f64),
    /// A term from an ontology
    Ontology(OntologyMatch),
    /// A category that is valid but not used for mass calculation
    Unsupported(UnsupportedCategory),
    /// Only free text annotations
    CustomInfo,
    /// Nothing could be understood, see the errors on the descriptor
    Unresolved,
    /// Multiple modifications on the same position, as in `[Phospho][Oxidation]`
    Compound(Vec<ModificationDescriptor>),
}

impl Resolution {
    /// If this resolution carries a mass (even if that mass is not defined for an ontology term)
    pub const fn is_mass_bearing(&self) -> bool {
        matches!(self, Self::DeltaMass(_) | Self::Ontology(_))
    }
}

/// A modification as written in a peptidoform, with everything it resolved to
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ModificationDescriptor {
    /// The modification text as written, without the enclosing brackets
    pub modification_string: String,
    /// What the modification resolved to
    pub resolution: Resolution,
    /// All free text annotations (`info:` pieces)
    pub custom_info: Vec<String>,
    /// All warnings
    pub warnings: Vec<String>,
    /// All errors, the modification is invalid if this is not empty
    pub errors: Vec<String>,
}

impl ModificationDescriptor {
    /// The mass shift of this modification. For compound modifications this is the sum of all
    /// parts that define a mass.
    pub fn delta_mass(&self) -> Option<f64> {
        match &self.resolution {
            Resolution::DeltaMass(mass) => Some(*mass),
            Resolution::Ontology(term) => term.delta_mass,
            Resolution::Compound(parts) => parts
                .iter()
                .filter_map(Self::delta_mass)
                .reduce(|a, b| a + b),
            Resolution::Unsupported(_) | Resolution::CustomInfo | Resolution::Unresolved => None,
        }
    }

    /// The name of the ontology term, compound modifications join the names with ` & `
    pub fn name(&self) -> Option<String> {
        match &self.resolution {
            Resolution::Ontology(term) => Some(term.name.to_string()),
            Resolution::Compound(parts) => {
                let names = parts.iter().filter_map(Self::name).collect_vec();
                (!names.is_empty()).then(|| names.join(" & "))
            }
            _ => None,
        }
    }

    /// The identifier of the ontology term, compound modifications join the identifiers with ` & `
    pub fn curie(&self) -> Option<String> {
        match &self.resolution {
            Resolution::Ontology(term) => Some(term.curie.to_string()),
            Resolution::Compound(parts) => {
                let curies = parts.iter().filter_map(Self::curie).collect_vec();
                (!curies.is_empty()).then(|| curies.join(" & "))
            }
            _ => None,
        }
    }

    /// A short label for the kind of resolution, compound modifications join the labels with ` & `
    pub fn modification_type(&self) -> String {
        match &self.resolution {
            Resolution::DeltaMass(_) => "delta_mass".to_string(),
            Resolution::Ontology(term) => format!(
                "{}_{}",
                match term.ontology {
                    Ontology::Unimod => "UNIMOD",
                    Ontology::Psimod => "PSI-MOD",
                },
                match term.lookup {
                    Lookup::Identifier => "identifier",
                    Lookup::Name => "name",
                }
            ),
            Resolution::Unsupported(_) => "unsupported".to_string(),
            Resolution::CustomInfo => "custom_info".to_string(),
            Resolution::Unresolved => "unknown".to_string(),
            Resolution::Compound(parts) => parts.iter().map(Self::modification_type).join(" & "),
        }
    }

    /// If no errors were found while resolving this modification
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

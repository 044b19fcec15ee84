//! The ontologies used to resolve modifications

use std::{io::BufRead, path::PathBuf};

use context_error::{BoxedError, Context, CreateError};
use itertools::Itertools;
use mzcv::{CVError, CVIndex, CVLookup, OboOntology};
use serde::{Deserialize, Serialize};

/// All ontologies that can be used to resolve modification names and identifiers
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize,
)]
pub enum Ontology {
    #[default]
    /// Unimod
    Unimod,
    /// PSI-MOD
    Psimod,
}

impl Ontology {
    /// Get the accession namespace for the ontology
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unimod => "UNIMOD",
            Self::Psimod => "MOD",
        }
    }

    /// Get the prefix that forces a name to be looked up in this ontology
    pub const fn name_prefix(self) -> &'static str {
        match self {
            Self::Unimod => "U:",
            Self::Psimod => "P:",
        }
    }

    /// Get the file name under which this ontology is distributed
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Unimod => "unimod.obo",
            Self::Psimod => "PSI-MOD.obo",
        }
    }
}

impl std::fmt::Display for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Unimod => "Unimod",
                Self::Psimod => "PSI-MOD",
            },
        )
    }
}

/// A shared read only term store
pub type SharedLookup = Box<dyn CVLookup + Send + Sync>;

/// Handle all ontologies needed to resolve modifications.
///
/// Create it once, via [`Self::new`], [`Self::from_readers`], or [`OntologyPaths::load`], and
/// pass it by reference to every parse. Nothing mutates it after creation, so it can be
/// shared between threads freely.
pub struct Ontologies {
    unimod: SharedLookup,
    psimod: SharedLookup,
}

impl std::fmt::Debug for Ontologies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ontologies")
            .field("Unimod", &self.unimod.len())
            .field("PSI-MOD", &self.psimod.len())
            .finish()
    }
}

impl Ontologies {
    /// Create from any two term stores
    pub fn new(
        unimod: impl CVLookup + Send + Sync + 'static,
        psimod: impl CVLookup + Send + Sync + 'static,
    ) -> Self {
        Self {
            unimod: Box::new(unimod),
            psimod: Box::new(psimod),
        }
    }

    /// Create without any terms, only delta masses and unsupported categories can be resolved
    pub fn empty() -> Self {
        Self::new(CVIndex::empty(), CVIndex::empty())
    }

    /// Read both ontologies from Obo formatted text
    /// # Errors
    /// If either of the readers does not contain a valid Obo file.
    pub fn from_readers(
        unimod: impl BufRead,
        psimod: impl BufRead,
    ) -> Result<Self, BoxedError<'static, CVError>> {
        Ok(Self::new(
            CVIndex::from_obo(&OboOntology::from_reader(unimod)?),
            CVIndex::from_obo(&OboOntology::from_reader(psimod)?),
        ))
    }

    /// Get the term store for the given ontology
    pub fn get(&self, ontology: Ontology) -> &dyn CVLookup {
        match ontology {
            Ontology::Unimod => self.unimod.as_ref(),
            Ontology::Psimod => self.psimod.as_ref(),
        }
    }

    /// Get Unimod
    pub fn unimod(&self) -> &dyn CVLookup {
        self.unimod.as_ref()
    }

    /// Get PSI-MOD
    pub fn psimod(&self) -> &dyn CVLookup {
        self.psimod.as_ref()
    }
}

/// The locations to search for the ontology files. Per ontology the first location that
/// contains the file (plain or gzipped) is used.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OntologyPaths {
    /// The directories to search in order
    pub locations: Vec<PathBuf>,
}

impl Default for OntologyPaths {
    fn default() -> Self {
        Self {
            locations: vec![PathBuf::from(".")],
        }
    }
}

impl OntologyPaths {
    /// Search the given directories
    pub fn new(locations: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            locations: locations.into_iter().map(Into::into).collect(),
        }
    }

    /// Find the file for the given ontology
    /// # Errors
    /// If none of the locations contains the file.
    pub fn locate(&self, ontology: Ontology) -> Result<PathBuf, BoxedError<'static, CVError>> {
        self.locations
            .iter()
            .flat_map(|location| {
                [
                    location.join(ontology.file_name()),
                    location.join(format!("{}.gz", ontology.file_name())),
                ]
            })
            .find(|path| path.is_file())
            .ok_or_else(|| {
                BoxedError::new(
                    CVError::FileDoesNotExist,
                    "Could not find ontology",
                    format!(
                        "Unable to locate {ontology} with file name '{}', searched in: {}",
                        ontology.file_name(),
                        self.locations.iter().map(|l| l.display()).join(", ")
                    ),
                    Context::none(),
                )
            })
    }

    /// Locate and load both ontologies
    /// # Errors
    /// If either ontology could not be found or is not a valid Obo file.
    pub fn load(&self) -> Result<Ontologies, BoxedError<'static, CVError>> {
        let load = |ontology: Ontology| -> Result<CVIndex, BoxedError<'static, CVError>> {
            let path = self.locate(ontology)?;
            log::debug!("Loading {ontology} from {}", path.display());
            CVIndex::from_obo_file(path)
        };
        Ok(Ontologies::new(load(Ontology::Unimod)?, load(Ontology::Psimod)?))
    }
}

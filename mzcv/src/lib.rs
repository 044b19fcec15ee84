#![doc = include_str!("../README.md")]
//! # Handling CVs
//! This library reads controlled vocabularies (CVs) in the Obo format, like Unimod and PSI-MOD,
//! and keeps them in memory for fast lookups.
//!
//! Handles:
//! * Reading Obo files, optionally gzipped ([`OboOntology::from_file`], [`OboOntology::from_reader`])
//! * Retrieving terms ([`CVIndex::get_by_curie`], [`CVIndex::get_by_name`], [`CVIndex::search`])
//! * Read only access for downstream users through the [`CVLookup`] trait
//!
//! # Features
//! * `serde` derives `Serialize` and `Deserialize` for the terms and CURIEs.

mod curie;
mod cv_error;
mod cv_index;
mod cv_term;
mod obo;
mod text;

pub use curie::*;
pub use cv_error::*;
pub use cv_index::*;
pub use cv_term::*;
pub use obo::*;

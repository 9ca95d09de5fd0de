//! Extracts the abnormality subgraph of the Human Phenotype Ontology
//! and classifies every term by its mapping to SNOMED CT.
//!
//! The pipeline has three steps:
//!
//! 1. [`subgraph::extract`] the subgraph below
//!    `HP:0000118 | Phenotypic abnormality` ([`PHENOTYPE_ID`])
//! 2. [`mapping::classify_mapping`] the terms into mapped and unmapped
//!    terms, based on their `SNOMEDCT` cross references
//! 3. [`annotation::annotate`] every term as mapped (`M`), leaf (`L`),
//!    intermediate (`I`) or terminal (`T`) and compute its shortest path
//!    to the root
//!
//! The annotated subgraph is then written as GML with [`gml::write_file`].
//!
//! # Examples
//!
//! ```no_run
//! use hpo_abnormal::{gml, pipeline, Config, Ontology};
//!
//! let ontology = Ontology::from_obo("data/01_raw/hp.obo").unwrap();
//! let abnormal = pipeline::run(&ontology, &Config::default()).unwrap();
//! gml::write_file(&abnormal, "data/02_intermediate/abnormal.gml.gz").unwrap();
//! ```
use std::num::ParseIntError;
use thiserror::Error;

pub mod annotation;
pub mod config;
pub mod gml;
pub mod mapping;
pub mod ontology;
mod parser;
pub mod pipeline;
pub mod subgraph;
pub mod term;

pub use annotation::{annotate, AnnotatedOntology, Annotation, Category, Summary};
pub use config::Config;
pub use mapping::{classify_mapping, Mapping};
pub use ontology::Ontology;
pub use subgraph::extract;
pub use term::{HpoGroup, HpoTerm, HpoTermId};

const DEFAULT_NUM_PARENTS: usize = 10;

/// The root of the abnormality subgraph: `HP:0000118 | Phenotypic abnormality`
pub const PHENOTYPE_ID: HpoTermId = HpoTermId::from_u32(118);

/// Prefix of cross references pointing to SNOMED CT
pub const SNOMED_PREFIX: &str = "SNOMEDCT";

/// Main Error type for this crate
#[derive(Error, Debug)]
pub enum HpoError {
    /// The requested term is not part of the ontology
    #[error("term {0} does not exist")]
    NotFound(HpoTermId),
    /// The source data is malformed (missing ids, unknown parents, cycles ...)
    #[error("invalid input data: {0}")]
    InvalidInput(String),
    /// The annotated graph could not be written or read back
    #[error("unable to (de)serialize graph: {0}")]
    Serialization(String),
    /// Failed to open a file
    #[error("cannot open file {0}")]
    CannotOpenFile(String),
    /// Failed to parse an integer (e.g. the numeric part of an `HpoTermId`)
    #[error("unable to parse Integer")]
    ParseIntError,
}

impl From<ParseIntError> for HpoError {
    fn from(_: ParseIntError) -> Self {
        HpoError::ParseIntError
    }
}

/// Shortcut for `Result<T, HpoError>`
pub type HpoResult<T> = Result<T, HpoError>;

//! Settings of the abnormality pipeline

use crate::{HpoTermId, PHENOTYPE_ID, SNOMED_PREFIX};

/// Root term and cross reference prefix used to extract and classify the subgraph
///
/// The default extracts the `HP:0000118 | Phenotypic abnormality` subgraph
/// and treats every cross reference starting with `SNOMEDCT` as mapping.
///
/// # Examples
///
/// ```
/// use hpo_abnormal::{Config, HpoTermId};
///
/// let config = Config::default()
///     .with_root(HpoTermId::from(152u32))
///     .with_xref_prefix("UMLS");
///
/// assert_eq!(config.root().to_string(), "HP:0000152");
/// assert_eq!(config.xref_prefix(), "UMLS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    root: HpoTermId,
    xref_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PHENOTYPE_ID,
            xref_prefix: SNOMED_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Constructs a new `Config`
    pub fn new<I: Into<HpoTermId>>(root: I, xref_prefix: &str) -> Self {
        Self {
            root: root.into(),
            xref_prefix: xref_prefix.to_string(),
        }
    }

    /// Sets the root term of the extracted subgraph
    #[must_use]
    pub fn with_root<I: Into<HpoTermId>>(mut self, root: I) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the prefix a cross reference must start with to count as mapping
    #[must_use]
    pub fn with_xref_prefix(mut self, prefix: &str) -> Self {
        self.xref_prefix = prefix.to_string();
        self
    }

    /// The root term of the subgraph
    pub fn root(&self) -> HpoTermId {
        self.root
    }

    /// The cross reference prefix, matched case-sensitive
    pub fn xref_prefix(&self) -> &str {
        &self.xref_prefix
    }
}

//! Extraction and annotation in one step

use tracing::info;

use crate::annotation::{annotate, AnnotatedOntology};
use crate::subgraph::extract;
use crate::{Config, HpoResult, Ontology};

/// Extracts the subgraph below `config.root()` and annotates all its terms
///
/// # Errors
///
/// - [`crate::HpoError::NotFound`] if the root is not part of the ontology
/// - [`crate::HpoError::InvalidInput`] if the subgraph is not a DAG
///
/// # Examples
///
/// ```
/// use hpo_abnormal::{pipeline, Config, Ontology};
///
/// let obo = "[Term]\nid: HP:0000001\nname: All\n\n\
///            [Term]\nid: HP:0000118\nname: Phenotypic abnormality\nis_a: HP:0000001\n\n\
///            [Term]\nid: HP:0000152\nname: Abnormality of head or neck\n\
///            xref: SNOMEDCT_US:118932009\nis_a: HP:0000118\n";
/// let ontology = Ontology::from_obo_str(obo).unwrap();
///
/// let annotated = pipeline::run(&ontology, &Config::default()).unwrap();
/// assert_eq!(annotated.len(), 2);
/// assert!(annotated.get(1u32).is_none());
/// ```
pub fn run(ontology: &Ontology, config: &Config) -> HpoResult<AnnotatedOntology> {
    let subgraph = extract(ontology, config.root())?;
    let annotated = annotate(subgraph, config)?;
    let summary = annotated.summary();
    info!(
        "Annotated {} terms: {} mapped, {} intermediate, {} terminal, {} leaves",
        summary.terms, summary.mapped, summary.intermediate, summary.terminal, summary.leaves
    );
    Ok(annotated)
}

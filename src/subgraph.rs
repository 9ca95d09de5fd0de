//! Extraction of the subgraph below a root term
//!
//! In the ontology, edges point from the more specific child term to
//! its parent. The subgraph of a root is induced by the root itself and
//! every term that reaches the root by following `is_a` edges, i.e. all
//! direct and indirect children.

use tracing::info;

use crate::term::HpoGroup;
use crate::{HpoError, HpoResult, HpoTerm, HpoTermId, Ontology};

/// Returns the [`HpoTermId`]s of all direct and indirect children of `root`
///
/// The root itself is not part of the result
///
/// # Errors
///
/// [`HpoError::NotFound`] if `root` is not part of the ontology
pub fn descendants(ontology: &Ontology, root: HpoTermId) -> HpoResult<HpoGroup> {
    let root = ontology.hpo(root).ok_or(HpoError::NotFound(root))?;
    Ok(root.all_children_ids())
}

/// Constructs the subgraph induced by `root` and all its descendants
///
/// All terms keep their attributes unchanged, all connections between
/// two terms of the subgraph are kept. Terms are added in the order of
/// the source ontology. The document header is copied as well.
///
/// # Errors
///
/// [`HpoError::NotFound`] if `root` is not part of the ontology
///
/// # Examples
///
/// ```
/// use hpo_abnormal::{subgraph, Ontology};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("All".into(), 1u32);
/// ontology.insert_term("Phenotypic abnormality".into(), 118u32);
/// ontology.insert_term("Mode of inheritance".into(), 5u32);
/// ontology.insert_term("Abnormality of the head".into(), 234u32);
/// ontology.add_parent(1u32, 118u32).unwrap();
/// ontology.add_parent(1u32, 5u32).unwrap();
/// ontology.add_parent(118u32, 234u32).unwrap();
///
/// let abnormal = subgraph::extract(&ontology, 118u32.into()).unwrap();
/// assert_eq!(abnormal.len(), 2);
/// assert!(abnormal.hpo(234u32).is_some());
/// assert!(abnormal.hpo(1u32).is_none());
/// ```
pub fn extract(ontology: &Ontology, root: HpoTermId) -> HpoResult<Ontology> {
    let mut ids = descendants(ontology, root)?;
    ids.insert(root);

    let mut sub = Ontology::with_capacity(ids.len());
    for (key, value) in ontology.header() {
        sub.add_header(key, value);
    }
    for term in ontology.terms() {
        if ids.contains(term.id()) {
            sub.add_term(term.detached());
        }
    }
    for term in ontology.terms() {
        if !ids.contains(term.id()) {
            continue;
        }
        for parent in term.parents() {
            if ids.contains(&parent) {
                sub.add_parent(parent, *term.id())?;
            }
        }
    }

    info!(
        "Total abnormal terms: {} out of a total of {} terms",
        sub.len(),
        ontology.len()
    );
    Ok(sub)
}

/// Returns the direct children of all given terms
///
/// This is one breadth-first layer below `term_ids`. Children shared by
/// several terms are returned once per parent, in the order the parents
/// are provided. Unknown ids are ignored.
pub fn next_descendants_layer(ontology: &Ontology, term_ids: &[HpoTermId]) -> Vec<HpoTermId> {
    term_ids
        .iter()
        .filter_map(|id| ontology.hpo(*id))
        .flat_map(|term| term.children_ids().iter())
        .collect()
}

/// Returns the term with all its information, if present
pub fn term_info(ontology: &Ontology, term_id: HpoTermId) -> Option<HpoTerm<'_>> {
    ontology.hpo(term_id)
}

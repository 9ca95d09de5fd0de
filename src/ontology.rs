use core::fmt::Debug;
use std::path::Path;

use crate::parser;
use crate::term::internal::HpoTermInternal;
use crate::term::HpoTerm;
use crate::HpoResult;
use crate::{HpoError, HpoTermId};

mod termarena;
use termarena::Arena;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// `Ontology` is the in-memory graph of [`HpoTerm`]s
///
/// Every term is a node, every `is_a` relationship is a directed edge
/// from the child term to its parent term. The graph is acyclic.
///
/// # Examples
///
/// ```
/// use hpo_abnormal::Ontology;
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("All".into(), 1u32);
/// ontology.insert_term("Phenotypic abnormality".into(), 118u32);
/// ontology.add_parent(1u32, 118u32).unwrap();
///
/// assert_eq!(ontology.len(), 2);
/// assert_eq!(ontology.edge_count(), 1);
///
/// let term = ontology.hpo(118u32).unwrap();
/// assert_eq!(term.name(), "Phenotypic abnormality");
/// assert_eq!(term.parents().next().unwrap().name(), "All");
/// ```
///
/// # Construction
///
/// The usual way is to parse the `hp.obo` file provided by
/// [Jax HPO](https://hpo.jax.org/) with [`Ontology::from_obo`].
///
/// You can also build it all by yourself:
/// 1. construct an empty Ontology [`Ontology::default`]
/// 2. Add all terms [`Ontology::insert_term`]
/// 3. Connect terms to their parents [`Ontology::add_parent`]
///
/// # Processing
///
/// The ontology is the input of the abnormality pipeline:
///
/// ```mermaid
/// graph LR
/// OBO["hp.obo"] --> ONT["Ontology"]
/// ONT -- "subgraph::extract" --> SUB["Abnormal subgraph"]
/// SUB -- "mapping::classify_mapping" --> MAP["Mapped / Unmapped"]
/// SUB -- "annotation::annotate" --> ANN["AnnotatedOntology"]
/// MAP --> ANN
/// ANN -- "gml::write" --> GML["abnormal.gml.gz"]
/// ```
#[derive(Default, Clone)]
pub struct Ontology {
    hpo_terms: Arena,
    // OBO document header (`format-version`, `data-version` ...)
    header: Vec<(String, String)>,
}

impl Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ontology with {} terms", self.hpo_terms.len())
    }
}

/// Public API of the Ontology
impl Ontology {
    /// Initialize the [`Ontology`] from an `hp.obo` file
    ///
    /// # Errors
    ///
    /// - obo file not present or available: [`HpoError::CannotOpenFile`]
    /// - invalid data in the obo file: [`HpoError::InvalidInput`]
    pub fn from_obo<P: AsRef<Path>>(filename: P) -> HpoResult<Self> {
        let mut ont = Ontology::default();
        parser::hp_obo::read_obo_file(filename, &mut ont)?;
        Ok(ont)
    }

    /// Initialize the [`Ontology`] from the content of an `hp.obo` file
    ///
    /// # Errors
    ///
    /// Invalid data in the obo content: [`HpoError::InvalidInput`]
    ///
    /// # Examples
    ///
    /// ```
    /// use hpo_abnormal::Ontology;
    ///
    /// let obo = "[Term]\nid: HP:0000001\nname: All\n\n\
    ///            [Term]\nid: HP:0000118\nname: Phenotypic abnormality\nis_a: HP:0000001 ! All\n";
    /// let ontology = Ontology::from_obo_str(obo).unwrap();
    /// assert_eq!(ontology.len(), 2);
    /// ```
    pub fn from_obo_str(content: &str) -> HpoResult<Self> {
        let mut ont = Ontology::default();
        parser::hp_obo::load_from_str(content, &mut ont)?;
        Ok(ont)
    }

    /// Returns the number of HPO-Terms in the Ontology
    pub fn len(&self) -> usize {
        self.hpo_terms.len()
    }

    /// Returns `true` if the Ontology does not contain any HPO-Terms
    ///
    /// # Examples
    ///
    /// ```
    /// use hpo_abnormal::Ontology;
    /// let ontology = Ontology::default();
    /// assert!(ontology.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of child → parent connections
    pub fn edge_count(&self) -> usize {
        self.hpo_terms
            .values()
            .iter()
            .map(|term| term.parents().len())
            .sum()
    }

    /// Returns the [`HpoTerm`] of the provided [`HpoTermId`]
    ///
    /// If no such term is present in the Ontolgy, `None` is returned
    pub fn hpo<I: Into<HpoTermId>>(&self, term_id: I) -> Option<HpoTerm> {
        HpoTerm::try_new(self, term_id.into()).ok()
    }

    /// Returns an Iterator of all [`HpoTerm`]s from the Ontology
    ///
    /// The terms are returned in insertion order
    pub fn hpos(&self) -> Iter<'_> {
        self.into_iter()
    }

    /// Returns the tag-value pairs of the OBO document header
    ///
    /// The header contains the release information of the ontology, e.g.
    /// `format-version` or `data-version`. Tags are kept in file order,
    /// repeated tags are allowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use hpo_abnormal::Ontology;
    ///
    /// let obo = "format-version: 1.2\ndata-version: hp/releases/2023-04-05\n\n\
    ///            [Term]\nid: HP:0000001\nname: All\n";
    /// let ontology = Ontology::from_obo_str(obo).unwrap();
    /// assert_eq!(ontology.header()[1].0, "data-version");
    /// assert_eq!(ontology.header()[1].1, "hp/releases/2023-04-05");
    /// ```
    pub fn header(&self) -> &[(String, String)] {
        &self.header
    }

    /// Returns `true` if the term is part of the Ontology
    pub fn contains<I: Into<HpoTermId>>(&self, term_id: I) -> bool {
        self.hpo_terms.index_of(term_id.into()).is_some()
    }
}

/// Methods to add terms and connections
impl Ontology {
    /// Crates and inserts a new term to the ontology
    ///
    /// This method does not link the term to its parents
    pub fn insert_term<I: Into<HpoTermId>>(&mut self, name: String, id: I) {
        let term = HpoTermInternal::new(name, id.into());
        self.hpo_terms.insert(term);
    }

    /// Add a connection from an [`HpoTerm`] to its parent
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] if the `parent_id` or `child_id` is not
    /// present in the Ontology
    pub fn add_parent<I: Into<HpoTermId>, J: Into<HpoTermId>>(
        &mut self,
        parent_id: I,
        child_id: J,
    ) -> HpoResult<()> {
        let parent_id = parent_id.into();
        let child_id = child_id.into();
        if !self.contains(child_id) {
            return Err(HpoError::NotFound(child_id));
        }
        self.get_mut(parent_id)
            .ok_or(HpoError::NotFound(parent_id))?
            .add_child(child_id);
        self.get_mut(child_id)
            .ok_or(HpoError::NotFound(child_id))?
            .add_parent(parent_id);
        Ok(())
    }

    /// Appends a cross reference to the term
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] if the term is not present in the Ontology
    ///
    /// # Examples
    ///
    /// ```
    /// use hpo_abnormal::Ontology;
    ///
    /// let mut ontology = Ontology::default();
    /// ontology.insert_term("Foo".into(), 152u32);
    /// ontology.add_xref(152u32, "SNOMEDCT_US:118932009").unwrap();
    ///
    /// assert_eq!(ontology.hpo(152u32).unwrap().xrefs(), &["SNOMEDCT_US:118932009"]);
    /// ```
    pub fn add_xref<I: Into<HpoTermId>>(&mut self, term_id: I, xref: &str) -> HpoResult<()> {
        let term_id = term_id.into();
        self.get_mut(term_id)
            .ok_or(HpoError::NotFound(term_id))?
            .xrefs_mut()
            .push(xref.to_string());
        Ok(())
    }

    /// Appends a tag-value pair to the document header
    pub fn add_header(&mut self, key: &str, value: &str) {
        self.header.push((key.to_string(), value.to_string()));
    }

    /// Appends a passthrough attribute to the term
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] if the term is not present in the Ontology
    pub fn add_attribute<I: Into<HpoTermId>>(
        &mut self,
        term_id: I,
        key: &str,
        value: &str,
    ) -> HpoResult<()> {
        let term_id = term_id.into();
        self.get_mut(term_id)
            .ok_or(HpoError::NotFound(term_id))?
            .attributes_mut()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}

/// Crate-only functions for setting up and accessing the Ontology
impl Ontology {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            hpo_terms: Arena::with_capacity(capacity),
            header: Vec::new(),
        }
    }

    /// Insert an `HpoTermInternal` to the ontology
    ///
    /// This method does not link the term to its parents
    pub(crate) fn add_term(&mut self, term: HpoTermInternal) -> HpoTermId {
        let id = *term.id();
        self.hpo_terms.insert(term);
        id
    }

    /// Returns the `HpoTermInternal` with the given `HpoTermId`
    pub(crate) fn get<I: Into<HpoTermId>>(&self, term_id: I) -> Option<&HpoTermInternal> {
        self.hpo_terms.get(term_id.into())
    }

    fn get_mut<I: Into<HpoTermId>>(&mut self, term_id: I) -> Option<&mut HpoTermInternal> {
        self.hpo_terms.get_mut(term_id.into())
    }

    /// Returns the arena position of the term
    pub(crate) fn index_of(&self, term_id: HpoTermId) -> Option<usize> {
        self.hpo_terms.index_of(term_id)
    }

    /// All terms, in arena order
    pub(crate) fn terms(&self) -> &[HpoTermInternal] {
        self.hpo_terms.values()
    }
}

/// Iterates the Ontology and yields [`HpoTerm`]s
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, HpoTermInternal>,
    ontology: &'a Ontology,
}

impl<'a> std::iter::Iterator for Iter<'a> {
    type Item = HpoTerm<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|term| HpoTerm::new(self.ontology, term))
    }
}

impl<'a> IntoIterator for &'a Ontology {
    type Item = HpoTerm<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.hpo_terms.values().iter(),
            ontology: self,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_parent_links_both_directions() {
        let mut ont = Ontology::default();
        ont.insert_term("Foo".into(), 1u32);
        ont.insert_term("Bar".into(), 2u32);
        ont.add_parent(1u32, 2u32).unwrap();

        assert!(ont.get(2u32).unwrap().parents().contains(&1u32.into()));
        assert!(ont.get(1u32).unwrap().children().contains(&2u32.into()));
        assert_eq!(ont.edge_count(), 1);
    }

    #[test]
    fn add_parent_missing_term() {
        let mut ont = Ontology::default();
        ont.insert_term("Foo".into(), 1u32);

        assert!(matches!(
            ont.add_parent(1u32, 2u32),
            Err(HpoError::NotFound(id)) if id == HpoTermId::from(2u32)
        ));
        assert!(matches!(
            ont.add_parent(3u32, 1u32),
            Err(HpoError::NotFound(id)) if id == HpoTermId::from(3u32)
        ));
        // a failed connection must not leave a dangling edge
        assert!(ont.get(1u32).unwrap().parents().is_empty());
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let mut ont = Ontology::default();
        ont.insert_term("C".into(), 30u32);
        ont.insert_term("A".into(), 10u32);
        ont.insert_term("B".into(), 20u32);

        let names: Vec<&str> = ont.hpos().map(|term| term.name()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert!(ont.contains(10u32));
        assert!(!ont.contains(11u32));
    }

    #[test]
    fn header_keeps_order_and_duplicates() {
        let mut ont = Ontology::default();
        ont.add_header("remark", "first");
        ont.add_header("ontology", "hp");
        ont.add_header("remark", "second");

        let keys: Vec<&str> = ont.header().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["remark", "ontology", "remark"]);
        assert_eq!(ont.header()[2].1, "second");
        assert!(ont.is_empty());
    }
}

use std::collections::VecDeque;

use crate::term::internal::HpoTermInternal;
use crate::term::{HpoGroup, HpoTermId};
use crate::HpoError;
use crate::HpoResult;
use crate::Ontology;

/// The `HpoTerm` represents a single term from the HP Ontology
///
/// The term is a cheap, borrowed view into the [`Ontology`] and
/// provides access to the term's attributes and its direct and
/// indirect relationships.
#[derive(Debug, Clone, Copy)]
pub struct HpoTerm<'a> {
    id: &'a HpoTermId,
    name: &'a str,
    xrefs: &'a [String],
    attributes: &'a [(String, String)],
    parents: &'a HpoGroup,
    children: &'a HpoGroup,
    ontology: &'a Ontology,
}

impl<'a> HpoTerm<'a> {
    /// Constructs a new [`HpoTerm`]
    ///
    /// # Errors
    ///
    /// If the given [`HpoTermId`] does not match an existing term
    /// it returns [`HpoError::NotFound`]
    pub fn try_new(ontology: &'a Ontology, term: HpoTermId) -> HpoResult<HpoTerm<'a>> {
        let term = ontology.get(term).ok_or(HpoError::NotFound(term))?;
        Ok(HpoTerm::new(ontology, term))
    }

    /// Constructs a new [`HpoTerm`] from an `HpoTermInternal`
    pub(crate) fn new(ontology: &'a Ontology, term: &'a HpoTermInternal) -> HpoTerm<'a> {
        HpoTerm {
            id: term.id(),
            name: term.name(),
            xrefs: term.xrefs(),
            attributes: term.attributes(),
            parents: term.parents(),
            children: term.children(),
            ontology,
        }
    }

    /// Returns the [`HpoTermId`] of the term
    ///
    /// e.g.: `HP:0012345`
    pub fn id(&self) -> HpoTermId {
        *self.id
    }

    /// Returns the name of the term
    ///
    /// e.g.: `Abnormality of the nervous system`
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Returns the cross references of the term, in source order
    ///
    /// e.g.: `["SNOMEDCT_US:118940003", "UMLS:C0497552"]`
    pub fn xrefs(&self) -> &'a [String] {
        self.xrefs
    }

    /// Returns all other attributes of the term as `(key, value)` pairs
    ///
    /// Keys can occur multiple times, the order is the source order.
    pub fn attributes(&self) -> &'a [(String, String)] {
        self.attributes
    }

    /// Returns the [`HpoTermId`]s of the direct parents
    pub fn parent_ids(&self) -> &'a HpoGroup {
        self.parents
    }

    /// Returns an iterator of the direct parents of the term
    pub fn parents(&self) -> HpoTerms<'a> {
        HpoTerms::new(self.parents, self.ontology)
    }

    /// Returns the [`HpoTermId`]s of the direct children
    pub fn children_ids(&self) -> &'a HpoGroup {
        self.children
    }

    /// Returns an iterator of the direct children of the term
    pub fn children(&self) -> HpoTerms<'a> {
        HpoTerms::new(self.children, self.ontology)
    }

    /// Returns the [`HpoTermId`]s of all direct and indirect children
    ///
    /// The term itself is not part of the result
    pub fn all_children_ids(&self) -> HpoGroup {
        let mut res = HpoGroup::new();
        let mut queue: VecDeque<HpoTermId> = self.children.iter().collect();
        while let Some(id) = queue.pop_front() {
            if !res.insert(id) {
                continue;
            }
            if let Some(child) = self.ontology.get(id) {
                queue.extend(child.children().iter());
            }
        }
        res
    }

    /// Returns `true` if the term does not have any children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if `self` is a direct or indirect child of `other`
    pub fn child_of(&self, other: &HpoTerm) -> bool {
        other.all_children_ids().contains(&self.id)
    }
}

impl PartialEq for HpoTerm<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Iterates [`HpoTerm`]s of an [`HpoGroup`]
pub struct HpoTerms<'a> {
    ids: crate::term::Iter<'a>,
    ontology: &'a Ontology,
}

impl<'a> HpoTerms<'a> {
    pub(crate) fn new(group: &'a HpoGroup, ontology: &'a Ontology) -> Self {
        HpoTerms {
            ids: group.iter(),
            ontology,
        }
    }
}

impl<'a> Iterator for HpoTerms<'a> {
    type Item = HpoTerm<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        let ontology = self.ontology;
        self.ids.find_map(|id| ontology.hpo(id))
    }
}

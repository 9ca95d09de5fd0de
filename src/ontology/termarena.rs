use std::collections::HashMap;

use crate::term::internal::HpoTermInternal;
use crate::HpoTermId;

/// Integer-indexed storage of all terms
///
/// Terms are kept in insertion order; the `index` maps every
/// [`HpoTermId`] to its position in `terms`.
#[derive(Debug, Default, Clone)]
pub(crate) struct Arena {
    terms: Vec<HpoTermInternal>,
    index: HashMap<HpoTermId, usize>,
}

impl Arena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            terms: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Inserts the term and returns its arena index
    ///
    /// An already present term with the same id is replaced in place.
    pub fn insert(&mut self, term: HpoTermInternal) -> usize {
        match self.index.get(term.id()) {
            Some(&idx) => {
                self.terms[idx] = term;
                idx
            }
            None => {
                let idx = self.terms.len();
                self.index.insert(*term.id(), idx);
                self.terms.push(term);
                idx
            }
        }
    }

    pub fn index_of(&self, id: HpoTermId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn get(&self, id: HpoTermId) -> Option<&HpoTermInternal> {
        self.index_of(id).map(|idx| &self.terms[idx])
    }

    pub fn get_mut(&mut self, id: HpoTermId) -> Option<&mut HpoTermInternal> {
        match self.index_of(id) {
            Some(idx) => Some(&mut self.terms[idx]),
            None => None,
        }
    }

    pub fn values(&self) -> &[HpoTermInternal] {
        &self.terms
    }
}

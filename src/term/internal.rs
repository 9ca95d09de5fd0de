use crate::term::{HpoGroup, HpoTermId};
use crate::DEFAULT_NUM_PARENTS;

/// Storage representation of a single term inside the ontology arena
///
/// `HpoTerm` is the public, borrowed view on top of this struct.
#[derive(Debug, Clone)]
pub(crate) struct HpoTermInternal {
    id: HpoTermId,
    name: String,
    xrefs: Vec<String>,
    attributes: Vec<(String, String)>,
    parents: HpoGroup,
    children: HpoGroup,
}

impl HpoTermInternal {
    pub fn new(name: String, id: HpoTermId) -> HpoTermInternal {
        HpoTermInternal {
            id,
            name,
            xrefs: Vec::new(),
            attributes: Vec::new(),
            parents: HpoGroup::with_capacity(DEFAULT_NUM_PARENTS),
            children: HpoGroup::with_capacity(DEFAULT_NUM_PARENTS),
        }
    }

    pub fn id(&self) -> &HpoTermId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn xrefs(&self) -> &[String] {
        &self.xrefs
    }

    pub fn xrefs_mut(&mut self) -> &mut Vec<String> {
        &mut self.xrefs
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Vec<(String, String)> {
        &mut self.attributes
    }

    pub fn parents(&self) -> &HpoGroup {
        &self.parents
    }

    pub fn children(&self) -> &HpoGroup {
        &self.children
    }

    pub fn add_parent<I: Into<HpoTermId>>(&mut self, parent_id: I) {
        self.parents.insert(parent_id);
    }

    pub fn add_child<I: Into<HpoTermId>>(&mut self, child_id: I) {
        self.children.insert(child_id);
    }

    /// Returns a copy of the term without any parent or child connections
    pub fn detached(&self) -> HpoTermInternal {
        HpoTermInternal {
            id: self.id,
            name: self.name.clone(),
            xrefs: self.xrefs.clone(),
            attributes: self.attributes.clone(),
            parents: HpoGroup::default(),
            children: HpoGroup::default(),
        }
    }
}

impl PartialEq for HpoTermInternal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HpoTermInternal {}

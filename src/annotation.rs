//! Structural annotation of the terms of a subgraph
//!
//! Every term gets four flags and its shortest path to the root:
//!
//! - `M`: the term is mapped to the external coding system
//! - `L`: the term is a leaf, it has no children in the subgraph
//! - `I`: the term is intermediate: unmapped, not a leaf and at least
//!   one of its descendants is mapped
//! - `T`: the term is terminal: unmapped and not intermediate
//!
//! `M`, `I` and `T` are mutually exclusive and every term has exactly one
//! of them set. A leaf is never intermediate.

use std::collections::VecDeque;
use std::fmt::Display;

use tracing::debug;

use crate::mapping::classify_mapping;
use crate::{Config, HpoError, HpoResult, HpoTerm, HpoTermId, Ontology};

/// The classification of a term in the subgraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// The term is mapped to the external coding system
    Mapped,
    /// Unmapped, but some descendants are mapped
    Intermediate,
    /// Unmapped and no mapped descendants
    Terminal,
}

/// The annotation of a single term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    mapped: bool,
    leaf: bool,
    intermediate: bool,
    terminal: bool,
    shortest_path_to_root: Vec<HpoTermId>,
}

impl Annotation {
    pub(crate) fn new(
        mapped: bool,
        leaf: bool,
        intermediate: bool,
        terminal: bool,
        shortest_path_to_root: Vec<HpoTermId>,
    ) -> Self {
        Self {
            mapped,
            leaf,
            intermediate,
            terminal,
            shortest_path_to_root,
        }
    }

    /// `M`: the term has a qualifying cross reference
    pub fn mapped(&self) -> bool {
        self.mapped
    }

    /// `L`: the term has no descendants in the subgraph
    pub fn leaf(&self) -> bool {
        self.leaf
    }

    /// `I`: unmapped, not a leaf, and some descendant is mapped
    pub fn intermediate(&self) -> bool {
        self.intermediate
    }

    /// `T`: unmapped and not intermediate
    pub fn terminal(&self) -> bool {
        self.terminal
    }

    /// One of the shortest paths between root and term, ignoring edge direction
    ///
    /// The path starts with the root and ends with the term itself
    pub fn shortest_path_to_root(&self) -> &[HpoTermId] {
        &self.shortest_path_to_root
    }

    /// Returns the [`Category`] of the term
    pub fn category(&self) -> Category {
        if self.mapped {
            Category::Mapped
        } else if self.intermediate {
            Category::Intermediate
        } else {
            Category::Terminal
        }
    }
}

/// Number of terms per flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of terms
    pub terms: usize,
    /// Number of `M` terms
    pub mapped: usize,
    /// Number of `I` terms
    pub intermediate: usize,
    /// Number of `T` terms
    pub terminal: usize,
    /// Number of `L` terms
    pub leaves: usize,
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Terms\t{}\nMapped\t{}\nIntermediate\t{}\nTerminal\t{}\nLeaves\t{}",
            self.terms, self.mapped, self.intermediate, self.terminal, self.leaves
        )
    }
}

/// A subgraph together with the [`Annotation`] of every term
#[derive(Debug, Clone)]
pub struct AnnotatedOntology {
    ontology: Ontology,
    root: HpoTermId,
    // aligned with the arena of `ontology`
    annotations: Vec<Annotation>,
}

impl AnnotatedOntology {
    pub(crate) fn from_parts(
        ontology: Ontology,
        root: HpoTermId,
        annotations: Vec<Annotation>,
    ) -> HpoResult<Self> {
        if annotations.len() != ontology.len() {
            return Err(HpoError::InvalidInput(format!(
                "{} annotations for {} terms",
                annotations.len(),
                ontology.len()
            )));
        }
        if !ontology.contains(root) {
            return Err(HpoError::NotFound(root));
        }
        for (term, annotation) in ontology.hpos().zip(annotations.iter()) {
            check_annotation(&ontology, term, annotation, root)?;
        }
        Ok(Self {
            ontology,
            root,
            annotations,
        })
    }

    /// The annotated subgraph
    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// The root term of the subgraph
    pub fn root(&self) -> HpoTermId {
        self.root
    }

    /// Number of annotated terms
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Returns `true` if there are no annotated terms
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Returns the [`Annotation`] of the term, if the term is part of the subgraph
    pub fn get<I: Into<HpoTermId>>(&self, term_id: I) -> Option<&Annotation> {
        self.ontology
            .index_of(term_id.into())
            .map(|idx| &self.annotations[idx])
    }

    /// Iterates all terms with their [`Annotation`]
    pub fn iter(&self) -> impl Iterator<Item = (HpoTerm<'_>, &Annotation)> {
        self.ontology.hpos().zip(self.annotations.iter())
    }

    /// Counts the terms per flag
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            terms: self.len(),
            ..Default::default()
        };
        for annotation in &self.annotations {
            match annotation.category() {
                Category::Mapped => summary.mapped += 1,
                Category::Intermediate => summary.intermediate += 1,
                Category::Terminal => summary.terminal += 1,
            }
            if annotation.leaf() {
                summary.leaves += 1;
            }
        }
        summary
    }

    /// Returns the subgraph and the annotations
    pub fn into_parts(self) -> (Ontology, Vec<Annotation>) {
        (self.ontology, self.annotations)
    }
}

/// Checks that the flags and the path of a term are consistent
///
/// # Errors
///
/// [`HpoError::InvalidInput`] if not exactly one of `M`, `I`, `T` is set,
/// `L` does not match the children of the term, a leaf is intermediate
/// or the path does not connect the root with the term
fn check_annotation(
    ontology: &Ontology,
    term: HpoTerm,
    annotation: &Annotation,
    root: HpoTermId,
) -> HpoResult<()> {
    let invalid = |reason: &str| {
        Err(HpoError::InvalidInput(format!(
            "invalid annotation of {}: {reason}",
            term.id()
        )))
    };
    let exclusive = [
        annotation.mapped,
        annotation.intermediate,
        annotation.terminal,
    ];
    if exclusive.into_iter().filter(|flag| *flag).count() != 1 {
        return invalid("exactly one of M, I and T must be set");
    }
    if annotation.leaf != term.is_leaf() {
        return invalid("L does not match the children");
    }
    if annotation.leaf && annotation.intermediate {
        return invalid("a leaf can't be intermediate");
    }
    let path = &annotation.shortest_path_to_root;
    if path.first() != Some(&root) || path.last() != Some(&term.id()) {
        return invalid("path must lead from the root to the term");
    }
    for pair in path.windows(2) {
        let connected = ontology.hpo(pair[0]).map_or(false, |a| {
            a.parent_ids().contains(&pair[1]) || a.children_ids().contains(&pair[1])
        });
        if !connected {
            return invalid("path follows a missing connection");
        }
    }
    Ok(())
}

/// Index based adjacency lists of the subgraph
struct Adjacency {
    parents: Vec<Vec<usize>>,
    children: Vec<Vec<usize>>,
}

impl Adjacency {
    fn new(ontology: &Ontology) -> HpoResult<Self> {
        let index = |id: HpoTermId| {
            ontology.index_of(id).ok_or_else(|| {
                HpoError::InvalidInput(format!("connection to {id} outside of the graph"))
            })
        };
        let mut parents = Vec::with_capacity(ontology.len());
        let mut children = Vec::with_capacity(ontology.len());
        for term in ontology.terms() {
            parents.push(term.parents().iter().map(index).collect::<HpoResult<Vec<_>>>()?);
            children.push(term.children().iter().map(index).collect::<HpoResult<Vec<_>>>()?);
        }
        Ok(Self { parents, children })
    }

    /// Returns all term indices ordered so that every term comes after its children
    ///
    /// # Errors
    ///
    /// [`HpoError::InvalidInput`] if the graph contains a cycle
    fn bottom_up_order(&self) -> HpoResult<Vec<usize>> {
        let mut pending: Vec<usize> = self.children.iter().map(Vec::len).collect();
        let mut queue: VecDeque<usize> = (0..pending.len()).filter(|&i| pending[i] == 0).collect();
        let mut order = Vec::with_capacity(pending.len());
        while let Some(idx) = queue.pop_front() {
            order.push(idx);
            for &parent in &self.parents[idx] {
                pending[parent] -= 1;
                if pending[parent] == 0 {
                    queue.push_back(parent);
                }
            }
        }
        if order.len() == pending.len() {
            Ok(order)
        } else {
            Err(HpoError::InvalidInput(format!(
                "graph contains a cycle involving {} terms",
                pending.len() - order.len()
            )))
        }
    }

    /// Breadth-first search from `root`, treating every edge as undirected
    ///
    /// Returns the predecessor of every term on one of its shortest paths
    /// to the root. The root and unreachable terms have no predecessor.
    fn shortest_path_tree(&self, root: usize) -> Vec<Option<usize>> {
        let mut predecessor: Vec<Option<usize>> = vec![None; self.parents.len()];
        let mut visited = vec![false; self.parents.len()];
        let mut queue = VecDeque::from([root]);
        visited[root] = true;
        while let Some(idx) = queue.pop_front() {
            for &next in self.parents[idx].iter().chain(self.children[idx].iter()) {
                if !visited[next] {
                    visited[next] = true;
                    predecessor[next] = Some(idx);
                    queue.push_back(next);
                }
            }
        }
        predecessor
    }
}

/// Annotates every term of the subgraph
///
/// The subgraph is usually created by [`crate::subgraph::extract`] with the
/// same root as `config.root()`.
///
/// # Errors
///
/// - [`HpoError::NotFound`] if the root is not part of the subgraph
/// - [`HpoError::InvalidInput`] if the subgraph contains a cycle or a term
///   that is not connected to the root
///
/// # Examples
///
/// ```
/// use hpo_abnormal::{annotate, Category, Config, Ontology};
///
/// let obo = "[Term]\nid: HP:0000118\nname: Phenotypic abnormality\n\n\
///            [Term]\nid: HP:0000152\nname: Abnormality of head or neck\n\
///            xref: SNOMEDCT_US:118932009\nis_a: HP:0000118\n";
/// let ontology = Ontology::from_obo_str(obo).unwrap();
///
/// let annotated = annotate(ontology, &Config::default()).unwrap();
/// let root = annotated.get(118u32).unwrap();
/// assert_eq!(root.category(), Category::Intermediate);
/// assert!(annotated.get(152u32).unwrap().leaf());
/// ```
pub fn annotate(subgraph: Ontology, config: &Config) -> HpoResult<AnnotatedOntology> {
    let root = config.root();
    let root_idx = subgraph.index_of(root).ok_or(HpoError::NotFound(root))?;
    let adjacency = Adjacency::new(&subgraph)?;
    let order = adjacency.bottom_up_order()?;
    let mapping = classify_mapping(&subgraph, config.xref_prefix());
    let predecessor = adjacency.shortest_path_tree(root_idx);
    let terms = subgraph.terms();

    // first pass: `M`, `L` and the path to the root
    let mut mapped = Vec::with_capacity(terms.len());
    let mut leaf = Vec::with_capacity(terms.len());
    let mut paths = Vec::with_capacity(terms.len());
    for (idx, term) in terms.iter().enumerate() {
        mapped.push(mapping.is_mapped(term.id()));
        leaf.push(adjacency.children[idx].is_empty());
        paths.push(path_to_root(&predecessor, idx, root_idx, &subgraph)?);
    }

    // second pass: `I` and `T`, requires `M` and `L` of all descendants
    let mut mapped_descendant = vec![false; terms.len()];
    for &idx in &order {
        mapped_descendant[idx] = adjacency.children[idx]
            .iter()
            .any(|&child| mapped[child] || mapped_descendant[child]);
    }

    let annotations: Vec<Annotation> = paths
        .into_iter()
        .enumerate()
        .map(|(idx, path)| {
            let intermediate = !mapped[idx] && !leaf[idx] && mapped_descendant[idx];
            let terminal = !mapped[idx] && !intermediate;
            Annotation::new(mapped[idx], leaf[idx], intermediate, terminal, path)
        })
        .collect();

    debug!("Annotated {} terms below {}", annotations.len(), root);
    AnnotatedOntology::from_parts(subgraph, root, annotations)
}

/// Follows the predecessors from `idx` back to the root
fn path_to_root(
    predecessor: &[Option<usize>],
    idx: usize,
    root: usize,
    ontology: &Ontology,
) -> HpoResult<Vec<HpoTermId>> {
    let terms = ontology.terms();
    let mut path = vec![*terms[idx].id()];
    let mut current = idx;
    while current != root {
        let Some(previous) = predecessor[current] else {
            return Err(HpoError::InvalidInput(format!(
                "{} is not connected to the root {}",
                terms[idx].id(),
                terms[root].id()
            )));
        };
        path.push(*terms[previous].id());
        current = previous;
    }
    path.reverse();
    Ok(path)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::term::internal::HpoTermInternal;

    fn term(id: u32, xrefs: &[&str]) -> HpoTermInternal {
        let mut term = HpoTermInternal::new(format!("Term {id}"), id.into());
        *term.xrefs_mut() = xrefs.iter().map(|x| x.to_string()).collect();
        term
    }

    // root (1) <- a (2) <- leaf1 (3)
    // root (1) <- b (4, mapped)
    fn toy_graph() -> Ontology {
        let mut ont = Ontology::default();
        ont.add_term(term(1, &[]));
        ont.add_term(term(2, &["UMLS:C0000002"]));
        ont.add_term(term(3, &[]));
        ont.add_term(term(4, &["SNOMEDCT_US:1234"]));
        ont.add_parent(1u32, 2u32).unwrap();
        ont.add_parent(2u32, 3u32).unwrap();
        ont.add_parent(1u32, 4u32).unwrap();
        ont
    }

    fn config() -> Config {
        Config::default().with_root(1u32)
    }

    #[test]
    fn toy_graph_classification() {
        let annotated = annotate(toy_graph(), &config()).unwrap();

        let b = annotated.get(4u32).unwrap();
        assert!(b.mapped());
        assert!(!b.terminal());
        assert!(b.leaf());

        let leaf1 = annotated.get(3u32).unwrap();
        assert!(leaf1.leaf());
        assert!(!leaf1.mapped());
        assert!(leaf1.terminal());

        let a = annotated.get(2u32).unwrap();
        assert!(!a.leaf());
        assert!(!a.intermediate());
        assert!(a.terminal());

        let root = annotated.get(1u32).unwrap();
        assert!(root.intermediate());
        assert!(!root.terminal());
        assert_eq!(root.category(), Category::Intermediate);
    }

    #[test]
    fn shortest_paths() {
        let annotated = annotate(toy_graph(), &config()).unwrap();
        let ids = |id: u32| -> Vec<u32> {
            annotated
                .get(id)
                .unwrap()
                .shortest_path_to_root()
                .iter()
                .map(HpoTermId::as_u32)
                .collect()
        };
        assert_eq!(ids(1), vec![1]);
        assert_eq!(ids(2), vec![1, 2]);
        assert_eq!(ids(3), vec![1, 2, 3]);
        assert_eq!(ids(4), vec![1, 4]);
    }

    #[test]
    fn undirected_path_is_shorter_than_directed() {
        // 1 <- 2 <- 3 <- 4 <- 5 and 1 <- 6 <- 5
        // 5 has two parents, the shortest path goes via 6
        let mut ont = Ontology::default();
        for id in 1..=6 {
            ont.add_term(term(id, &[]));
        }
        for (parent, child) in [(1u32, 2u32), (2, 3), (3, 4), (4, 5), (1, 6), (6, 5)] {
            ont.add_parent(parent, child).unwrap();
        }
        let annotated = annotate(ont, &config()).unwrap();
        let path: Vec<u32> = annotated
            .get(4u32)
            .unwrap()
            .shortest_path_to_root()
            .iter()
            .map(HpoTermId::as_u32)
            .collect();
        // 1 -> 6 -> 5 -> 4 (undirected) is as short as 1 -> 2 -> 3 -> 4
        assert_eq!(path.len(), 4);
        assert_eq!(path.first(), Some(&1));
        assert_eq!(path.last(), Some(&4));

        let path = annotated.get(5u32).unwrap().shortest_path_to_root();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn mapped_grandchild_makes_intermediate() {
        // 1 <- 2 <- 3 <- 4 (mapped)
        let mut ont = Ontology::default();
        ont.add_term(term(1, &[]));
        ont.add_term(term(2, &[]));
        ont.add_term(term(3, &["SNOMEDCT_US:3"]));
        ont.add_term(term(4, &["SNOMEDCT_US:4"]));
        ont.add_parent(1u32, 2u32).unwrap();
        ont.add_parent(2u32, 3u32).unwrap();
        ont.add_parent(3u32, 4u32).unwrap();

        let annotated = annotate(ont, &config()).unwrap();
        assert_eq!(annotated.get(1u32).unwrap().category(), Category::Intermediate);
        assert_eq!(annotated.get(2u32).unwrap().category(), Category::Intermediate);
        assert_eq!(annotated.get(3u32).unwrap().category(), Category::Mapped);
        assert_eq!(annotated.get(4u32).unwrap().category(), Category::Mapped);
    }

    #[test]
    fn mapped_root() {
        let mut ont = Ontology::default();
        ont.add_term(term(1, &["SNOMEDCT_US:1"]));
        ont.add_term(term(2, &[]));
        ont.add_parent(1u32, 2u32).unwrap();

        let annotated = annotate(ont, &config()).unwrap();
        assert_eq!(annotated.get(1u32).unwrap().category(), Category::Mapped);
        assert_eq!(annotated.get(2u32).unwrap().category(), Category::Terminal);
    }

    #[test]
    fn exactly_one_category_per_term() {
        let annotated = annotate(toy_graph(), &config()).unwrap();
        for (_, annotation) in annotated.iter() {
            let flags = [
                annotation.mapped(),
                annotation.intermediate(),
                annotation.terminal(),
            ];
            assert_eq!(flags.iter().filter(|&&f| f).count(), 1);
            assert!(!(annotation.leaf() && annotation.intermediate()));
        }
    }

    #[test]
    fn summary() {
        let annotated = annotate(toy_graph(), &config()).unwrap();
        assert_eq!(
            annotated.summary(),
            Summary {
                terms: 4,
                mapped: 1,
                intermediate: 1,
                terminal: 2,
                leaves: 2,
            }
        );
    }

    #[test]
    fn missing_root() {
        let res = annotate(toy_graph(), &Config::default().with_root(99u32));
        assert!(matches!(res, Err(HpoError::NotFound(id)) if id == HpoTermId::from(99u32)));
    }

    #[test]
    fn disconnected_term() {
        let mut ont = toy_graph();
        ont.add_term(term(5, &[]));
        assert!(matches!(
            annotate(ont, &config()),
            Err(HpoError::InvalidInput(_))
        ));
    }

    #[test]
    fn cycle() {
        let mut ont = toy_graph();
        // 1 <- 2 <- 3 <- 1
        ont.add_parent(3u32, 1u32).unwrap();
        assert!(matches!(
            annotate(ont, &config()),
            Err(HpoError::InvalidInput(_))
        ));
    }

    #[test]
    fn inconsistent_annotations() {
        // 1 <- 2
        let ontology = || {
            let mut ont = Ontology::default();
            ont.add_term(term(1, &[]));
            ont.add_term(term(2, &[]));
            ont.add_parent(1u32, 2u32).unwrap();
            ont
        };
        let root = Annotation::new(false, false, false, true, vec![1u32.into()]);
        let child = |mapped, leaf, intermediate, terminal, path: Vec<u32>| {
            Annotation::new(
                mapped,
                leaf,
                intermediate,
                terminal,
                path.into_iter().map(HpoTermId::from).collect(),
            )
        };
        let parts = |annotation: Annotation| {
            AnnotatedOntology::from_parts(ontology(), 1u32.into(), vec![root.clone(), annotation])
        };

        assert!(parts(child(false, true, false, true, vec![1, 2])).is_ok());

        for annotation in [
            // M and T
            child(true, true, false, true, vec![1, 2]),
            // none of M, I, T
            child(false, true, false, false, vec![1, 2]),
            // leaf and intermediate
            child(false, true, true, false, vec![1, 2]),
            // not a leaf
            child(false, false, false, true, vec![1, 2]),
            // no path
            child(false, true, false, true, vec![]),
            // path does not start at the root
            child(false, true, false, true, vec![2]),
            // path via a missing term
            child(false, true, false, true, vec![1, 3, 2]),
        ] {
            assert!(matches!(parts(annotation), Err(HpoError::InvalidInput(_))));
        }
    }
}

//! Partition of terms by their cross references to an external coding system

use crate::term::HpoGroup;
use crate::{HpoTermId, Ontology};

/// Returns `true` if any cross reference starts with `prefix`
///
/// The comparison is case-sensitive and does not normalize the references.
///
/// # Examples
///
/// ```
/// use hpo_abnormal::mapping::is_mapped;
///
/// let xrefs = vec!["UMLS:C0266114".to_string(), "SNOMEDCT_US:80281008".to_string()];
/// assert!(is_mapped(&xrefs, "SNOMEDCT"));
/// assert!(!is_mapped(&xrefs, "snomedct"));
/// assert!(!is_mapped::<String>(&[], "SNOMEDCT"));
/// ```
pub fn is_mapped<S: AsRef<str>>(xrefs: &[S], prefix: &str) -> bool {
    xrefs.iter().any(|xref| xref.as_ref().starts_with(prefix))
}

/// The mapped and unmapped terms of an ontology
///
/// Every term of the ontology is part of exactly one of both groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    mapped: HpoGroup,
    unmapped: HpoGroup,
}

impl Mapping {
    /// Terms with at least one qualifying cross reference
    pub fn mapped(&self) -> &HpoGroup {
        &self.mapped
    }

    /// Terms without a qualifying cross reference
    pub fn unmapped(&self) -> &HpoGroup {
        &self.unmapped
    }

    /// Returns `true` if the term is mapped
    pub fn is_mapped(&self, id: &HpoTermId) -> bool {
        self.mapped.contains(id)
    }

    /// Number of classified terms
    pub fn len(&self) -> usize {
        self.mapped.len() + self.unmapped.len()
    }

    /// Returns `true` if no terms were classified
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits all terms of the ontology into mapped and unmapped terms
///
/// A term is mapped if one of its cross references starts with `prefix`.
/// Terms without cross references are unmapped.
pub fn classify_mapping(ontology: &Ontology, prefix: &str) -> Mapping {
    let mut mapping = Mapping::default();
    for term in ontology {
        if is_mapped(term.xrefs(), prefix) {
            mapping.mapped.insert(term.id());
        } else {
            mapping.unmapped.insert(term.id());
        }
    }
    mapping
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::SNOMED_PREFIX;

    fn ontology() -> Ontology {
        let obo = "[Term]\nid: HP:0000118\nname: Phenotypic abnormality\nxref: UMLS:C4021819\n\n\
                   [Term]\nid: HP:0000152\nname: Abnormality of head or neck\n\
                   xref: UMLS:C4021817\nxref: SNOMEDCT_US:118932009\nis_a: HP:0000118\n\n\
                   [Term]\nid: HP:0000234\nname: Abnormality of the head\nis_a: HP:0000152\n\n\
                   [Term]\nid: HP:0000235\nname: Lowercase reference\n\
                   xref: snomedct_us:1234\nis_a: HP:0000152\n\n\
                   [Term]\nid: HP:0000236\nname: Prefix in the middle\n\
                   xref: UMLS:SNOMEDCT\nis_a: HP:0000152\n";
        Ontology::from_obo_str(obo).unwrap()
    }

    #[test]
    fn partition() {
        let ont = ontology();
        let mapping = classify_mapping(&ont, SNOMED_PREFIX);

        let mapped: Vec<u32> = mapping.mapped().iter().map(|id| id.as_u32()).collect();
        let unmapped: Vec<u32> = mapping.unmapped().iter().map(|id| id.as_u32()).collect();
        assert_eq!(mapped, vec![152]);
        assert_eq!(unmapped, vec![118, 234, 235, 236]);
        assert_eq!(mapping.len(), ont.len());
    }

    #[test]
    fn partition_is_disjoint() {
        let ont = ontology();
        let mapping = classify_mapping(&ont, SNOMED_PREFIX);
        for term in &ont {
            assert!(mapping.mapped().contains(&term.id()) ^ mapping.unmapped().contains(&term.id()));
        }
    }

    #[test]
    fn deterministic() {
        let ont = ontology();
        assert_eq!(
            classify_mapping(&ont, SNOMED_PREFIX),
            classify_mapping(&ont, SNOMED_PREFIX)
        );
    }

    #[test]
    fn alternate_prefix() {
        let ont = ontology();
        let mapping = classify_mapping(&ont, "UMLS");
        let mapped: Vec<u32> = mapping.mapped().iter().map(|id| id.as_u32()).collect();
        assert_eq!(mapped, vec![118, 152, 236]);
        assert!(mapping.is_mapped(&118u32.into()));
        assert!(!mapping.is_mapped(&234u32.into()));
    }

    #[test]
    fn empty_ontology() {
        let mapping = classify_mapping(&Ontology::default(), SNOMED_PREFIX);
        assert!(mapping.is_empty());
    }
}

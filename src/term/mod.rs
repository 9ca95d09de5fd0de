//! [`HpoTerm`]s are the nodes of the ontology graph
//!
//! A term is identified by its [`HpoTermId`] and carries its name,
//! its cross references to other coding systems and all other OBO
//! attributes as opaque passthrough data.

mod group;
mod hpoterm;
mod hpotermid;
pub(crate) mod internal;

pub use group::{HpoGroup, Iter};
pub use hpoterm::{HpoTerm, HpoTerms};
pub use hpotermid::HpoTermId;

//! Parsing the HPO master data provided by Jax
//!
//! Only the `hp.obo` file is needed: it provides the terms, their
//! cross references and the `is_a` connections between them.

/// Module to parse `hp.obo` file
pub(crate) mod hp_obo;

use core::fmt::Debug;
use std::fmt::Display;

use crate::{HpoError, HpoResult};

/// The unique identifier of an [`HpoTerm`](crate::HpoTerm)
///
/// Internally the id is stored as `u32` and only formatted as
/// `HP:0012345` for display and serialization.
#[derive(Copy, Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HpoTermId {
    inner: u32,
}

impl HpoTermId {
    /// Constructs a new `HpoTermId` from its numeric part
    ///
    /// # Examples
    ///
    /// ```
    /// use hpo_abnormal::HpoTermId;
    ///
    /// let id = HpoTermId::from_u32(118);
    /// assert_eq!(id.to_string(), "HP:0000118");
    /// ```
    pub const fn from_u32(inner: u32) -> Self {
        Self { inner }
    }

    /// Returns the numeric part of the id
    pub fn as_u32(&self) -> u32 {
        self.inner
    }
}

impl TryFrom<&str> for HpoTermId {
    type Error = HpoError;
    fn try_from(s: &str) -> HpoResult<Self> {
        let Some(number) = s.strip_prefix("HP:") else {
            return Err(HpoError::InvalidInput(format!("invalid HPO term id: {s}")));
        };
        if number.len() != 7 {
            return Err(HpoError::InvalidInput(format!("invalid HPO term id: {s}")));
        }
        Ok(HpoTermId {
            inner: number.parse::<u32>()?,
        })
    }
}

impl From<u32> for HpoTermId {
    fn from(inner: u32) -> Self {
        Self { inner }
    }
}

impl Debug for HpoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HpoTermId({self})")
    }
}

impl Display for HpoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HP:{:07}", self.inner)
    }
}

impl PartialEq<str> for HpoTermId {
    fn eq(&self, other: &str) -> bool {
        HpoTermId::try_from(other).map_or(false, |other| *self == other)
    }
}

impl PartialEq<&str> for HpoTermId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

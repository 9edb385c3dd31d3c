//! Newtype IDs for shapes on a slide.
//!
//! Shape IDs come straight from the deck (PPTX `cNvPr/@id`), so they are only
//! unique within one slide.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identifier of a shape on a slide.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub u64);

impl ShapeId {
    /// Creates a new ShapeId.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShapeId({})", self.0)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ShapeId {
    fn from(id: u64) -> Self {
        ShapeId::new(id)
    }
}

use serde::{Deserialize, Serialize};

use crate::types::RawId;

/// Side tag distinguishing the two entity columns of a relation table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The first (A-side) entity column.
    A,
    /// The second (B-side) entity column.
    B,
}

/// Canonical partition node: a side-tagged raw identifier.
///
/// The tag is part of the key, so `(A, "X")` and `(B, "X")` are distinct
/// nodes even when both serialize to the same literal string downstream.
/// No string-prefix scheme is involved; the namespace lives here and
/// nowhere else.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Which entity column the identifier came from.
    pub side: Side,
    /// The raw identifier value.
    pub id: RawId,
}

impl Node {
    /// Register a raw identifier under a side tag. Pure and total: equal
    /// inputs always produce equal nodes.
    pub fn new(side: Side, id: impl Into<RawId>) -> Self {
        Self {
            side,
            id: id.into(),
        }
    }

    /// Shorthand for an A-side node.
    pub fn a(id: impl Into<RawId>) -> Self {
        Self::new(Side::A, id)
    }

    /// Shorthand for a B-side node.
    pub fn b(id: impl Into<RawId>) -> Self {
        Self::new(Side::B, id)
    }
}

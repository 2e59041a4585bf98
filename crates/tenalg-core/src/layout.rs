//! Storage layout tags
//!
//! A tensor linearizes its elements either with the first axis running
//! fastest (column-major) or the last axis running fastest (row-major).
//! Strides are derived from extents together with one of these tags.

/// Linearization order of a dense tensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Column-major: the first axis runs fastest, `strides[0] == 1`
    #[default]
    FirstOrder,
    /// Row-major: the last axis runs fastest, `strides[rank-1] == 1`
    LastOrder,
}

impl Layout {
    /// Returns true for the column-major ordering
    pub fn is_first_order(self) -> bool {
        matches!(self, Layout::FirstOrder)
    }

    /// Returns true for the row-major ordering
    pub fn is_last_order(self) -> bool {
        matches!(self, Layout::LastOrder)
    }
}

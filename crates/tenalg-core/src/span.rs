//! Index spans for subtensor selection
//!
//! A `Span` selects `first, first+step, ..., last` along one axis, with an
//! inclusive upper bound. Spans are symbolic until resolved against a
//! concrete extent: `Span::END` stands for the last position, and negative
//! offsets count back from the end.
//!
//! # Examples
//!
//! ```
//! use tenalg_core::span::Span;
//!
//! let s = Span::with_step(1, Span::END, 2).resolve(7).unwrap();
//! assert_eq!(s.first(), 1);
//! assert_eq!(s.last(), 5);
//! assert_eq!(s.size(), 3);
//! ```

use crate::error::{Result, TensorError};
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive};

/// Symbolic selection along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    first: isize,
    last: isize,
    step: usize,
}

/// A span resolved against a concrete extent.
///
/// Invariants: `first <= last < extent`, `step >= 1`, and `last` lies on
/// the step grid, so `size == (last - first) / step + 1` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSpan {
    first: usize,
    last: usize,
    step: usize,
    size: usize,
}

impl Span {
    /// Placeholder for the last valid position of an axis
    pub const END: isize = isize::MAX;

    /// Selects every position of the axis
    pub fn all() -> Self {
        Self {
            first: 0,
            last: Self::END,
            step: 1,
        }
    }

    /// Selects the single position `index`
    pub fn at(index: isize) -> Self {
        Self {
            first: index,
            last: index,
            step: 1,
        }
    }

    /// Selects `first..=last` with unit step
    pub fn new(first: isize, last: isize) -> Self {
        Self {
            first,
            last,
            step: 1,
        }
    }

    /// Selects `first, first+step, ...` up to and including `last`
    pub fn with_step(first: isize, last: isize, step: usize) -> Self {
        Self { first, last, step }
    }

    pub fn first(&self) -> isize {
        self.first
    }

    pub fn last(&self) -> isize {
        self.last
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Pins the span to a concrete extent.
    ///
    /// The inclusive bound is snapped down onto the step grid, so
    /// `with_step(0, 6, 2)` over extent 7 keeps 6 while
    /// `with_step(0, 5, 2)` snaps to 4.
    ///
    /// # Errors
    ///
    /// Fails on a zero step, an out-of-range bound, or `first > last`
    /// after placeholders are substituted.
    pub fn resolve(&self, extent: usize) -> Result<ResolvedSpan> {
        if self.step == 0 {
            return Err(TensorError::invalid_shape(
                vec![extent],
                "span step must be positive",
            ));
        }
        if extent == 0 {
            return Err(TensorError::out_of_bounds("span extent", 0, 0));
        }
        let first = Self::position(self.first, extent)?;
        let last = Self::position(self.last, extent)?;
        if first > last {
            return Err(TensorError::invalid_shape(
                vec![extent],
                format!("span first {} exceeds last {}", first, last),
            ));
        }
        let last = last - (last - first) % self.step;
        let size = (last - first) / self.step + 1;
        Ok(ResolvedSpan {
            first,
            last,
            step: self.step,
            size,
        })
    }

    fn position(value: isize, extent: usize) -> Result<usize> {
        let resolved = if value == Self::END {
            extent as isize - 1
        } else if value < 0 {
            extent as isize + value
        } else {
            value
        };
        if resolved < 0 || resolved as usize >= extent {
            return Err(TensorError::out_of_bounds(
                "span bound",
                resolved.unsigned_abs(),
                extent,
            ));
        }
        Ok(resolved as usize)
    }
}

impl ResolvedSpan {
    pub fn first(&self) -> usize {
        self.first
    }

    pub fn last(&self) -> usize {
        self.last
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Number of selected positions
    pub fn size(&self) -> usize {
        self.size
    }

    /// Maps a relative position within this span back to an axis position
    pub fn position(&self, i: usize) -> usize {
        self.first + i * self.step
    }

    /// Composes a span expressed relative to this one.
    ///
    /// Selecting with `inner` on an axis already restricted by `self`
    /// yields the same positions as selecting with the composite directly.
    ///
    /// # Errors
    ///
    /// Fails if `inner` does not fit within this span's size.
    pub fn compose(&self, inner: &Span) -> Result<ResolvedSpan> {
        let inner = inner.resolve(self.size)?;
        Ok(ResolvedSpan {
            first: self.first + inner.first * self.step,
            last: self.first + inner.last * self.step,
            step: self.step * inner.step,
            size: inner.size,
        })
    }
}

impl From<usize> for Span {
    fn from(i: usize) -> Self {
        Span::at(i as isize)
    }
}

impl From<isize> for Span {
    fn from(i: isize) -> Self {
        Span::at(i)
    }
}

impl From<RangeFull> for Span {
    fn from(_: RangeFull) -> Self {
        Span::all()
    }
}

impl From<Range<usize>> for Span {
    fn from(r: Range<usize>) -> Self {
        // half-open to inclusive
        Span::new(r.start as isize, r.end as isize - 1)
    }
}

impl From<RangeInclusive<usize>> for Span {
    fn from(r: RangeInclusive<usize>) -> Self {
        Span::new(*r.start() as isize, *r.end() as isize)
    }
}

impl From<RangeFrom<usize>> for Span {
    fn from(r: RangeFrom<usize>) -> Self {
        Span::new(r.start as isize, Span::END)
    }
}

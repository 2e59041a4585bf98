//! Element-wise comparison predicates
//!
//! Equality and ordering treat shape mismatch differently: `==` answers
//! false for differently shaped operands (and `!=` answers true), while
//! the ordering predicates refuse to compare them and report the mismatch
//! as an error.

use crate::error::{Result, TensorError};
use crate::expression::Expression;
use crate::extents::{extents_equal, Extents};
use crate::storage::Storage;
use crate::subtensor::Subtensor;
use crate::tensor::TensorBase;

fn compare_all<L, R, F>(lhs: &L, rhs: &R, context: &str, pred: F) -> Result<bool>
where
    L: Expression,
    R: Expression<Elem = L::Elem>,
    F: Fn(&L::Elem, &L::Elem) -> bool,
{
    let count = match (lhs.extents(), rhs.extents()) {
        (Some(le), Some(re)) => {
            if le != re {
                return Err(TensorError::shape_mismatch(context, le.dims(), re.dims()));
            }
            le.product()
        }
        (Some(e), None) | (None, Some(e)) => e.product(),
        // two scalars still have one element to compare
        (None, None) => 1,
    };
    Ok((0..count).all(|i| pred(&lhs.at(i), &rhs.at(i))))
}

/// Whether every element pair satisfies `lhs < rhs`.
///
/// # Errors
///
/// Fails with `ShapeMismatch` when both operands are shaped and disagree.
pub fn less<L, R>(lhs: &L, rhs: &R) -> Result<bool>
where
    L: Expression,
    R: Expression<Elem = L::Elem>,
    L::Elem: PartialOrd,
{
    compare_all(lhs, rhs, "less", |a, b| a < b)
}

/// Whether every element pair satisfies `lhs <= rhs`
pub fn less_equal<L, R>(lhs: &L, rhs: &R) -> Result<bool>
where
    L: Expression,
    R: Expression<Elem = L::Elem>,
    L::Elem: PartialOrd,
{
    compare_all(lhs, rhs, "less_equal", |a, b| a <= b)
}

/// Whether every element pair satisfies `lhs > rhs`
pub fn greater<L, R>(lhs: &L, rhs: &R) -> Result<bool>
where
    L: Expression,
    R: Expression<Elem = L::Elem>,
    L::Elem: PartialOrd,
{
    compare_all(lhs, rhs, "greater", |a, b| a > b)
}

/// Whether every element pair satisfies `lhs >= rhs`
pub fn greater_equal<L, R>(lhs: &L, rhs: &R) -> Result<bool>
where
    L: Expression,
    R: Expression<Elem = L::Elem>,
    L::Elem: PartialOrd,
{
    compare_all(lhs, rhs, "greater_equal", |a, b| a >= b)
}

/// Element-wise equality of two expressions; false on shape mismatch
pub fn equal<L, R>(lhs: &L, rhs: &R) -> bool
where
    L: Expression,
    R: Expression<Elem = L::Elem>,
    L::Elem: PartialEq,
{
    if let (Some(le), Some(re)) = (lhs.extents(), rhs.extents()) {
        if le != re {
            return false;
        }
    }
    match compare_all(lhs, rhs, "equal", |a, b| a == b) {
        Ok(answer) => answer,
        Err(_) => false,
    }
}

impl<T, E1, S1, E2, S2> PartialEq<TensorBase<T, E2, S2>> for TensorBase<T, E1, S1>
where
    T: Clone + PartialEq,
    E1: Extents,
    S1: Storage<T>,
    E2: Extents,
    S2: Storage<T>,
{
    fn eq(&self, other: &TensorBase<T, E2, S2>) -> bool {
        extents_equal(self.extents(), other.extents()) && self.data() == other.data()
    }
}

impl<'a, T, E, S> PartialEq<TensorBase<T, E, S>> for Subtensor<'a, T>
where
    T: Clone + PartialEq,
    E: Extents,
    S: Storage<T>,
{
    fn eq(&self, other: &TensorBase<T, E, S>) -> bool {
        extents_equal(self.extents(), other.extents())
            && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<'a, 'b, T> PartialEq<Subtensor<'b, T>> for Subtensor<'a, T>
where
    T: Clone + PartialEq,
{
    fn eq(&self, other: &Subtensor<'b, T>) -> bool {
        extents_equal(self.extents(), other.extents())
            && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

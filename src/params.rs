//! Parameter-space helpers.
//!
//! The runner takes a flat sequence of parameter tuples and does not care
//! how it was produced; `grid` covers the common case of sweeping the full
//! Cartesian product of per-parameter value lists.

use crate::value::Value;

/// Expand per-parameter axes into the full Cartesian product.
///
/// Tuples come out in row-major order: the last axis varies fastest. One
/// tuple per combination, one entry per axis. Zero axes yield a single
/// empty tuple; any empty axis yields an empty product.
///
/// # Example
///
/// ```rust
/// use sweeprun::{grid, Value};
///
/// let tuples = grid(&[
///     vec![Value::Int(1), Value::Int(2)],
///     vec![Value::Int(10), Value::Int(20)],
/// ]);
/// assert_eq!(tuples.len(), 4);
/// assert_eq!(tuples[0], vec![Value::Int(1), Value::Int(10)]);
/// assert_eq!(tuples[1], vec![Value::Int(1), Value::Int(20)]);
/// ```
#[must_use]
pub fn grid(axes: &[Vec<Value>]) -> Vec<Vec<Value>> {
    let mut tuples = vec![Vec::with_capacity(axes.len())];
    for axis in axes {
        let mut expanded = Vec::with_capacity(tuples.len() * axis.len());
        for tuple in &tuples {
            for value in axis {
                let mut next = tuple.clone();
                next.push(value.clone());
                expanded.push(next);
            }
        }
        tuples = expanded;
    }
    tuples
}

//! Result record: the per-experiment output bag.
//!
//! A fresh `Record` is handed to the experiment function for every parameter
//! tuple. The function sets arbitrarily-named fields on it; after the call
//! returns, the runner sets one field per declared parameter name so the
//! inputs are always recoverable from the output table. The record is then
//! merged into the accumulator and discarded.

use crate::value::Value;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One experiment's named outputs, in the order they were first set.
///
/// Reading a field that was never set is an error, not a silent default —
/// a typo in a field name fails at the point of access.
///
/// # Example
///
/// ```rust
/// use sweeprun::Record;
///
/// let mut record = Record::new();
/// record.set("loss", 0.03);
/// assert_eq!(record.get("loss")?.as_f64(), Some(0.03));
/// assert!(record.get("accuracy").is_err());
/// # Ok::<(), sweeprun::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a named field.
    ///
    /// Setting an existing name replaces its value in place, keeping the
    /// field's original position. The runner relies on this when it injects
    /// parameter fields after the experiment call.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Read a previously set field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if no field with this name was set.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| Error::MissingField(name.to_string()))
    }

    /// Iterate over `(name, value)` pairs in the order fields were set.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Consume the record, yielding owned `(name, value)` pairs in order.
    pub fn into_fields(self) -> impl Iterator<Item = (String, Value)> {
        self.fields.into_iter()
    }

    /// Number of fields set so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field has been set yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

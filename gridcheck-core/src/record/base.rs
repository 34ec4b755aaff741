//! Base implementation of records for tracing.
//!
//! A record is a bag of named values emitted once per checked step.
use crate::error::RecordError;
use std::{collections::HashMap, convert::Into};

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value.
    Scalar(f32),

    /// A counter, such as a step index.
    Integer(u64),

    /// A 1-dimensional array of floating-point values.
    Array1(Vec<f32>),

    /// A text value.
    String(String),
}

/// A container for storing key-value pairs of various data types.
///
/// # Examples
///
/// ```rust
/// use gridcheck_core::record::{Record, RecordValue};
///
/// let mut record = Record::from_scalar("done", 0.0);
/// record.insert("step", RecordValue::Integer(3));
/// record.insert("reward", RecordValue::Array1(vec![1.0]));
///
/// assert_eq!(record.get_integer("step").unwrap(), 3);
/// assert_eq!(record.get_array1("reward").unwrap(), vec![1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a key-value pair into the record.
    ///
    /// An existing value for the key is replaced.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Gets a scalar value from the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not exist or the value is not a scalar.
    pub fn get_scalar(&self, k: &str) -> Result<f32, RecordError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(RecordError::RecordValueTypeError("Scalar".to_string())),
            None => Err(RecordError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a counter from the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not exist or the value is not an integer.
    pub fn get_integer(&self, k: &str) -> Result<u64, RecordError> {
        match self.0.get(k) {
            Some(RecordValue::Integer(v)) => Ok(*v),
            Some(_) => Err(RecordError::RecordValueTypeError("Integer".to_string())),
            None => Err(RecordError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 1-dimensional array from the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not exist or the value is not an array.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, RecordError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(RecordError::RecordValueTypeError("Array1".to_string())),
            None => Err(RecordError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a string value from the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not exist or the value is not a string.
    pub fn get_string(&self, k: &str) -> Result<String, RecordError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(RecordError::RecordValueTypeError("String".to_string())),
            None => Err(RecordError::RecordKeyError(k.to_string())),
        }
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_with_wrong_type() {
        let record = Record::from_slice(&[
            ("step", RecordValue::Scalar(1.0)),
            ("hash", RecordValue::String("0x01".to_string())),
        ]);
        assert!(matches!(
            record.get_scalar("hash"),
            Err(RecordError::RecordValueTypeError(_))
        ));
        assert!(matches!(
            record.get_string("episode"),
            Err(RecordError::RecordKeyError(k)) if k == "episode"
        ));
        assert_eq!(record.get_string("hash").unwrap(), "0x01");
    }

    #[test]
    fn test_integer_keeps_large_counters() {
        let step = (1u64 << 24) + 1;
        let record = Record::from_slice(&[("step", RecordValue::Integer(step))]);
        assert_eq!(record.get_integer("step").unwrap(), step);
        assert!(matches!(
            record.get_scalar("step"),
            Err(RecordError::RecordValueTypeError(_))
        ));
    }
}

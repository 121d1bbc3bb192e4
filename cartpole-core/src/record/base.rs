//! Records of rollouts.
use crate::error::CoreError;
use chrono::prelude::{DateTime, Local};
use std::collections::{
    hash_map::{Iter, Keys},
    HashMap,
};

/// A value in a [`Record`].
#[derive(Debug, Clone)]
pub enum RecordValue {
    /// Metrics like returns, event statistics or KPIs.
    Scalar(f32),

    /// A timestamp with local timezone.
    DateTime(DateTime<Local>),

    /// A text value.
    String(String),
}

impl RecordValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "Scalar",
            Self::DateTime(_) => "DateTime",
            Self::String(_) => "String",
        }
    }
}

/// Named values produced by environments and rollouts.
///
/// # Examples
///
/// ```rust
/// use cartpole_core::record::{Record, RecordValue};
///
/// let mut record = Record::from_scalar("episode_return", 21.0);
/// record.insert("policy", RecordValue::String("heuristic".to_string()));
///
/// assert_eq!(record.get_scalar("episode_return").unwrap(), 21.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        let mut record = Self::empty();
        record.insert(name, RecordValue::Scalar(value));
        record
    }

    /// Creates a record from key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Keys of the record in arbitrary order.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a value, replacing the value under the same key.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Key-value pairs in arbitrary order.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// The value under the key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Moves all values of `record` into this record.
    ///
    /// Values of `record` win on shared keys.
    pub fn merge_inplace(&mut self, record: Record) {
        self.0.extend(record.0);
    }

    fn get_as<T, F>(&self, k: &str, expected: &str, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(&RecordValue) -> Option<T>,
    {
        let v = self
            .0
            .get(k)
            .ok_or_else(|| CoreError::RecordKeyError(k.to_string()))?;
        f(v).ok_or_else(|| {
            CoreError::RecordValueTypeError(format!(
                "{:?} holds {}, not {}",
                k,
                v.type_name(),
                expected
            ))
        })
    }

    /// The scalar under the key.
    ///
    /// # Errors
    ///
    /// Fails if the key does not exist or the value is not a scalar.
    pub fn get_scalar(&self, k: &str) -> Result<f32, CoreError> {
        self.get_as(k, "Scalar", |v| match v {
            RecordValue::Scalar(v) => Some(*v),
            _ => None,
        })
    }

    /// The string under the key.
    pub fn get_string(&self, k: &str) -> Result<String, CoreError> {
        self.get_as(k, "String", |v| match v {
            RecordValue::String(s) => Some(s.clone()),
            _ => None,
        })
    }

    /// Returns `true` if the record has no value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of values in the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites() {
        let mut a = Record::from_slice(&[
            ("x", RecordValue::Scalar(1.0)),
            ("y", RecordValue::Scalar(2.0)),
        ]);
        a.merge_inplace(Record::from_scalar("y", 3.0));
        assert_eq!(a.len(), 2);
        assert_eq!(a.get_scalar("x").unwrap(), 1.0);
        assert_eq!(a.get_scalar("y").unwrap(), 3.0);
    }

    #[test]
    fn test_get_errors() {
        let mut record = Record::empty();
        record.insert("name", RecordValue::String("cartpole".to_string()));
        record.insert("time", RecordValue::DateTime(Local::now()));
        assert!(matches!(
            record.get_scalar("missing"),
            Err(CoreError::RecordKeyError(_))
        ));
        assert!(matches!(
            record.get_scalar("name"),
            Err(CoreError::RecordValueTypeError(_))
        ));
        assert!(record.get_string("time").is_err());
        assert_eq!(record.get_string("name").unwrap(), "cartpole");
    }
}

//! # Sort Specification
//!
//! `sort=name,-createdAt` sorts by name ascending, then by creation time
//! descending. With no `sort` parameter results come newest first.

use std::cmp::Ordering;

use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::filter::parse_timestamp;

/// Field records are ordered by when no `sort` is given
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

/// One sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

/// Ordered list of sort keys; earlier keys take precedence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub keys: Vec<SortKey>,
}

impl Default for SortSpec {
    /// Most recent first
    fn default() -> Self {
        Self {
            keys: vec![SortKey::descending(DEFAULT_SORT_FIELD)],
        }
    }
}

impl SortSpec {
    /// Parse a comma-separated field list; a leading `-` means descending.
    /// Empty segments are skipped; an all-empty list falls back to the default.
    pub fn parse(value: &str) -> ApiResult<Self> {
        let mut keys = Vec::new();

        for part in value.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let key = match part.strip_prefix('-') {
                Some(field) => SortKey::descending(field),
                None => SortKey::ascending(part.strip_prefix('+').unwrap_or(part)),
            };

            if key.field.is_empty() {
                return Err(ApiError::MalformedInput(format!(
                    "Invalid sort field: {}",
                    part
                )));
            }
            keys.push(key);
        }

        if keys.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self { keys })
    }

    /// Reject keys on fields outside `known`
    pub fn check_fields(&self, known: &[&str]) -> ApiResult<()> {
        match self.keys.iter().find(|k| !known.contains(&k.field.as_str())) {
            Some(key) => Err(ApiError::MalformedInput(format!(
                "Unknown sort field: {}",
                key.field
            ))),
            None => Ok(()),
        }
    }

    /// Compare two documents by these keys
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for key in &self.keys {
            let ord = compare_values(
                a.get(&key.field).unwrap_or(&Value::Null),
                b.get(&key.field).unwrap_or(&Value::Null),
            );
            let ord = if key.descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    /// Sort documents in place. Stable, so ties keep insertion order.
    pub fn sort(&self, docs: &mut [Value]) {
        docs.sort_by(|a, b| self.compare(a, b));
    }
}

/// Total order over stored values: missing/null first, then booleans,
/// numbers, strings. Strings that are both timestamps compare as time.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(0.0);
            let b = b.as_f64().unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => match (parse_timestamp(a), parse_timestamp(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => a.cmp(b),
        },
        _ => rank(a).cmp(&rank(b)),
    }
}

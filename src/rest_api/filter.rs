//! # Filter Criteria
//!
//! Filter clauses produced from query parameters, their rendering as a
//! storage filter document (`{"age": {"$gt": 30}}`), and their evaluation
//! against stored documents.
//!
//! Clause values keep the text the client sent. They are cast against the
//! stored value's type at match time, so `contact=0800` still matches the
//! string `"0800"` while `age[gt]=30` compares numerically.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult};

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equals (a bare `field=value` parameter)
    Eq,

    /// Greater than
    Gt,

    /// Greater than or equal
    Gte,

    /// Less than
    Lt,

    /// Less than or equal
    Lte,

    /// Value in list
    In,
}

impl FilterOperator {
    /// Map a bare query token (`gt`, `gte`, `lt`, `lte`, `in`) to its operator
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "gt" => Some(FilterOperator::Gt),
            "gte" => Some(FilterOperator::Gte),
            "lt" => Some(FilterOperator::Lt),
            "lte" => Some(FilterOperator::Lte),
            "in" => Some(FilterOperator::In),
            _ => None,
        }
    }

    /// The storage engine's operator marker
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "$eq",
            FilterOperator::Gt => "$gt",
            FilterOperator::Gte => "$gte",
            FilterOperator::Lt => "$lt",
            FilterOperator::Lte => "$lte",
            FilterOperator::In => "$in",
        }
    }
}

/// The value side of a clause, as sent by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Scalar(String),
    List(Vec<String>),
}

impl FilterValue {
    /// Render with numbers, booleans and null recognised
    pub fn to_json(&self) -> Value {
        match self {
            FilterValue::Scalar(raw) => coerce(raw),
            FilterValue::List(items) => Value::Array(items.iter().map(|s| coerce(s)).collect()),
        }
    }

    fn items(&self) -> &[String] {
        match self {
            FilterValue::Scalar(raw) => std::slice::from_ref(raw),
            FilterValue::List(items) => items,
        }
    }
}

/// A single filter clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpr {
    /// Field to filter on
    pub field: String,

    /// Comparison operator
    pub operator: FilterOperator,

    /// Value to compare against
    pub value: FilterValue,
}

impl FilterExpr {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Create an equality clause
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Eq, FilterValue::Scalar(value.into()))
    }

    /// Create a greater than clause
    pub fn gt(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Gt, FilterValue::Scalar(value.into()))
    }

    /// Create an "in list" clause
    pub fn in_list(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(field, FilterOperator::In, FilterValue::List(values))
    }

    /// Check if a document matches this clause
    pub fn matches(&self, doc: &Value) -> bool {
        let field_value = doc.get(&self.field).unwrap_or(&Value::Null);

        match self.operator {
            FilterOperator::Eq | FilterOperator::In => self
                .value
                .items()
                .iter()
                .any(|raw| compare_to_raw(field_value, raw) == Some(Ordering::Equal)),
            FilterOperator::Gt => self.compare(field_value, |o| o == Ordering::Greater),
            FilterOperator::Gte => self.compare(field_value, |o| o != Ordering::Less),
            FilterOperator::Lt => self.compare(field_value, |o| o == Ordering::Less),
            FilterOperator::Lte => self.compare(field_value, |o| o != Ordering::Greater),
        }
    }

    fn compare(&self, field_value: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
        self.value
            .items()
            .first()
            .and_then(|raw| compare_to_raw(field_value, raw))
            .map(accept)
            .unwrap_or(false)
    }
}

/// Filter criteria: clauses combined with AND logic
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub clauses: Vec<FilterExpr>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, clause: FilterExpr) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Check if a document matches all clauses
    pub fn matches(&self, doc: &Value) -> bool {
        self.clauses.iter().all(|c| c.matches(doc))
    }

    /// Reject clauses on fields outside `known`
    pub fn check_fields(&self, known: &[&str]) -> ApiResult<()> {
        match self
            .clauses
            .iter()
            .find(|c| !known.contains(&c.field.as_str()))
        {
            Some(clause) => Err(ApiError::MalformedInput(format!(
                "Unknown filter field: {}",
                clause.field
            ))),
            None => Ok(()),
        }
    }

    /// Render as a storage filter document.
    ///
    /// Equality on a field with no other operator renders as the bare value;
    /// otherwise every operator nests under the field.
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();

        for clause in &self.clauses {
            let bare_eq = clause.operator == FilterOperator::Eq
                && self
                    .clauses
                    .iter()
                    .filter(|c| c.field == clause.field)
                    .count()
                    == 1;

            if bare_eq {
                doc.insert(clause.field.clone(), clause.value.to_json());
                continue;
            }

            let entry = doc
                .entry(clause.field.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(ops) = entry {
                ops.insert(clause.operator.as_str().to_string(), clause.value.to_json());
            }
        }

        Value::Object(doc)
    }
}

/// Parse a raw value: integers, floats, booleans and null are recognised,
/// anything else stays a string
fn coerce(value: &str) -> Value {
    if value == "null" {
        return Value::Null;
    }

    if value == "true" {
        return Value::Bool(true);
    }
    if value == "false" {
        return Value::Bool(false);
    }

    if let Ok(n) = value.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = value.parse::<f64>() {
        if let Some(num) = serde_json::Number::from_f64(n) {
            return Value::Number(num);
        }
    }

    Value::String(value.to_string())
}

/// Compare a stored value against raw client text, casting the text to the
/// stored value's type. `None` when the two cannot be compared.
fn compare_to_raw(stored: &Value, raw: &str) -> Option<Ordering> {
    match stored {
        Value::Null => (raw == "null").then_some(Ordering::Equal),
        Value::Bool(b) => raw.parse::<bool>().ok().map(|r| b.cmp(&r)),
        Value::Number(n) => {
            let stored = n.as_f64()?;
            let wanted = raw.parse::<f64>().ok()?;
            stored.partial_cmp(&wanted)
        }
        Value::String(s) => match (parse_timestamp(s), parse_timestamp(raw)) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => Some(s.as_str().cmp(raw)),
        },
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC)
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

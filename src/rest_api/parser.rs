//! # Query Parameter Parser
//!
//! Translates list query parameters into filter criteria, projection, sort
//! and page. Two stages:
//!
//! 1. The control keys `select`, `sort`, `page` and `limit` are pulled out.
//! 2. Every other key is a filter clause: `field=value` for equality, or
//!    `field[op]=value` with `op` one of `gt`, `gte`, `lt`, `lte`, `in`.
//!
//! Parsing knows nothing about executives; `check_fields` validates the
//! result against a caller-supplied field set.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult};
use super::filter::{Filter, FilterExpr, FilterOperator, FilterValue};
use super::pagination::{PageRequest, DEFAULT_LIMIT};
use super::sort::SortSpec;

/// Parameter keys that never become filter clauses
pub const RESERVED_KEYS: [&str; 4] = ["select", "sort", "page", "limit"];

/// Field always included in a projection
pub const ID_FIELD: &str = "id";

/// Parsed list query
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: Filter,

    /// Fields to return (None = all)
    pub projection: Option<Projection>,

    pub sort: SortSpec,

    pub page: PageRequest,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            projection: None,
            sort: SortSpec::default(),
            page: PageRequest::default(),
        }
    }
}

impl ListQuery {
    /// Parse query parameters with the built-in default page size
    pub fn parse(params: &HashMap<String, String>) -> ApiResult<Self> {
        Self::parse_with_limit(params, DEFAULT_LIMIT)
    }

    /// Parse query parameters, using `default_limit` when `limit` is absent
    pub fn parse_with_limit(
        params: &HashMap<String, String>,
        default_limit: u64,
    ) -> ApiResult<Self> {
        let mut query = ListQuery {
            page: PageRequest::parse(
                params.get("page").map(String::as_str),
                params.get("limit").map(String::as_str),
                default_limit,
            ),
            ..Default::default()
        };

        if let Some(select) = params.get("select") {
            query.projection = Projection::parse(select);
        }
        if let Some(sort) = params.get("sort") {
            query.sort = SortSpec::parse(sort)?;
        }

        let mut clauses = Vec::new();
        for (key, value) in params {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            clauses.push(parse_clause(key, value)?);
        }
        // HashMap order is arbitrary; keep the parsed form deterministic.
        clauses.sort_by(|a, b| {
            (a.field.as_str(), a.operator.as_str()).cmp(&(b.field.as_str(), b.operator.as_str()))
        });
        query.filter = Filter { clauses };

        Ok(query)
    }

    /// Reject filter, sort and projection fields outside `known`
    pub fn check_fields(&self, known: &[&str]) -> ApiResult<()> {
        self.filter.check_fields(known)?;
        self.sort.check_fields(known)?;
        if let Some(projection) = &self.projection {
            projection.check_fields(known)?;
        }
        Ok(())
    }
}

/// Parse one filter parameter
fn parse_clause(key: &str, value: &str) -> ApiResult<FilterExpr> {
    let (field, operator) = split_operator(key)?;

    if field.is_empty() {
        return Err(ApiError::MalformedInput(format!(
            "Invalid filter parameter: {}",
            key
        )));
    }

    let value = match operator {
        FilterOperator::In => FilterValue::List(
            value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        _ => FilterValue::Scalar(value.to_string()),
    };

    Ok(FilterExpr::new(field, operator, value))
}

/// Split `field[op]` into field and operator; a bare key is equality
fn split_operator(key: &str) -> ApiResult<(&str, FilterOperator)> {
    let Some(open) = key.find('[') else {
        return Ok((key, FilterOperator::Eq));
    };

    let token = key[open + 1..].strip_suffix(']').ok_or_else(|| {
        ApiError::MalformedInput(format!("Invalid filter parameter: {}", key))
    })?;

    let operator = FilterOperator::from_token(token).ok_or_else(|| {
        ApiError::MalformedInput(format!("Unsupported filter operator: {}", token))
    })?;

    Ok((&key[..open], operator))
}

/// Subset of fields to return
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<String>,
}

impl Projection {
    /// Parse a comma-separated field list. `id` is always included.
    /// Returns `None` for an empty list.
    pub fn parse(value: &str) -> Option<Self> {
        let mut fields: Vec<String> = value
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if fields.is_empty() {
            return None;
        }

        if !fields.iter().any(|f| f == ID_FIELD) {
            fields.insert(0, ID_FIELD.to_string());
        }
        fields.dedup();

        Some(Self { fields })
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn check_fields(&self, known: &[&str]) -> ApiResult<()> {
        match self.fields.iter().find(|f| !known.contains(&f.as_str())) {
            Some(field) => Err(ApiError::MalformedInput(format!(
                "Unknown select field: {}",
                field
            ))),
            None => Ok(()),
        }
    }

    /// Keep only projected fields of a document
    pub fn apply(&self, doc: Value) -> Value {
        match doc {
            Value::Object(obj) => {
                let filtered: Map<String, Value> = obj
                    .into_iter()
                    .filter(|(k, _)| self.fields.contains(k))
                    .collect();
                Value::Object(filtered)
            }
            other => other,
        }
    }
}

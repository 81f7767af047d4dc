//! Executive record types
//!
//! `Executive` is the stored record. `ExecutiveFields` is what a client sends
//! on create and update; it is untrusted until it passes the validator.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Every field name a record can carry, in serialized form.
///
/// Filter, sort and projection clauses must name one of these.
pub const EXECUTIVE_FIELDS: &[&str] = &[
    "id",
    "title",
    "name",
    "portfolio",
    "email",
    "contact",
    "createdAt",
];

/// Honorific attached to an executive's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Title {
    Architect,
    Dr,
    Engineer,
    Honourable,
    Mr,
    Mrs,
    Prince,
    Princess,
    Professor,
}

impl Title {
    /// All accepted titles, in declaration order
    pub const ALL: [Title; 9] = [
        Title::Architect,
        Title::Dr,
        Title::Engineer,
        Title::Honourable,
        Title::Mr,
        Title::Mrs,
        Title::Prince,
        Title::Princess,
        Title::Professor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Title::Architect => "Architect",
            Title::Dr => "Dr",
            Title::Engineer => "Engineer",
            Title::Honourable => "Honourable",
            Title::Mr => "Mr",
            Title::Mrs => "Mrs",
            Title::Prince => "Prince",
            Title::Princess => "Princess",
            Title::Professor => "Professor",
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Title {
    type Err = ();

    /// Matching is exact; `dr` is not `Dr`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Title::ALL
            .iter()
            .copied()
            .find(|title| title.as_str() == s)
            .ok_or(())
    }
}

/// A stored executive record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Executive {
    /// Assigned by the store on creation
    pub id: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,

    pub name: String,

    pub portfolio: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    /// Assigned by the store on creation, never updated
    pub created_at: DateTime<Utc>,
}

impl Executive {
    /// Serialize into the JSON document form filters and projections work on
    pub fn to_document(&self) -> Value {
        // Serializing plain strings, a uuid and a timestamp cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Client-supplied fields for create and update.
///
/// Each field is `None` when absent from the body and `Some(None)` when
/// explicitly `null`, so updates can tell "leave alone" from "clear".
/// Unknown keys, `id` and `createdAt` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExecutiveFields {
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable_string")]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable_string")]
    pub portfolio: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable_string")]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable_string")]
    pub contact: Option<Option<String>>,
}

/// Accept strings, and numbers/booleans cast to strings; reject containers.
fn nullable_string<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Some(None)),
        Value::String(s) => Ok(Some(Some(s))),
        Value::Number(n) => Ok(Some(Some(n.to_string()))),
        Value::Bool(b) => Ok(Some(Some(b.to_string()))),
        Value::Array(_) => Err(de::Error::custom("expected a string, found an array")),
        Value::Object(_) => Err(de::Error::custom("expected a string, found an object")),
    }
}

/// A validated record waiting for the store to assign `id` and `createdAt`
#[derive(Debug, Clone, PartialEq)]
pub struct NewExecutive {
    pub title: Option<Title>,
    pub name: String,
    pub portfolio: String,
    pub email: Option<String>,
    pub contact: Option<String>,
}

impl NewExecutive {
    /// Stamp identity and creation time onto the record
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> Executive {
        Executive {
            id,
            title: self.title,
            name: self.name,
            portfolio: self.portfolio,
            email: self.email,
            contact: self.contact,
            created_at,
        }
    }
}

/// A validated partial update.
///
/// Required fields can only be replaced; optional fields can also be cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutivePatch {
    pub title: Option<Option<Title>>,
    pub name: Option<String>,
    pub portfolio: Option<String>,
    pub email: Option<Option<String>>,
    pub contact: Option<Option<String>>,
}

impl ExecutivePatch {
    /// Replace the fields this patch carries, leaving the rest untouched
    pub fn apply(&self, record: &mut Executive) {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(portfolio) = &self.portfolio {
            record.portfolio = portfolio.clone();
        }
        if let Some(email) = &self.email {
            record.email = email.clone();
        }
        if let Some(contact) = &self.contact {
            record.contact = contact.clone();
        }
    }
}

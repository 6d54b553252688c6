//! The `Book` value object and its key-value representation

use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::{RecordError, RecordResult};

/// Status of a book that is on the shelf
pub const STATUS_AVAILABLE: &str = "available";

/// Status of a book that has been lent out
pub const STATUS_CHECKED_OUT: &str = "checked-out";

/// One book in the library.
///
/// Field order here is the key order written to the store file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    /// Unique identifier, assigned by the library
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Publication year
    pub year: i64,
    /// `STATUS_AVAILABLE` or `STATUS_CHECKED_OUT` by convention; not enforced
    pub status: String,
}

impl Book {
    /// Creates a book with the default `available` status.
    pub fn new(id: i64, title: impl Into<String>, author: impl Into<String>, year: i64) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            status: STATUS_AVAILABLE.to_string(),
        }
    }

    /// Returns the key-value representation of this book.
    pub fn to_representation(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), Value::from(self.id));
        map.insert("title".into(), Value::from(self.title.clone()));
        map.insert("author".into(), Value::from(self.author.clone()));
        map.insert("year".into(), Value::from(self.year));
        map.insert("status".into(), Value::from(self.status.clone()));
        map
    }

    /// Builds a book from its key-value representation.
    ///
    /// All five keys must be present with the right JSON kind. Integers
    /// must be exact: `2000.0` or `"2000"` is not a year. Unknown keys are
    /// ignored.
    pub fn from_representation(map: &Map<String, Value>) -> RecordResult<Self> {
        Ok(Self {
            id: int_field(map, "id")?,
            title: str_field(map, "title")?,
            author: str_field(map, "author")?,
            year: int_field(map, "year")?,
            status: str_field(map, "status")?,
        })
    }

    /// Builds a book from a raw JSON value, which must be an object.
    pub fn from_value(value: &Value) -> RecordResult<Self> {
        match value {
            Value::Object(map) => Self::from_representation(map),
            other => Err(RecordError::NotAnObject(json_kind(other))),
        }
    }
}

fn int_field(map: &Map<String, Value>, field: &'static str) -> RecordResult<i64> {
    let value = map.get(field).ok_or(RecordError::MissingField(field))?;
    value.as_i64().ok_or(RecordError::TypeMismatch {
        field,
        expected: "integer",
        actual: json_kind(value),
    })
}

fn str_field(map: &Map<String, Value>, field: &'static str) -> RecordResult<String> {
    let value = map.get(field).ok_or(RecordError::MissingField(field))?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or(RecordError::TypeMismatch {
            field,
            expected: "string",
            actual: json_kind(value),
        })
}

/// Names the JSON kind of a value for error messages
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(n) if n.is_u64() => "integer out of range",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

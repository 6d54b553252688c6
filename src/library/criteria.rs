//! Search criteria
//!
//! Filters books strictly by field equality.
//! No type coercion, no substring or case-insensitive matching.

use std::fmt;

use serde_json::{Map, Value};

use crate::record::Book;

use super::errors::{LibraryError, LibraryResult};

/// The closed set of searchable book fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Title,
    Author,
    Year,
    Status,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Id,
        Field::Title,
        Field::Author,
        Field::Year,
        Field::Status,
    ];

    /// Resolves a field name; unknown names are `InvalidCriteria`.
    pub fn parse(name: &str) -> LibraryResult<Field> {
        match name {
            "id" => Ok(Field::Id),
            "title" => Ok(Field::Title),
            "author" => Ok(Field::Author),
            "year" => Ok(Field::Year),
            "status" => Ok(Field::Status),
            other => Err(LibraryError::invalid_criteria(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Title => "title",
            Field::Author => "author",
            Field::Year => "year",
            Field::Status => "status",
        }
    }

    /// Integer-valued fields
    pub fn is_integer(&self) -> bool {
        matches!(self, Field::Id | Field::Year)
    }

    /// Converts user-typed text into a criterion value for this field.
    ///
    /// Integer fields must parse as integers; text fields are taken as-is.
    pub fn value_from_text(&self, text: &str) -> LibraryResult<Value> {
        if self.is_integer() {
            text.trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| {
                    LibraryError::invalid_criteria_value(
                        self.as_str(),
                        format!("'{}' is not an integer", text),
                    )
                })
        } else {
            Ok(Value::from(text))
        }
    }

    /// Exact equality between this field of `book` and `expected`
    pub fn matches(&self, book: &Book, expected: &Value) -> bool {
        match self {
            Field::Id => expected.as_i64() == Some(book.id),
            Field::Year => expected.as_i64() == Some(book.year),
            Field::Title => expected.as_str() == Some(book.title.as_str()),
            Field::Author => expected.as_str() == Some(book.author.as_str()),
            Field::Status => expected.as_str() == Some(book.status.as_str()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A conjunction of field/value equality terms.
///
/// An empty criteria matches every book.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    terms: Vec<(Field, Value)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term
    pub fn with(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.terms.push((field, value.into()));
        self
    }

    /// Builds criteria from a field-name → value mapping.
    ///
    /// Every key must name a searchable field.
    pub fn from_map(map: &Map<String, Value>) -> LibraryResult<Self> {
        let terms = map
            .iter()
            .map(|(name, value)| Ok((Field::parse(name)?, value.clone())))
            .collect::<LibraryResult<Vec<_>>>()?;
        Ok(Self { terms })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn terms(&self) -> &[(Field, Value)] {
        &self.terms
    }

    /// Checks if a book satisfies all terms (AND semantics)
    pub fn matches(&self, book: &Book) -> bool {
        self.terms
            .iter()
            .all(|(field, expected)| field.matches(book, expected))
    }
}

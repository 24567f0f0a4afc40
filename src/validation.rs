//! Schema-driven payload validation.
//!
//! Each entity module declares an explicit validator over a raw JSON payload
//! (see the per-module `schema` files). The helpers here collect every
//! violation across every field in one pass instead of failing on the first,
//! and produce the exact client-facing messages of the API contract.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{Map, Value};
use stacks_http::error::FieldErrors;

pub const MISSING_FIELD: &str = "Missing data for required field.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const NOT_AN_INTEGER: &str = "Not a valid integer.";
pub const NOT_A_DATE: &str = "Not a valid date.";
pub const MAY_NOT_BE_NULL: &str = "Field may not be null.";
pub const UNKNOWN_FIELD: &str = "Unknown field.";
pub const INVALID_INPUT: &str = "Invalid input type.";

/// Message for a violated string length bound.
pub fn length_message(min: usize, max: usize) -> String {
    format!("Length must be between {min} and {max}.")
}

/// Collected validation failures: field name to ordered messages.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Violations {
    fields: BTreeMap<String, Vec<String>>,
}

impl Violations {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for one field, if any.
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn into_field_errors(self) -> FieldErrors {
        self.fields
    }
}

/// Read-side view of a JSON object payload.
#[derive(Debug)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// Accept only JSON objects; anything else is a schema-level failure.
    pub fn parse(payload: &'a Value) -> Result<Self, Violations> {
        match payload.as_object() {
            Some(map) => Ok(Self { map }),
            None => {
                let mut violations = Violations::default();
                violations.add("_schema", INVALID_INPUT);
                Err(violations)
            }
        }
    }

    /// Record a violation for every field not in `known`.
    ///
    /// `id` appears in every entity's known list: the schemas declare it as
    /// loadable, so clients may send it, but validators never consume it.
    pub fn reject_unknown(&self, known: &[&str], violations: &mut Violations) {
        for field in self.map.keys() {
            if !known.contains(&field.as_str()) {
                violations.add(field, UNKNOWN_FIELD);
            }
        }
    }

    pub fn required_str(&self, name: &str, violations: &mut Violations) -> Option<String> {
        match self.map.get(name) {
            None => {
                violations.add(name, MISSING_FIELD);
                None
            }
            Some(value) => self.parse_str(name, value, violations),
        }
    }

    pub fn optional_str(&self, name: &str, violations: &mut Violations) -> Option<String> {
        self.map
            .get(name)
            .and_then(|value| self.parse_str(name, value, violations))
    }

    pub fn required_i64(&self, name: &str, violations: &mut Violations) -> Option<i64> {
        match self.map.get(name) {
            None => {
                violations.add(name, MISSING_FIELD);
                None
            }
            Some(Value::Null) => {
                violations.add(name, MAY_NOT_BE_NULL);
                None
            }
            Some(value) => match value.as_i64() {
                Some(number) => Some(number),
                None => {
                    violations.add(name, NOT_AN_INTEGER);
                    None
                }
            },
        }
    }

    pub fn required_date(&self, name: &str, violations: &mut Violations) -> Option<NaiveDate> {
        match self.map.get(name) {
            None => {
                violations.add(name, MISSING_FIELD);
                None
            }
            Some(value) => self.parse_date(name, value, violations),
        }
    }

    pub fn optional_date(&self, name: &str, violations: &mut Violations) -> Option<NaiveDate> {
        self.map
            .get(name)
            .and_then(|value| self.parse_date(name, value, violations))
    }

    fn parse_str(&self, name: &str, value: &Value, violations: &mut Violations) -> Option<String> {
        match value {
            Value::Null => {
                violations.add(name, MAY_NOT_BE_NULL);
                None
            }
            Value::String(s) => Some(s.clone()),
            _ => {
                violations.add(name, NOT_A_STRING);
                None
            }
        }
    }

    fn parse_date(
        &self,
        name: &str,
        value: &Value,
        violations: &mut Violations,
    ) -> Option<NaiveDate> {
        match value {
            Value::Null => {
                violations.add(name, MAY_NOT_BE_NULL);
                None
            }
            Value::String(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    violations.add(name, NOT_A_DATE);
                    None
                }
            },
            _ => {
                violations.add(name, NOT_A_DATE);
                None
            }
        }
    }
}

/// Enforce a string length bound, recording the violation on failure.
pub fn bounded(
    value: String,
    field: &str,
    min: usize,
    max: usize,
    violations: &mut Violations,
) -> Option<String> {
    let length = value.chars().count();
    if length < min || length > max {
        violations.add(field, length_message(min, max));
        None
    } else {
        Some(value)
    }
}

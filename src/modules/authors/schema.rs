//! Write schema for author payloads.

use serde_json::Value;

use super::models::AuthorData;
use crate::validation::{Fields, Violations};

const KNOWN_FIELDS: &[&str] = &["id", "first_name", "last_name", "birth_date", "biography"];

/// Validate an author payload, collecting every violation.
pub fn validate_author(payload: &Value) -> Result<AuthorData, Violations> {
    let fields = Fields::parse(payload)?;
    let mut violations = Violations::default();

    fields.reject_unknown(KNOWN_FIELDS, &mut violations);
    let first_name = fields.required_str("first_name", &mut violations);
    let last_name = fields.required_str("last_name", &mut violations);
    let birth_date = fields.optional_date("birth_date", &mut violations);
    let biography = fields.optional_str("biography", &mut violations);

    match (first_name, last_name) {
        (Some(first_name), Some(last_name)) if violations.is_empty() => Ok(AuthorData {
            first_name,
            last_name,
            birth_date,
            biography,
        }),
        _ => Err(violations),
    }
}

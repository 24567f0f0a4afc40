//! Write schema for credential payloads, shared by signup and login.

use serde_json::Value;

use super::models::UserData;
use crate::validation::{bounded, Fields, Violations};

const KNOWN_FIELDS: &[&str] = &["id", "username", "password"];

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 15;
const PASSWORD_MIN: usize = 10;
const PASSWORD_MAX: usize = 50;

/// Validate a credentials payload, collecting every violation.
///
/// Login reuses this schema, so the length constraints apply there too.
pub fn validate_user(payload: &Value) -> Result<UserData, Violations> {
    let fields = Fields::parse(payload)?;
    let mut violations = Violations::default();

    fields.reject_unknown(KNOWN_FIELDS, &mut violations);
    let username = fields
        .required_str("username", &mut violations)
        .and_then(|name| bounded(name, "username", USERNAME_MIN, USERNAME_MAX, &mut violations));
    let password = fields
        .required_str("password", &mut violations)
        .and_then(|pw| bounded(pw, "password", PASSWORD_MIN, PASSWORD_MAX, &mut violations));

    match (username, password) {
        (Some(username), Some(password)) if violations.is_empty() => {
            Ok(UserData { username, password })
        }
        _ => Err(violations),
    }
}

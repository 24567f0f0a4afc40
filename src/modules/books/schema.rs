//! Write schema for book payloads.
//!
//! Unlike the purely syntactic author/user schemas, the `author_id` check
//! reads through a repository handle, so validating a book can observe the
//! current set of authors.

use serde_json::Value;

use super::models::BookData;
use crate::modules::authors::repository::AuthorRepo;
use crate::validation::{bounded, Fields, Violations};

const KNOWN_FIELDS: &[&str] = &["id", "title", "isbn", "publication_date", "author_id"];

const ISBN_MIN: usize = 10;
const ISBN_MAX: usize = 13;

/// Validate a book payload, collecting every violation.
///
/// The outer `Result` is a repository fault during the author existence
/// check; the inner one is the validation outcome.
pub async fn validate_book(
    payload: &Value,
    authors: &AuthorRepo,
) -> anyhow::Result<Result<BookData, Violations>> {
    let fields = match Fields::parse(payload) {
        Ok(fields) => fields,
        Err(violations) => return Ok(Err(violations)),
    };
    let mut violations = Violations::default();

    fields.reject_unknown(KNOWN_FIELDS, &mut violations);
    let title = fields.required_str("title", &mut violations);
    let isbn = fields
        .required_str("isbn", &mut violations)
        .and_then(|isbn| bounded(isbn, "isbn", ISBN_MIN, ISBN_MAX, &mut violations));
    let publication_date = fields.required_date("publication_date", &mut violations);
    let author_id = fields.required_i64("author_id", &mut violations);

    if let Some(id) = author_id {
        if !authors.exists(id).await? {
            violations.add("author_id", format!("Author id {id} does not exist."));
        }
    }

    match (title, isbn, publication_date, author_id) {
        (Some(title), Some(isbn), Some(publication_date), Some(author_id))
            if violations.is_empty() =>
        {
            Ok(Ok(BookData {
                title,
                isbn,
                publication_date,
                author_id,
            }))
        }
        _ => Ok(Err(violations)),
    }
}

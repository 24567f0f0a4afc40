use sqlx::FromRow;

/// Persisted user. `password` holds the bcrypt hash, never plaintext, and
/// the row is never serialized into a response.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// Normalized credentials payload produced by validation. `password` is
/// still plaintext here; it is hashed before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct UserData {
    pub username: String,
    pub password: String,
}

//! Authentication primitives: signed access tokens, password hashing, and
//! the axum extractor that gates protected routes.

pub mod extract;
pub mod password;
pub mod token;

pub use extract::AuthUser;
pub use token::{AuthError, TokenService};

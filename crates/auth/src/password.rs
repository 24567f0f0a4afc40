//! Password hashing. Stored credentials are bcrypt hashes, never plaintext.

use anyhow::Context;

/// Hash a plaintext password for storage.
pub fn hash(password: &str) -> anyhow::Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).context("failed to hash password")
}

/// Check a plaintext password against a stored hash.
///
/// A malformed stored hash compares as a mismatch rather than an error, so
/// login keeps its single "bad username or password" failure mode.
pub fn verify(password: &str, hashed: &str) -> bool {
    bcrypt::verify(password, hashed).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hashed = hash("aaabbbcccddd").unwrap();
        assert_ne!(hashed, "aaabbbcccddd");
        assert!(verify("aaabbbcccddd", &hashed));
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hashed = hash("aaabbbcccddd").unwrap();
        assert!(!verify("aaabbbcccddd11", &hashed));
    }

    #[test]
    fn malformed_hash_compares_as_mismatch() {
        assert!(!verify("whatever", "not-a-bcrypt-hash"));
    }
}

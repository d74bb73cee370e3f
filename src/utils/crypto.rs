use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Unsalted SHA-256 digest, hex encoded. The same secret always maps to the
/// same stored value, which is what password lookup relies on.
pub fn hash_secret(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

pub fn secrets_match(provided: &str, expected: &str) -> bool {
    ConstantTimeEq::ct_eq(provided.as_bytes(), expected.as_bytes()).into()
}

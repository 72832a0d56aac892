use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored value is not a PHC hash string.
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

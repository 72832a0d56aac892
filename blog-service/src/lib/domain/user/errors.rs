use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for display name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be between {min} and {max} characters")]
    InvalidLength { min: usize, max: usize },

    #[error("Password may only contain letters and digits")]
    InvalidCharacters,

    #[error("Password must contain at least one digit, one lowercase and one uppercase letter")]
    MissingCharacterClass,
}

/// Malformed request input
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Password confirmation does not match")]
    PasswordConfirmationMismatch,
}

/// Which registration fields collided with an existing user
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ConflictKind {
    #[error("Username & Email address already registered , please choose another username and email!")]
    UsernameAndEmail,

    #[error("Email already exists , please choose another email!")]
    Email,

    #[error("Username already exists , please choose another username!")]
    Username,
}

/// Which half of a login was rejected.
///
/// The two messages differ and therefore reveal whether a username exists.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CredentialFailure {
    #[error("Invalid Username")]
    Username,

    #[error("Invalid Password")]
    Password,
}

/// Top-level error for all session operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Conflict(ConflictKind),

    #[error("{0}")]
    InvalidCredentials(CredentialFailure),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("User not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Store failure: {0}")]
    StoreFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserIdError> for SessionError {
    fn from(err: UserIdError) -> Self {
        SessionError::InvalidToken(err.to_string())
    }
}

impl From<UsernameError> for SessionError {
    fn from(err: UsernameError) -> Self {
        SessionError::Validation(err.into())
    }
}

impl From<NameError> for SessionError {
    fn from(err: NameError) -> Self {
        SessionError::Validation(err.into())
    }
}

impl From<EmailError> for SessionError {
    fn from(err: EmailError) -> Self {
        SessionError::Validation(err.into())
    }
}

impl From<JwtError> for SessionError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => SessionError::ExpiredToken,
            JwtError::InvalidToken(reason) => SessionError::InvalidToken(reason),
            JwtError::EncodingFailed(_) | JwtError::SharedSecret => {
                SessionError::Internal(err.to_string())
            }
        }
    }
}

impl From<PasswordError> for SessionError {
    fn from(err: PasswordError) -> Self {
        SessionError::Internal(err.to_string())
    }
}

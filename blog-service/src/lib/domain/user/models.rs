use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Identity fields are fixed at registration; there is no update path.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub name: Name,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Project the user onto the fields handlers are allowed to see.
    pub fn identity(&self) -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Between 5 and 30 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 5;
    const MAX_LENGTH: usize = 30;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 5 characters
    /// * `TooLong` - Username longer than 30 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(username))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type (1 to 30 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    const MAX_LENGTH: usize = 30;

    pub fn new(name: String) -> Result<Self, NameError> {
        let length = name.chars().count();
        if name.trim().is_empty() {
            Err(NameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password that satisfies the account password policy.
///
/// 8 to 30 ASCII letters and digits, with at least one digit, one
/// lowercase and one uppercase letter. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 30;

    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(PasswordPolicyError::InvalidLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }

        if !password.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PasswordPolicyError::InvalidCharacters);
        }

        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        if !(has_digit && has_lower && has_upper) {
            return Err(PasswordPolicyError::MissingCharacterClass);
        }

        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub name: Name,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `name` - Validated display name
    /// * `email` - Validated email address
    /// * `password` - Policy-checked plaintext password (hashed by the service)
    pub fn new(username: Username, name: Name, email: EmailAddress, password: Password) -> Self {
        Self {
            username,
            name,
            email,
            password,
        }
    }
}

/// Command to log an existing user in
#[derive(Debug)]
pub struct LoginCommand {
    pub username: Username,
    pub password: Password,
}

impl LoginCommand {
    pub fn new(username: Username, password: Password) -> Self {
        Self { username, password }
    }
}

/// Minimal projection of a user exposed to downstream handlers.
///
/// Never carries the password hash or any token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub id: UserId,
    pub username: Username,
    pub name: Name,
}

/// Freshly issued access/refresh token pair
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .finish()
    }
}

/// Outcome of register, login and refresh
#[derive(Debug, Clone)]
pub struct Session {
    pub identity: AuthenticatedIdentity,
    pub tokens: TokenPair,
}

/// The single live refresh token held for a user
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub user_id: UserId,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Token pair as found on an inbound request; either half may be missing.
#[derive(Debug, Clone, Default)]
pub struct RequestCredentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Token lifetimes used when issuing a pair
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            access_ttl: Duration::minutes(30),
            refresh_ttl: Duration::minutes(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_bounds() {
        assert_eq!(
            Username::new("abcd".to_string()),
            Err(UsernameError::TooShort { min: 5, actual: 4 })
        );
        assert!(Username::new("abcde".to_string()).is_ok());
        assert!(Username::new("a".repeat(30)).is_ok());
        assert_eq!(
            Username::new("a".repeat(31)),
            Err(UsernameError::TooLong {
                max: 30,
                actual: 31
            })
        );
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(Name::new("   ".to_string()), Err(NameError::Empty));
        assert!(Name::new("Alice".to_string()).is_ok());
        assert!(matches!(
            Name::new("n".repeat(31)),
            Err(NameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("alice@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(Password::new("Passw0rd".to_string()).is_ok());
        assert_eq!(
            Password::new("Pa0".to_string()),
            Err(PasswordPolicyError::InvalidLength { min: 8, max: 30 })
        );
        assert_eq!(
            Password::new("Passw0rd!".to_string()),
            Err(PasswordPolicyError::InvalidCharacters)
        );
        assert_eq!(
            Password::new("password1".to_string()),
            Err(PasswordPolicyError::MissingCharacterClass)
        );
        assert_eq!(
            Password::new("PASSWORD1".to_string()),
            Err(PasswordPolicyError::MissingCharacterClass)
        );
        assert_eq!(
            Password::new("Passwordd".to_string()),
            Err(PasswordPolicyError::MissingCharacterClass)
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("Passw0rd".to_string()).unwrap();
        assert_eq!(format!("{:?}", password), "Password(***)");
    }

    #[test]
    fn test_identity_projection() {
        let user = User {
            id: UserId::new(),
            username: Username::new("alice01".to_string()).unwrap(),
            name: Name::new("Alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        };

        let identity = user.identity();
        assert_eq!(identity.id, user.id);
        assert_eq!(identity.username.as_str(), "alice01");
        assert_eq!(identity.name.as_str(), "Alice");
    }
}

//! Authentication utilities library
//!
//! Provides the session security primitives used by the blog service:
//! - Password hashing (Argon2id)
//! - JWT encoding and validation
//! - Dual-secret access/refresh token issuing
//!
//! The service defines its own ports and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Passw0rd").unwrap();
//! let is_valid = hasher.verify("Passw0rd", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access and Refresh Tokens
//! ```
//! use auth::TokenService;
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(
//!     b"access_secret_key_at_least_32_bytes!",
//!     b"refresh_secret_key_at_least_32_bytes",
//! )
//! .unwrap();
//!
//! let access = tokens.sign_access("user123", Duration::minutes(30)).unwrap();
//! assert_eq!(tokens.verify_access(&access).unwrap(), "user123");
//!
//! // A token of one class never verifies as the other.
//! assert!(tokens.verify_refresh(&access).is_err());
//! ```

pub mod jwt;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenService;

use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Issues and verifies the two classes of session tokens.
///
/// Access and refresh tokens are signed with distinct secrets, so leaking
/// one secret cannot be used to forge the other class. Verification is
/// purely cryptographic; whether a refresh token is still the live one for
/// its subject is decided by the caller's token store.
pub struct TokenService {
    access: JwtHandler,
    refresh: JwtHandler,
}

impl TokenService {
    /// Create a token service from the two signing secrets.
    ///
    /// # Arguments
    /// * `access_secret` - Secret used for short-lived access tokens
    /// * `refresh_secret` - Secret used for long-lived refresh tokens
    ///
    /// # Errors
    /// * `SharedSecret` - Both secrets are identical
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Result<Self, JwtError> {
        if access_secret == refresh_secret {
            return Err(JwtError::SharedSecret);
        }

        Ok(Self {
            access: JwtHandler::new(access_secret),
            refresh: JwtHandler::new(refresh_secret),
        })
    }

    /// Sign an access token for `subject` valid for `ttl`.
    pub fn sign_access(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        self.access.encode(&Claims::for_subject(subject, ttl))
    }

    /// Sign a refresh token for `subject` valid for `ttl`.
    pub fn sign_refresh(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        self.refresh.encode(&Claims::for_subject(subject, ttl))
    }

    /// Verify an access token and return its subject.
    ///
    /// # Errors
    /// * `TokenExpired` - Valid signature, expiry elapsed
    /// * `InvalidToken` - Bad signature or malformed token
    pub fn verify_access(&self, token: &str) -> Result<String, JwtError> {
        self.access.decode(token).map(|claims| claims.sub)
    }

    /// Verify a refresh token and return its subject.
    ///
    /// # Errors
    /// * `TokenExpired` - Valid signature, expiry elapsed
    /// * `InvalidToken` - Bad signature or malformed token
    pub fn verify_refresh(&self, token: &str) -> Result<String, JwtError> {
        self.refresh.decode(token).map(|claims| claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS_SECRET: &[u8] = b"access_secret_key_at_least_32_bytes!";
    const REFRESH_SECRET: &[u8] = b"refresh_secret_key_at_least_32_bytes";

    fn token_service() -> TokenService {
        TokenService::new(ACCESS_SECRET, REFRESH_SECRET).expect("Failed to build token service")
    }

    #[test]
    fn test_rejects_shared_secret() {
        let result = TokenService::new(ACCESS_SECRET, ACCESS_SECRET);
        assert!(matches!(result, Err(JwtError::SharedSecret)));
    }

    #[test]
    fn test_access_round_trip() {
        let tokens = token_service();

        let token = tokens
            .sign_access("user123", Duration::minutes(30))
            .expect("Failed to sign access token");

        assert_eq!(tokens.verify_access(&token), Ok("user123".to_string()));
    }

    #[test]
    fn test_refresh_round_trip() {
        let tokens = token_service();

        let token = tokens
            .sign_refresh("user123", Duration::minutes(60))
            .expect("Failed to sign refresh token");

        assert_eq!(tokens.verify_refresh(&token), Ok("user123".to_string()));
    }

    #[test]
    fn test_token_classes_do_not_cross_verify() {
        let tokens = token_service();

        let access = tokens
            .sign_access("user123", Duration::minutes(30))
            .expect("Failed to sign access token");
        let refresh = tokens
            .sign_refresh("user123", Duration::minutes(60))
            .expect("Failed to sign refresh token");

        assert!(matches!(
            tokens.verify_refresh(&access),
            Err(JwtError::InvalidToken(_))
        ));
        assert!(matches!(
            tokens.verify_access(&refresh),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_is_distinguishable_from_invalid() {
        let tokens = token_service();

        let expired = tokens
            .sign_access("user123", Duration::minutes(-1))
            .expect("Failed to sign access token");

        assert_eq!(tokens.verify_access(&expired), Err(JwtError::TokenExpired));
        assert!(matches!(
            tokens.verify_access("not-a-token"),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_consecutive_refresh_tokens_differ() {
        let tokens = token_service();

        let first = tokens
            .sign_refresh("user123", Duration::minutes(60))
            .expect("Failed to sign refresh token");
        let second = tokens
            .sign_refresh("user123", Duration::minutes(60))
            .expect("Failed to sign refresh token");

        assert_ne!(first, second);
    }
}

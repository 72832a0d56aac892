use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Session token claims.
///
/// Tokens stay small on purpose: everything else about the subject is
/// looked up by id on the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,
}

impl Claims {
    /// Create claims for a subject expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `subject` - Unique subject identifier
    /// * `ttl` - Lifetime of the token (may be negative, yielding an already expired token)
    ///
    /// # Returns
    /// Claims with sub, iat, exp and a fresh jti
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("user123", Duration::minutes(30));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_each_claims_gets_unique_jti() {
        let first = Claims::for_subject("user123", Duration::minutes(30));
        let second = Claims::for_subject("user123", Duration::minutes(30));

        assert_ne!(first.jti, second.jti);
    }
}

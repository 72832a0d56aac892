use async_trait::async_trait;

use crate::domain::user::models::AuthenticatedIdentity;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::RequestCredentials;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::SessionError;
use crate::user::models::EmailAddress;
use crate::user::models::Username;

/// Port for session lifecycle operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Register a new user and open a session for them.
    ///
    /// # Arguments
    /// * `command` - Validated username, name, email and password
    ///
    /// # Returns
    /// Identity of the new user with a fresh token pair
    ///
    /// # Errors
    /// * `Conflict` - Username and/or email already registered
    /// * `StoreFailure` - Persistence failed
    async fn register(&self, command: RegisterCommand) -> Result<Session, SessionError>;

    /// Check credentials and open a session, replacing any previous one.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `StoreFailure` - Persistence failed
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Drop the refresh record holding `refresh_token`.
    ///
    /// Succeeds when no record matches. Access tokens stay valid until they expire.
    ///
    /// # Errors
    /// * `StoreFailure` - Persistence failed
    async fn logout(&self, refresh_token: &str) -> Result<(), SessionError>;

    /// Exchange the live refresh token for a new pair, rotating the stored token.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired, rotated or revoked
    /// * `NotFound` - User no longer exists
    /// * `StoreFailure` - Persistence failed
    async fn refresh(&self, refresh_token: &str) -> Result<Session, SessionError>;

    /// Resolve the credentials of an inbound request to an identity.
    ///
    /// Both tokens must be present; only the access token is verified.
    /// An expired access token is rejected, never refreshed.
    ///
    /// # Errors
    /// * `Unauthorized` - A token is missing or the user no longer exists
    /// * `InvalidToken` - Access token signature or format is bad
    /// * `ExpiredToken` - Access token has expired
    /// * `StoreFailure` - Persistence failed
    async fn authenticate(
        &self,
        credentials: &RequestCredentials,
    ) -> Result<AuthenticatedIdentity, SessionError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Check whether a user with this username exists.
    ///
    /// # Errors
    /// * `StoreFailure` - Database operation failed
    async fn exists_by_username(&self, username: &Username) -> Result<bool, SessionError>;

    /// Check whether a user with this email exists.
    ///
    /// # Errors
    /// * `StoreFailure` - Database operation failed
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, SessionError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StoreFailure` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, SessionError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `StoreFailure` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, SessionError>;

    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `Conflict` - Username or email taken concurrently
    /// * `StoreFailure` - Database operation failed
    async fn create(&self, user: User) -> Result<User, SessionError>;
}

/// Persistence of the one live refresh token per user.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Store `token` as the live refresh token for `user_id`, replacing any previous one.
    ///
    /// # Errors
    /// * `StoreFailure` - Database operation failed
    async fn upsert(&self, user_id: &UserId, token: &str) -> Result<(), SessionError>;

    /// True iff the record for `user_id` holds exactly `token`.
    ///
    /// # Errors
    /// * `StoreFailure` - Database operation failed
    async fn find_live(&self, user_id: &UserId, token: &str) -> Result<bool, SessionError>;

    /// Remove the record holding `token`. Absence is not an error.
    ///
    /// # Errors
    /// * `StoreFailure` - Database operation failed
    async fn delete_by_token(&self, token: &str) -> Result<(), SessionError>;
}

use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenService;
use chrono::Utc;

use crate::domain::user::models::AuthenticatedIdentity;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::RequestCredentials;
use crate::domain::user::models::Session;
use crate::domain::user::models::SessionSettings;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::ConflictKind;
use crate::user::errors::CredentialFailure;
use crate::user::errors::SessionError;
use crate::user::ports::RefreshTokenRepository;
use crate::user::ports::SessionServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for session operations.
///
/// Sole writer of refresh-token records. Concurrent logins or refreshes for
/// the same user race on the upsert and the last write wins; the token
/// returned to the losing caller fails its next refresh.
pub struct SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    users: Arc<UR>,
    refresh_tokens: Arc<TR>,
    token_service: Arc<TokenService>,
    password_hasher: PasswordHasher,
    settings: SessionSettings,
}

impl<UR, TR> SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `refresh_tokens` - Refresh-token persistence implementation
    /// * `token_service` - Access/refresh token signer
    /// * `settings` - Token lifetimes
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: Arc<TR>,
        token_service: Arc<TokenService>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            token_service,
            password_hasher: PasswordHasher::new(),
            settings,
        }
    }

    async fn hash_password(&self, password: &Password) -> Result<String, SessionError> {
        let hasher = self.password_hasher;
        let password = password.expose().to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| SessionError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(SessionError::from)
    }

    async fn verify_password(
        &self,
        password: &Password,
        password_hash: String,
    ) -> Result<bool, SessionError> {
        let hasher = self.password_hasher;
        let password = password.expose().to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|e| {
                SessionError::Internal(format!("Password verification task failed: {}", e))
            })?
            .map_err(SessionError::from)
    }

    /// Sign a new pair for `user_id` and make its refresh token the live one.
    async fn issue_tokens(&self, user_id: &UserId) -> Result<TokenPair, SessionError> {
        let subject = user_id.to_string();
        let tokens = TokenPair {
            access_token: self
                .token_service
                .sign_access(&subject, self.settings.access_ttl)?,
            refresh_token: self
                .token_service
                .sign_refresh(&subject, self.settings.refresh_ttl)?,
        };

        self.refresh_tokens
            .upsert(user_id, &tokens.refresh_token)
            .await?;

        Ok(tokens)
    }
}

#[async_trait]
impl<UR, TR> SessionServicePort for SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Session, SessionError> {
        let username_taken = self.users.exists_by_username(&command.username).await?;
        let email_taken = self.users.exists_by_email(&command.email).await?;

        let conflict = match (username_taken, email_taken) {
            (true, true) => Some(ConflictKind::UsernameAndEmail),
            (false, true) => Some(ConflictKind::Email),
            (true, false) => Some(ConflictKind::Username),
            (false, false) => None,
        };
        if let Some(kind) = conflict {
            tracing::info!(username = %command.username, conflict = ?kind, "Registration rejected");
            return Err(SessionError::Conflict(kind));
        }

        let password_hash = self.hash_password(&command.password).await?;

        let user = self
            .users
            .create(User {
                id: UserId::new(),
                username: command.username,
                name: command.name,
                email: command.email,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        let tokens = self.issue_tokens(&user.id).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(Session {
            identity: user.identity(),
            tokens,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let Some(user) = self.users.find_by_username(&command.username).await? else {
            // Unknown usernames still pay for one hash comparison.
            self.verify_password(&command.password, String::new())
                .await?;
            tracing::info!(username = %command.username, "Login rejected: unknown username");
            return Err(SessionError::InvalidCredentials(CredentialFailure::Username));
        };

        if !self
            .verify_password(&command.password, user.password_hash.clone())
            .await?
        {
            tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(SessionError::InvalidCredentials(CredentialFailure::Password));
        }

        let tokens = self.issue_tokens(&user.id).await?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            identity: user.identity(),
            tokens,
        })
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), SessionError> {
        self.refresh_tokens.delete_by_token(refresh_token).await?;
        tracing::info!("Session closed");
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, SessionError> {
        let subject = self
            .token_service
            .verify_refresh(refresh_token)
            .map_err(|e| {
                tracing::info!(error = %e, "Refresh rejected: token did not verify");
                SessionError::Unauthorized
            })?;
        let user_id = UserId::from_string(&subject).map_err(|e| {
            tracing::warn!(error = %e, "Refresh rejected: malformed subject");
            SessionError::Unauthorized
        })?;

        if !self
            .refresh_tokens
            .find_live(&user_id, refresh_token)
            .await?
        {
            tracing::info!(user_id = %user_id, "Refresh rejected: token is not the live one");
            return Err(SessionError::Unauthorized);
        }

        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| SessionError::NotFound(user_id.to_string()))?;

        let tokens = self.issue_tokens(&user_id).await?;
        tracing::debug!(user_id = %user_id, "Session refreshed");

        Ok(Session {
            identity: user.identity(),
            tokens,
        })
    }

    async fn authenticate(
        &self,
        credentials: &RequestCredentials,
    ) -> Result<AuthenticatedIdentity, SessionError> {
        let access_token = credentials.access_token.as_deref().filter(|t| !t.is_empty());
        let refresh_token = credentials.refresh_token.as_deref().filter(|t| !t.is_empty());
        let (Some(access_token), Some(_)) = (access_token, refresh_token) else {
            return Err(SessionError::Unauthorized);
        };

        let subject = self.token_service.verify_access(access_token)?;
        let user_id = UserId::from_string(&subject)?;

        match self.users.find_by_id(&user_id).await? {
            Some(user) => Ok(user.identity()),
            None => {
                tracing::warn!(user_id = %user_id, "Access token refers to a missing user");
                Err(SessionError::Unauthorized)
            }
        }
    }
}

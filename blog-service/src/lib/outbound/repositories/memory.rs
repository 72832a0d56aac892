use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RefreshTokenRecord;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::RefreshTokenRepository;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::ConflictKind;
use crate::user::errors::SessionError;

/// Process-local user store.
///
/// Enforces the same uniqueness rules as the `users` table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn exists_by_username(&self, username: &Username) -> Result<bool, SessionError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|user| &user.username == username))
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, SessionError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|user| &user.email == email))
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, SessionError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, SessionError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, SessionError> {
        let mut users = self.users.write().await;

        let username_taken = users.values().any(|u| u.username == user.username);
        let email_taken = users.values().any(|u| u.email == user.email);
        match (username_taken, email_taken) {
            (true, true) => return Err(SessionError::Conflict(ConflictKind::UsernameAndEmail)),
            (true, false) => return Err(SessionError::Conflict(ConflictKind::Username)),
            (false, true) => return Err(SessionError::Conflict(ConflictKind::Email)),
            (false, false) => {}
        }

        users.insert(user.id, user.clone());
        tracing::debug!("User {} stored in memory", user.id);
        Ok(user)
    }
}

/// Process-local refresh-token store keyed by user.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRefreshTokenRepository {
    records: Arc<RwLock<HashMap<UserId, RefreshTokenRecord>>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn record(&self, user_id: &UserId) -> Option<RefreshTokenRecord> {
        self.records.read().await.get(user_id).cloned()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn upsert(&self, user_id: &UserId, token: &str) -> Result<(), SessionError> {
        let now = Utc::now();
        self.records
            .write()
            .await
            .entry(*user_id)
            .and_modify(|record| {
                record.token = token.to_string();
                record.updated_at = now;
            })
            .or_insert_with(|| RefreshTokenRecord {
                user_id: *user_id,
                token: token.to_string(),
                created_at: now,
                updated_at: now,
            });
        Ok(())
    }

    async fn find_live(&self, user_id: &UserId, token: &str) -> Result<bool, SessionError> {
        Ok(self
            .records
            .read()
            .await
            .get(user_id)
            .is_some_and(|record| record.token == token))
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), SessionError> {
        self.records
            .write()
            .await
            .retain(|_, record| record.token != token);
        Ok(())
    }
}

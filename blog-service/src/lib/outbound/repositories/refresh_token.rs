use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::RefreshTokenRepository;
use crate::user::errors::SessionError;

/// PostgreSQL implementation of RefreshTokenRepository.
///
/// `refresh_tokens.user_id` is the primary key, so the table holds at most
/// one live token per user.
pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn upsert(&self, user_id: &UserId, token: &str) -> Result<(), SessionError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET
                token = EXCLUDED.token,
                updated_at = NOW()
            "#,
        )
        .bind(user_id.0)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionError::StoreFailure(format!("Failed to upsert refresh token: {}", e)))?;

        tracing::debug!("Refresh token for user {} upserted", user_id);
        Ok(())
    }

    async fn find_live(&self, user_id: &UserId, token: &str) -> Result<bool, SessionError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM refresh_tokens
                WHERE user_id = $1 AND token = $2
            )
            "#,
        )
        .bind(user_id.0)
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| SessionError::StoreFailure(format!("Failed to look up refresh token: {}", e)))
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), SessionError> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionError::StoreFailure(format!("Failed to delete refresh token: {}", e)))?;

        if result.rows_affected() == 0 {
            tracing::debug!("No refresh token record matched on delete");
        }

        Ok(())
    }
}

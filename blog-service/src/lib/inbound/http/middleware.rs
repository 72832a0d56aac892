use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use super::cookies::request_credentials;
use super::handlers::ApiError;
use crate::domain::user::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

/// Middleware that resolves the session cookies to an identity.
///
/// On success the `AuthenticatedIdentity` is placed in the request
/// extensions for downstream handlers. An expired access token is
/// rejected like any other; clients must call the refresh endpoint.
pub async fn authenticate<SS: SessionServicePort>(
    State(state): State<AppState<SS>>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credentials = request_credentials(&jar);

    let identity = state
        .session_service
        .authenticate(&credentials)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, uri = %req.uri(), "Request authentication failed");
            ApiError::from(e)
        })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

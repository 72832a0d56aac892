use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::domain::user::ports::SessionServicePort;
use crate::inbound::http::cookies::without_session_cookies;
use crate::inbound::http::cookies::REFRESH_TOKEN_COOKIE;
use crate::inbound::http::router::AppState;
use crate::user::errors::SessionError;

pub async fn logout<SS: SessionServicePort>(
    State(state): State<AppState<SS>>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<AuthResponseData>), ApiError> {
    let refresh_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(SessionError::Unauthorized)?;

    state.session_service.logout(&refresh_token).await?;

    Ok((
        without_session_cookies(jar),
        ApiSuccess::new(StatusCode::OK, AuthResponseData::signed_out()),
    ))
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::Username;
use crate::domain::user::ports::SessionServicePort;
use crate::inbound::http::cookies::with_session_cookies;
use crate::inbound::http::router::AppState;
use crate::user::errors::SessionError;
use crate::user::errors::ValidationError;

pub async fn login<SS: SessionServicePort>(
    State(state): State<AppState<SS>>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<(CookieJar, ApiSuccess<AuthResponseData>), ApiError> {
    let command = body.try_into_command().map_err(SessionError::from)?;

    let session = state.session_service.login(command).await?;

    Ok((
        with_session_cookies(jar, &session.tokens, &state.cookie_settings),
        ApiSuccess::new(StatusCode::OK, AuthResponseData::signed_in(&session.identity)),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ValidationError> {
        let username = Username::new(self.username)?;
        let password = Password::new(self.password)?;
        Ok(LoginCommand::new(username, password))
    }
}

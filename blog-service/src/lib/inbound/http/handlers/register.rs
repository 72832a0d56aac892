use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Name;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::SessionServicePort;
use crate::inbound::http::cookies::with_session_cookies;
use crate::inbound::http::router::AppState;
use crate::user::errors::SessionError;
use crate::user::errors::ValidationError;

pub async fn register<SS: SessionServicePort>(
    State(state): State<AppState<SS>>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<(CookieJar, ApiSuccess<AuthResponseData>), ApiError> {
    let command = body.try_into_command().map_err(SessionError::from)?;

    let session = state.session_service.register(command).await?;

    Ok((
        with_session_cookies(jar, &session.tokens, &state.cookie_settings),
        ApiSuccess::new(
            StatusCode::CREATED,
            AuthResponseData::signed_in(&session.identity),
        ),
    ))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    username: String,
    name: String,
    email: String,
    password: String,
    confirm_password: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ValidationError> {
        if let Some(confirm_password) = &self.confirm_password {
            if confirm_password != &self.password {
                return Err(ValidationError::PasswordConfirmationMismatch);
            }
        }

        let username = Username::new(self.username)?;
        let name = Name::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(RegisterCommand::new(username, name, email, password))
    }
}

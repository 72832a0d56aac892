use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::user::models::AuthenticatedIdentity;
use crate::user::errors::SessionError;

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Validation(_) => ApiError::BadRequest(err.to_string()),
            SessionError::Conflict(_) => ApiError::Conflict(err.to_string()),
            SessionError::InvalidCredentials(_)
            | SessionError::InvalidToken(_)
            | SessionError::ExpiredToken
            | SessionError::Unauthorized => ApiError::Unauthorized(err.to_string()),
            SessionError::NotFound(_) => ApiError::NotFound(err.to_string()),
            SessionError::StoreFailure(_) | SessionError::Internal(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError("Internal Server Error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Body shared by every session endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub user: Option<UserData>,
    pub auth: bool,
}

impl AuthResponseData {
    pub fn signed_in(identity: &AuthenticatedIdentity) -> Self {
        Self {
            user: Some(identity.into()),
            auth: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            auth: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub name: String,
}

impl From<&AuthenticatedIdentity> for UserData {
    fn from(identity: &AuthenticatedIdentity) -> Self {
        Self {
            id: identity.id.to_string(),
            username: identity.username.as_str().to_string(),
            name: identity.name.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::errors::ConflictKind;
    use crate::user::errors::CredentialFailure;
    use crate::user::errors::UsernameError;

    #[test]
    fn test_session_error_status_mapping() {
        let cases = [
            (
                SessionError::Validation(UsernameError::TooShort { min: 5, actual: 1 }.into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                SessionError::Conflict(ConflictKind::Email),
                StatusCode::CONFLICT,
            ),
            (
                SessionError::InvalidCredentials(CredentialFailure::Password),
                StatusCode::UNAUTHORIZED,
            ),
            (
                SessionError::InvalidToken("bad signature".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (SessionError::ExpiredToken, StatusCode::UNAUTHORIZED),
            (SessionError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                SessionError::NotFound("id".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                SessionError::StoreFailure("down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                SessionError::Internal("join".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_infrastructure_details_are_not_exposed() {
        let err = ApiError::from(SessionError::StoreFailure("password=secret".to_string()));
        assert_eq!(
            err,
            ApiError::InternalServerError("Internal Server Error".to_string())
        );
    }

    #[test]
    fn test_credential_messages() {
        assert_eq!(
            ApiError::from(SessionError::InvalidCredentials(CredentialFailure::Username)),
            ApiError::Unauthorized("Invalid Username".to_string())
        );
        assert_eq!(
            ApiError::from(SessionError::InvalidCredentials(CredentialFailure::Password)),
            ApiError::Unauthorized("Invalid Password".to_string())
        );
    }
}

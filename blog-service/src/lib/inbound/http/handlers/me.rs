use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::AuthenticatedIdentity;

/// Return the identity the guard attached to the request.
pub async fn me(
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> ApiSuccess<UserData> {
    ApiSuccess::new(StatusCode::OK, (&identity).into())
}

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::cookies::CookieSettings;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::SessionServicePort;

pub struct AppState<SS: SessionServicePort> {
    pub session_service: Arc<SS>,
    pub cookie_settings: CookieSettings,
}

impl<SS: SessionServicePort> Clone for AppState<SS> {
    fn clone(&self) -> Self {
        Self {
            session_service: Arc::clone(&self.session_service),
            cookie_settings: self.cookie_settings,
        }
    }
}

pub fn create_router<SS: SessionServicePort>(
    session_service: Arc<SS>,
    cookie_settings: CookieSettings,
) -> Router {
    let state = AppState {
        session_service,
        cookie_settings,
    };

    let public_routes = Router::new()
        .route("/api/register", post(register::<SS>))
        .route("/api/login", post(login::<SS>))
        .route("/api/refresh", get(refresh::<SS>));

    let protected_routes = Router::new()
        .route("/api/logout", post(logout::<SS>))
        .route("/api/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<SS>,
        ));

    // Headers are left out of the span: they carry the session cookies.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::header;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::user::models::SessionSettings;
    use crate::domain::user::service::SessionService;
    use crate::outbound::repositories::InMemoryRefreshTokenRepository;
    use crate::outbound::repositories::InMemoryUserRepository;

    fn router() -> Router {
        let token_service = auth::TokenService::new(
            b"router_access_secret_at_least_32_byte",
            b"router_refresh_secret_at_least_32_byt",
        )
        .unwrap();
        let session_service = SessionService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryRefreshTokenRepository::new()),
            Arc::new(token_service),
            SessionSettings::default(),
        );

        create_router(Arc::new(session_service), CookieSettings::new(24, false))
    }

    #[tokio::test]
    async fn test_guard_rejects_request_without_cookies() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status_code"], 401);
        assert_eq!(body["data"]["message"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_guard_rejects_garbage_access_token() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/me")
                    .header(header::COOKIE, "accessToken=garbage; refreshToken=garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_sets_session_cookies() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "username": "alice01",
                            "name": "Alice",
                            "email": "alice@example.com",
                            "password": "Passw0rd",
                            "confirmPassword": "Passw0rd"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert!(cookies
            .iter()
            .any(|c| c.starts_with("accessToken=") && c.contains("HttpOnly")));
        assert!(cookies
            .iter()
            .any(|c| c.starts_with("refreshToken=") && c.contains("HttpOnly")));
    }

    #[tokio::test]
    async fn test_refresh_without_cookie_is_unauthorized() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

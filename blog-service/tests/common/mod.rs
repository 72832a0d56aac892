use std::sync::Arc;

use auth::TokenService;
use blog_service::domain::user::models::SessionSettings;
use blog_service::domain::user::service::SessionService;
use blog_service::inbound::http::cookies::CookieSettings;
use blog_service::inbound::http::router::create_router;
use blog_service::outbound::repositories::InMemoryRefreshTokenRepository;
use blog_service::outbound::repositories::InMemoryUserRepository;
use serde_json::json;

pub const ACCESS_SECRET: &[u8] = b"test-access-secret-for-jwt-signing-32b";
pub const REFRESH_SECRET: &[u8] = b"test-refresh-secret-for-jwt-signing-32";

/// Test application that spawns a real server backed by in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub token_service: TokenService,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_service = TokenService::new(ACCESS_SECRET, REFRESH_SECRET)
            .expect("Failed to create token service");
        let server_token_service = TokenService::new(ACCESS_SECRET, REFRESH_SECRET)
            .expect("Failed to create token service");

        let session_service = Arc::new(SessionService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryRefreshTokenRepository::new()),
            Arc::new(server_token_service),
            SessionSettings::default(),
        ));

        let router = create_router(session_service, CookieSettings::new(24, false));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            token_service,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make a GET request carrying explicit cookies, bypassing the client's cookie store
    pub fn get_with_cookies(&self, path: &str, access: &str, refresh: &str) -> reqwest::RequestBuilder {
        reqwest::Client::new()
            .get(format!("{}{}", self.address, path))
            .header(
                reqwest::header::COOKIE,
                format!("accessToken={}; refreshToken={}", access, refresh),
            )
    }

    /// Register `alice01` and leave her session cookies in the client's store
    pub async fn register_alice(&self) -> reqwest::Response {
        self.post("/api/register")
            .json(&json!({
                "username": "alice01",
                "name": "Alice",
                "email": "alice@example.com",
                "password": "Passw0rd",
                "confirmPassword": "Passw0rd"
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Pull a cookie value out of a response's Set-Cookie headers
pub fn cookie_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

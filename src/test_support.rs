//! Shared fixtures for unit tests: config, token minting, in-memory state.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

use crate::config::{AppEnv, AuthConfig, Config};
use crate::repos::MemoryStore;
use crate::services::auth::TokenAuthenticator;
use crate::state::AppState;

pub const SECRET: &str = "test-signing-secret";

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        secret: SECRET.to_string(),
        algorithm: Algorithm::HS256,
        leeway_seconds: 0,
        max_age_seconds: None,
    }
}

pub fn config() -> Config {
    Config {
        addr: ([127, 0, 0, 1], 0).into(),
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        auth: auth_config(),
        request_timeout: Duration::from_secs(5),
        body_limit_bytes: 64 * 1024,
    }
}

pub fn authenticator() -> TokenAuthenticator {
    TokenAuthenticator::new(&auth_config())
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Sign arbitrary claims with the test secret.
pub fn mint(claims: Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("sign test token")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// `Authorization` header value for a fresh token issued to `subject`.
pub fn token_for(subject: &str) -> String {
    let iat = now();
    bearer(&mint(json!({
        "subject": subject,
        "email": format!("{subject}@example.com"),
        "iat": iat,
        "exp": iat + 3600,
    })))
}

pub fn memory_state() -> AppState {
    let store = Arc::new(MemoryStore::new());
    AppState::new(Arc::new(authenticator()), store.clone(), store)
}

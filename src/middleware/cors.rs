//! CORS policy for browser clients.
//!
//! Policy:
//! - Development: permissive (Allow-Origin: *), WITHOUT credentials.
//! - Production: allowlist origins from Config (comma-separated env var), WITHOUT credentials.
//!   An empty allowlist allows no cross-origin callers. `*` is never a list entry
//!   (`Config` rejects it; a hand-built `Config` has it dropped here).

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}

fn layer(config: &Config) -> CorsLayer {
    let base = if config.app_env.is_production() {
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter(|s| s.as_str() != "*")
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
    } else {
        CorsLayer::new().allow_origin(Any)
    };

    // Only the verbs the API actually routes.
    base.allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(Duration::from_secs(60 * 10))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppEnv;
    use crate::test_support::config;

    async fn preflight(config: &Config, origin: &str) -> Option<HeaderValue> {
        let app = apply(Router::new().route("/x", get(|| async { "x" })), config);
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/x")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .cloned()
    }

    #[tokio::test]
    async fn development_allows_any_origin() {
        let allowed = preflight(&config(), "https://anything.example").await;
        assert_eq!(allowed.unwrap(), "*");
    }

    #[tokio::test]
    async fn production_uses_the_allowlist() {
        let mut config = config();
        config.app_env = AppEnv::Production;
        config.cors_allowed_origins = vec!["https://app.example".to_string()];

        let allowed = preflight(&config, "https://app.example").await;
        assert_eq!(allowed.unwrap(), "https://app.example");
        assert!(preflight(&config, "https://evil.example").await.is_none());
    }

    #[tokio::test]
    async fn wildcard_entry_does_not_open_production() {
        let mut config = config();
        config.app_env = AppEnv::Production;
        config.cors_allowed_origins = vec!["*".to_string(), "https://app.example".to_string()];

        let allowed = preflight(&config, "https://app.example").await;
        assert_eq!(allowed.unwrap(), "https://app.example");
        assert!(preflight(&config, "https://evil.example").await.is_none());
    }
}

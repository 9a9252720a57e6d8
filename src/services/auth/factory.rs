/// Factory: build `TokenAuthenticator` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::TokenAuthenticator;

pub fn build_authenticator(config: &Config) -> Arc<TokenAuthenticator> {
    tracing::debug!(auth = ?config.auth, "building bearer token authenticator");
    Arc::new(TokenAuthenticator::new(&config.auth))
}

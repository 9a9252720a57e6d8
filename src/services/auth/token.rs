use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::config::AuthConfig;
use crate::error::AppError;

// Internal reasons a bearer token was rejected. Logged, never returned to the caller.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("missing authorization header")]
    MissingHeader,
    #[error("authorization header is not `Bearer <token>`")]
    MalformedHeader,
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
    #[error("'{0}' claim is not a valid timestamp")]
    InvalidTimestamp(&'static str),
    #[error("token is older than the configured lifetime")]
    TooOld,
}

/// Payload as signed by the issuer.
///
/// The issuer writes the owner id as `subject`; `sub` is accepted as well.
#[derive(Debug, Clone, Deserialize)]
struct RawClaims {
    #[serde(alias = "sub")]
    subject: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    iat: Option<i64>,
    exp: i64,
}

/// Verified token claims. Lives for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub subject: String,
    pub email: String,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

/// HMAC bearer-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
    max_age_seconds: Option<u64>,
}

impl std::fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthenticator")
            .field("validation", &self.validation)
            .field("max_age_seconds", &self.max_age_seconds)
            .finish()
    }
}

impl TokenAuthenticator {
    pub fn new(config: &AuthConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.leeway = config.leeway_seconds;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key,
            validation,
            max_age_seconds: config.max_age_seconds,
        }
    }

    /// Authenticate the raw `Authorization` header value.
    ///
    /// Every failure collapses into the same `AuthenticationError`; the cause is only logged.
    pub fn authenticate(&self, header: Option<&str>) -> Result<TokenClaims, AppError> {
        self.authenticate_header(header).map_err(|err| {
            tracing::warn!(error = %err, "bearer authentication failed");
            AppError::authentication()
        })
    }

    fn authenticate_header(&self, header: Option<&str>) -> Result<TokenClaims, TokenError> {
        let header = header.ok_or(TokenError::MissingHeader)?;
        let token = bearer_token(header).ok_or(TokenError::MalformedHeader)?;
        self.verify(token)
    }

    /// Verify signature + `exp` (jsonwebtoken), then the claims we rely on.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let raw =
            jsonwebtoken::decode::<RawClaims>(token, &self.decoding_key, &self.validation)?.claims;

        if raw.subject.trim().is_empty() {
            return Err(TokenError::EmptyClaim("subject"));
        }

        let expires_at =
            DateTime::from_timestamp(raw.exp, 0).ok_or(TokenError::InvalidTimestamp("exp"))?;
        let issued_at = match raw.iat {
            Some(iat) => {
                Some(DateTime::from_timestamp(iat, 0).ok_or(TokenError::InvalidTimestamp("iat"))?)
            }
            None => None,
        };

        if let Some(max_age) = self.max_age_seconds {
            // A lifetime policy needs to know when the token was minted.
            let issued_at = issued_at.ok_or(TokenError::EmptyClaim("iat"))?;
            let age = Utc::now().signed_duration_since(issued_at).num_seconds();
            let allowed = max_age.saturating_add(self.validation.leeway);
            if age > i64::try_from(allowed).unwrap_or(i64::MAX) {
                return Err(TokenError::TooOld);
            }
        }

        Ok(TokenClaims {
            subject: raw.subject,
            email: raw.email,
            issued_at,
            expires_at,
        })
    }
}

// `Bearer <token>`: exactly two space-separated parts.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() || token.contains(' ') {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::Algorithm;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::{SECRET, auth_config, bearer, mint, now};

    fn authenticator() -> TokenAuthenticator {
        TokenAuthenticator::new(&auth_config())
    }

    #[test]
    fn valid_token_yields_subject_and_email() {
        let iat = now();
        let token = mint(json!({
            "subject": "u1",
            "email": "u1@example.com",
            "iat": iat,
            "exp": iat + 600,
        }));

        let claims = authenticator()
            .authenticate(Some(&bearer(&token)))
            .unwrap();
        assert_eq!(claims.subject, "u1");
        assert_eq!(claims.email, "u1@example.com");
        assert_eq!(claims.issued_at.map(|t| t.timestamp()), Some(iat));
        assert_eq!(claims.expires_at.timestamp(), iat + 600);
    }

    #[test]
    fn sub_is_accepted_as_subject() {
        let token = mint(json!({ "sub": "u7", "exp": now() + 60 }));
        let claims = authenticator().verify(&token).unwrap();
        assert_eq!(claims.subject, "u7");
        assert_eq!(claims.email, "");
    }

    #[rstest]
    #[case::missing(None)]
    #[case::no_scheme(Some("just-a-token".to_string()))]
    #[case::wrong_scheme(Some(format!("Basic {}", mint(json!({ "subject": "u1", "exp": now() + 60 })))))]
    #[case::three_parts(Some(format!("Bearer {} extra", mint(json!({ "subject": "u1", "exp": now() + 60 })))))]
    #[case::empty_token(Some("Bearer ".to_string()))]
    #[case::garbage(Some("Bearer not.a.jwt".to_string()))]
    #[case::expired(Some(bearer(&mint(json!({ "subject": "u1", "exp": now() - 3600 })))))]
    #[case::no_exp(Some(bearer(&mint(json!({ "subject": "u1" })))))]
    #[case::blank_subject(Some(bearer(&mint(json!({ "subject": " ", "exp": now() + 60 })))))]
    #[case::no_subject(Some(bearer(&mint(json!({ "email": "a@b.c", "exp": now() + 60 })))))]
    fn every_rejection_is_the_same_authentication_error(#[case] header: Option<String>) {
        let err = authenticator().authenticate(header.as_deref()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.to_string(), "Invalid Credentials");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = json!({ "subject": "u1", "exp": now() + 60 });
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(Algorithm::HS256),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"someone-else"),
        )
        .unwrap();

        assert!(matches!(
            authenticator().verify(&token),
            Err(TokenError::Jwt(_))
        ));
    }

    #[test]
    fn algorithm_mismatch_is_rejected() {
        let claims = json!({ "subject": "u1", "exp": now() + 60 });
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(Algorithm::HS512),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(authenticator().verify(&token).is_err());
    }

    #[test]
    fn leeway_tolerates_small_clock_skew() {
        let mut config = auth_config();
        config.leeway_seconds = 120;
        let token = mint(json!({ "subject": "u1", "exp": now() - 30 }));

        assert!(TokenAuthenticator::new(&config).verify(&token).is_ok());
        assert!(authenticator().verify(&token).is_err());
    }

    #[test]
    fn configured_lifetime_rejects_old_tokens() {
        let mut config = auth_config();
        config.max_age_seconds = Some(300);
        let auth = TokenAuthenticator::new(&config);

        let fresh = mint(json!({ "subject": "u1", "iat": now() - 10, "exp": now() + 3600 }));
        let stale = mint(json!({ "subject": "u1", "iat": now() - 900, "exp": now() + 3600 }));
        let undated = mint(json!({ "subject": "u1", "exp": now() + 3600 }));

        assert!(auth.verify(&fresh).is_ok());
        assert!(matches!(auth.verify(&stale), Err(TokenError::TooOld)));
        assert!(matches!(auth.verify(&undated), Err(TokenError::EmptyClaim("iat"))));
    }

    #[rstest]
    #[case("Bearer abc", Some("abc"))]
    #[case("bearer abc", Some("abc"))]
    #[case("Bearer", None)]
    #[case("Bearer  abc", None)]
    #[case("Token abc", None)]
    fn bearer_header_shape(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(bearer_token(header), expected);
    }
}

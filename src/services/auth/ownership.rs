//! 認可 (Authorization): 認証済み subject と path 上の所有者 id が同一か確認する
//!
//! - 比較は opaque な文字列の完全一致のみ (型変換・数値比較はしない)
//! - 不一致は 403。401 (誰であるか) と 403 (何をしてよいか) を混同しない

use crate::error::AppError;
use crate::services::auth::TokenClaims;

/// Path parameter naming the resource owner on every owned route.
pub const OWNER_PARAM: &str = "userId";

#[derive(Debug, Clone, Copy)]
pub struct OwnershipAuthorizer {
    owner_param: &'static str,
}

impl Default for OwnershipAuthorizer {
    fn default() -> Self {
        Self::new(OWNER_PARAM)
    }
}

impl OwnershipAuthorizer {
    pub const fn new(owner_param: &'static str) -> Self {
        Self { owner_param }
    }

    pub fn owner_param(&self) -> &'static str {
        self.owner_param
    }

    pub fn authorize(&self, claims: &TokenClaims, path_owner_id: &str) -> Result<(), AppError> {
        if claims.subject == path_owner_id {
            Ok(())
        } else {
            tracing::warn!(
                subject = %claims.subject,
                owner = %path_owner_id,
                "subject does not own the addressed resource"
            );
            Err(AppError::authorization())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::error::ErrorKind;

    fn claims(subject: &str) -> TokenClaims {
        TokenClaims {
            subject: subject.to_string(),
            email: format!("{subject}@example.com"),
            issued_at: None,
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn same_subject_passes() {
        assert!(OwnershipAuthorizer::default().authorize(&claims("u1"), "u1").is_ok());
    }

    #[rstest]
    #[case("u1", "u2")]
    #[case("42", "042")]
    #[case("42", "42.0")]
    #[case("User", "user")]
    #[case("u1", "u1 ")]
    fn anything_but_exact_equality_is_forbidden(#[case] subject: &str, #[case] owner: &str) {
        let err = OwnershipAuthorizer::default()
            .authorize(&claims(subject), owner)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(err.status(), axum::http::StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "Not Authorized to perform this operation");
    }
}

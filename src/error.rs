/*
 * Responsibility
 * - アプリ共通の AppError 定義 (閉じた error kind の集合)
 * - IntoResponse 実装 (HTTP status / JSON error body) = Error Responder
 * - 分類できない失敗は InternalServerError に正規化し、詳細は外に出さない
 */
use std::{borrow::Cow, fmt};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub const AUTHENTICATION_MESSAGE: &str = "Invalid Credentials";
pub const AUTHORIZATION_MESSAGE: &str = "Not Authorized to perform this operation";
pub const CONFLICT_MESSAGE: &str = "Resource Conflict";
pub const INTERNAL_MESSAGE: &str = "Something went wrong";

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// absent, null or blank
    Required,
    /// present but malformed (e.g. not an email address)
    Format,
    /// present but of the wrong JSON type
    Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub kind: ViolationKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
        }
    }
}

/// Discriminant of [`AppError`], used for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidParameter,
    Authentication,
    Authorization,
    ResourceNotFound,
    ConflictingResource,
    InternalServer,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid parameters: {}", DisplayFields(.0))]
    InvalidParameter(Vec<FieldError>),
    #[error("{0}")]
    Authentication(Cow<'static, str>),
    #[error("{0}")]
    Authorization(Cow<'static, str>),
    #[error("{0}")]
    NotFound(Cow<'static, str>),
    #[error("{0}")]
    Conflict(Cow<'static, str>),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn invalid_parameters(errors: Vec<FieldError>) -> Self {
        Self::InvalidParameter(errors)
    }

    pub fn authentication() -> Self {
        Self::Authentication(Cow::Borrowed(AUTHENTICATION_MESSAGE))
    }

    pub fn authorization() -> Self {
        Self::Authorization(Cow::Borrowed(AUTHORIZATION_MESSAGE))
    }

    /// `"<resource> not found"`
    pub fn not_found(resource: &str) -> Self {
        Self::NotFound(Cow::Owned(format!("{resource} not found")))
    }

    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Conflict(message.into())
    }

    /// Log an unclassified failure and replace it with the generic internal error.
    /// The cause never reaches the response body.
    pub fn internal(cause: impl fmt::Display) -> Self {
        tracing::error!(error = %cause, "unclassified failure");
        Self::Internal
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter(_) => ErrorKind::InvalidParameter,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::NotFound(_) => ErrorKind::ResourceNotFound,
            Self::Conflict(_) => ErrorKind::ConflictingResource,
            Self::Internal => ErrorKind::InternalServer,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidParameter => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::ResourceNotFound => StatusCode::NOT_FOUND,
            ErrorKind::ConflictingResource => StatusCode::CONFLICT,
            ErrorKind::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ErrorResponse<'a> {
    Message { message: &'a str },
    Fields { errors: &'a [FieldError] },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::InvalidParameter(errors) => ErrorResponse::Fields { errors },
            AppError::Authentication(message)
            | AppError::Authorization(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message) => ErrorResponse::Message { message },
            AppError::Internal => ErrorResponse::Message {
                message: INTERNAL_MESSAGE,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::internal(format!("{e:#}"))
    }
}

struct DisplayFields<'a>(&'a [FieldError]);

impl fmt::Display for DisplayFields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{} ({})", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[rstest]
    #[case(AppError::authentication(), StatusCode::UNAUTHORIZED, "Invalid Credentials")]
    #[case(
        AppError::authorization(),
        StatusCode::FORBIDDEN,
        "Not Authorized to perform this operation"
    )]
    #[case(AppError::not_found("Bookmark"), StatusCode::NOT_FOUND, "Bookmark not found")]
    #[case(AppError::conflict(CONFLICT_MESSAGE), StatusCode::CONFLICT, "Resource Conflict")]
    #[case(AppError::Internal, StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")]
    #[tokio::test]
    async fn single_message_errors_render_only_the_message(
        #[case] err: AppError,
        #[case] status: StatusCode,
        #[case] message: &str,
    ) {
        let (got_status, body) = render(err).await;
        assert_eq!(got_status, status);
        assert_eq!(body, json!({ "message": message }));
    }

    #[tokio::test]
    async fn default_messages_can_be_overridden() {
        let (status, body) = render(AppError::conflict("Bookmark already exists")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "message": "Bookmark already exists" }));
    }

    #[tokio::test]
    async fn validation_errors_render_every_field() {
        let err = AppError::invalid_parameters(vec![
            FieldError::new("email", "Invalid email address", ViolationKind::Format),
            FieldError::new("password", "Password cannot be empty", ViolationKind::Required),
        ]);
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);

        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "errors": [
                    { "field": "email", "message": "Invalid email address", "kind": "format" },
                    { "field": "password", "message": "Password cannot be empty", "kind": "required" },
                ]
            })
        );
    }

    #[tokio::test]
    async fn unclassified_failures_do_not_leak_their_cause() {
        let err: AppError = anyhow::anyhow!("connection refused: postgres://admin:hunter2@db").into();
        assert_eq!(err.kind(), ErrorKind::InternalServer);

        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Something went wrong" }));
        assert!(!body.to_string().contains("hunter2"));
    }

    #[test]
    fn display_lists_field_names() {
        let err = AppError::invalid_parameters(vec![FieldError::new(
            "title",
            "Bookmark title cannot be empty",
            ViolationKind::Required,
        )]);
        assert_eq!(
            err.to_string(),
            "invalid parameters: title (Bookmark title cannot be empty)"
        );
    }
}

/*
 * Responsibility
 * - 1 リクエスト分の入力 (path params / JSON body / Authorization header) を表す型
 * - Pipeline の各 Stage はこの型だけを見る (axum には依存しない)
 *
 * Notes
 * - リクエストごとに所有され、他のリクエストと共有しない
 * - claims は Authenticator が埋める。それ以前の Stage からは None に見える
 */
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{AppError, FieldError, ViolationKind};
use crate::services::auth::TokenClaims;

pub const BODY_FIELD: &str = "body";
pub const BODY_NOT_OBJECT_MESSAGE: &str = "Request body must be a JSON object";

/// Parsed request body. An empty body is an empty object.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonBody {
    Object(Map<String, Value>),
    NotAnObject,
}

impl Default for JsonBody {
    fn default() -> Self {
        Self::Object(Map::new())
    }
}

impl JsonBody {
    pub fn parse(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Self::default();
        }
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Self::Object(map),
            _ => Self::NotAnObject,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub path_params: HashMap<String, String>,
    pub body: JsonBody,
    pub authorization: Option<String>,
    pub claims: Option<TokenClaims>,
}

impl RequestContext {
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    /// `None` when the field is absent or the body is not an object.
    pub fn body_field(&self, name: &str) -> Option<&Value> {
        match &self.body {
            JsonBody::Object(map) => map.get(name),
            JsonBody::NotAnObject => None,
        }
    }

    /// Deserialize the (already validated) body into a request DTO.
    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        let value = match &self.body {
            JsonBody::Object(map) => Value::Object(map.clone()),
            JsonBody::NotAnObject => return Err(body_type_error()),
        };
        serde_json::from_value(value).map_err(|e| {
            tracing::debug!(error = %e, "validated body did not match request dto");
            body_type_error()
        })
    }
}

pub fn body_type_error() -> AppError {
    AppError::invalid_parameters(vec![FieldError::new(
        BODY_FIELD,
        BODY_NOT_OBJECT_MESSAGE,
        ViolationKind::Type,
    )])
}

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::header,
};

use crate::error::AppError;

use super::types::{JsonBody, RequestContext, body_type_error};

/// Handler で RequestContext を受け取るための extractor
///
/// Rejection は常に AppError。body が JSON object でなくてもここでは拒否せず、
/// Validator に判断させる (検証順序を Pipeline 側で固定するため)
impl<S> FromRequest<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        // Routes without parameters have nothing to extract.
        let path_params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();

        // A header that is not visible ASCII is kept as an empty value so the
        // authenticator rejects it like any other malformed header.
        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .map(|v| v.to_str().unwrap_or_default().to_owned());

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "request body could not be read");
                body_type_error()
            })?;

        Ok(Self {
            path_params,
            body: JsonBody::parse(&bytes),
            authorization,
            claims: None,
        })
    }
}

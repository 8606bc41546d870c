//! Request payload extractor
//!
//! Bodies are decoded according to `Content-Type`: JSON for
//! `application/json`, urlencoded form for everything else. A request
//! without a body is read from the query string instead.

use axum::{
    async_trait,
    body::{self, Body},
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header::CONTENT_TYPE, HeaderValue},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Largest request body accepted
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Decoded request payload
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase().starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::MalformedRequest(e.body_text()))?;
            return Ok(Payload(value));
        }

        let (mut parts, body) = req.into_parts();
        let bytes = body::to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|e| AppError::MalformedRequest(e.to_string()))?;

        if bytes.is_empty() {
            let Query(value) = Query::<T>::from_request_parts(&mut parts, state)
                .await
                .map_err(|e| AppError::MalformedRequest(e.body_text()))?;
            return Ok(Payload(value));
        }

        // Any non-JSON body is read as urlencoded, whatever it was labelled
        parts.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        let req = Request::from_parts(parts, Body::from(bytes));
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::MalformedRequest(e.body_text()))?;
        Ok(Payload(value))
    }
}

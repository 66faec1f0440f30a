//! REST boundary of a collection: list / create / update / delete / row actions.

use async_trait::async_trait;
use contracts::shared::form::{ApiErrorBody, FieldErrors};
use contracts::shared::list::{ListQuery, ListResponse};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// HTTP 422 with per-field messages
    #[error("validation failed on {} field(s)", errors.len())]
    Validation {
        errors: FieldErrors,
        message: Option<String>,
    },
    #[error("server responded with status {status}")]
    Remote { status: u16, message: Option<String> },
    #[error("request failed: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Service message when it sent one, otherwise `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Remote {
                message: Some(message),
                ..
            }
            | ApiError::Validation {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Map a failed response body onto the error taxonomy
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed.message().map(str::to_string);
        if status == 422 {
            if let Some(errors) = parsed.field_errors() {
                return ApiError::Validation { errors, message };
            }
        }
        ApiError::Remote { status, message }
    }
}

/// URL layout of one entity's endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSet {
    pub base: &'static str,
}

impl EndpointSet {
    pub const fn new(base: &'static str) -> Self {
        Self { base }
    }

    pub fn list(&self) -> String {
        self.base.to_string()
    }

    pub fn item(&self, id: &str) -> String {
        format!("{}/{}", self.base, urlencoding::encode(id))
    }

    pub fn action(&self, id: &str, action: &str) -> String {
        format!("{}/{}/{}", self.base, urlencoding::encode(id), action)
    }
}

#[async_trait(?Send)]
pub trait CollectionApi<R> {
    async fn list(&self, query: &ListQuery) -> Result<ListResponse<R>, ApiError>;
    async fn create(&self, payload: &Value) -> Result<R, ApiError>;
    async fn update(&self, id: &str, payload: &Value) -> Result<R, ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
    /// Status transition such as `activate`, `close`, `sign`
    async fn action(&self, id: &str, action: &str) -> Result<(), ApiError>;
}

/// `page=1&per_page=25&search=...`, url-encoded
pub fn encode_query(query: &ListQuery) -> String {
    query
        .pairs()
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Write endpoints answer either with the record or with `{success, data: record}`
pub fn decode_record<R: DeserializeOwned>(body: Value) -> Result<R, ApiError> {
    let record = match body {
        Value::Object(mut map) if map.get("data").map_or(false, Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(record).map_err(|e| ApiError::Decode(e.to_string()))
}

/// `CollectionApi` over HTTP
pub struct RestApi<R> {
    base_url: String,
    endpoints: EndpointSet,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RestApi<R> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            endpoints: self.endpoints,
            _record: PhantomData,
        }
    }
}

impl<R> RestApi<R> {
    pub fn new(base_url: impl Into<String>, endpoints: EndpointSet) -> Self {
        Self {
            base_url: base_url.into(),
            endpoints,
            _record: PhantomData,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Read the body; non-2xx and `success: false` become `ApiError`
async fn read_body(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        log::warn!("HTTP {} from {}", status, response.url());
        return Err(ApiError::from_response(status, &text));
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    let body: Value =
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?;

    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::from_response(status, &text));
    }
    Ok(body)
}

#[async_trait(?Send)]
impl<R: DeserializeOwned> CollectionApi<R> for RestApi<R> {
    async fn list(&self, query: &ListQuery) -> Result<ListResponse<R>, ApiError> {
        let url = format!("{}?{}", self.url(&self.endpoints.list()), encode_query(query));
        log::debug!("GET {}", url);

        let response = Request::get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, &text));
        }

        // success:false is not an error for listings, the normalizer turns it into an empty page
        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        ListResponse::decode(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn create(&self, payload: &Value) -> Result<R, ApiError> {
        let url = self.url(&self.endpoints.list());
        log::debug!("POST {}", url);

        let response = Request::post(&url)
            .header("Accept", "application/json")
            .json(payload)
            .map_err(|e| ApiError::Network(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode_record(read_body(response).await?)
    }

    async fn update(&self, id: &str, payload: &Value) -> Result<R, ApiError> {
        let url = self.url(&self.endpoints.item(id));
        log::debug!("PUT {}", url);

        let response = Request::put(&url)
            .header("Accept", "application/json")
            .json(payload)
            .map_err(|e| ApiError::Network(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode_record(read_body(response).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url(&self.endpoints.item(id));
        log::debug!("DELETE {}", url);

        let response = Request::delete(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_body(response).await.map(|_| ())
    }

    async fn action(&self, id: &str, action: &str) -> Result<(), ApiError> {
        let url = self.url(&self.endpoints.action(id, action));
        log::debug!("POST {}", url);

        let response = Request::post(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_body(response).await.map(|_| ())
    }
}

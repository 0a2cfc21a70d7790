//! Back-office REST client
//!
//! Implements the upload and create ports over HTTP:
//! - `POST {base}/media` as `multipart/form-data` (`file`, `entityType`, `slot`)
//! - `POST {base}/{entity_type}` with the JSON create payload
//!
//! Both endpoints answer with a JSON object carrying the new `id`, either at
//! the top level or under `data`.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use backoffice_domain::{EntityId, MediaId, UploadFile, UploadOptions};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::config::AdminConfig;
use crate::ports::outbound::{
    CreateError, CreatedEntity, EntityCreatePort, MediaUploadPort, UploadError, UploadedMedia,
};

#[derive(Clone)]
pub struct BackofficeApiClient {
    client: Client,
    base_url: String,
}

impl BackofficeApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AdminConfig) -> Result<Self, reqwest::Error> {
        Self::new(&config.api_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

// =============================================================================
// Response helpers
// =============================================================================

/// `id` at the top level or under `data`; numeric ids are accepted as text.
fn extract_field(body: &Value, field: &str) -> Option<String> {
    let value = body
        .get(field)
        .or_else(|| body.get("data").and_then(|data| data.get(field)))?;
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Error text the backend put in the body, or the status reason
fn error_message(status: StatusCode, body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| body.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        })
}

/// `errors` as `{path: message}` or `{path: [message, ...]}`; first message wins.
fn field_errors(body: &Value) -> BTreeMap<String, String> {
    let Some(errors) = body.get("errors").and_then(Value::as_object) else {
        return BTreeMap::new();
    };
    errors
        .iter()
        .filter_map(|(path, value)| {
            let message = match value {
                Value::String(s) => Some(s.clone()),
                Value::Array(items) => items.iter().find_map(Value::as_str).map(str::to_string),
                _ => None,
            }?;
            Some((path.clone(), message))
        })
        .collect()
}

async fn read_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
    (status, body)
}

// =============================================================================
// Port implementations
// =============================================================================

#[async_trait]
impl MediaUploadPort for BackofficeApiClient {
    async fn upload(
        &self,
        file: UploadFile,
        options: UploadOptions,
    ) -> Result<UploadedMedia, UploadError> {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| UploadError::Transport(e.to_string()))?;
        let form = Form::new()
            .text("entityType", options.entity_type)
            .text("slot", options.slot.as_str())
            .part("file", part);

        let response = self
            .client
            .post(self.endpoint("media"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let (status, body) = read_body(response).await;
        if !status.is_success() {
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let id = extract_field(&body, "id")
            .ok_or_else(|| UploadError::InvalidResponse("missing media id".to_string()))?;
        let id = MediaId::new(id).map_err(|e| UploadError::InvalidResponse(e.to_string()))?;

        tracing::debug!(slot = %options.slot, media_id = %id, "Media uploaded");

        Ok(UploadedMedia {
            id,
            url: extract_field(&body, "url"),
        })
    }
}

#[async_trait]
impl EntityCreatePort for BackofficeApiClient {
    async fn create(&self, entity_type: &str, payload: Value) -> Result<CreatedEntity, CreateError> {
        let response = self
            .client
            .post(self.endpoint(entity_type))
            .json(&payload)
            .send()
            .await
            .map_err(|e| CreateError::Transport(e.to_string()))?;

        let (status, body) = read_body(response).await;
        if status.is_client_error() {
            return Err(CreateError::Rejected {
                message: error_message(status, &body),
                field_errors: field_errors(&body),
            });
        }
        if !status.is_success() {
            return Err(CreateError::Transport(format!(
                "{}: {}",
                status.as_u16(),
                error_message(status, &body)
            )));
        }

        let id = extract_field(&body, "id")
            .and_then(|id| EntityId::new(id).ok())
            .ok_or_else(|| CreateError::Transport("Response did not include an id".to_string()))?;

        Ok(CreatedEntity { id, body })
    }
}

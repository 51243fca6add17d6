//! File upload client
//!
//! Sends the staged attachment to the backend as a multipart form and turns
//! the returned identifier into an [`UploadResult`].

use crate::types::attachment::{Attachment, UploadResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Upload failures
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Upload rejected with status {0}")]
    Status(StatusCode),
    #[error("Invalid upload response: {0}")]
    InvalidResponse(String),
    #[error("Attachment content is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
}

/// Something that can store an attachment and report where it lives
#[async_trait]
pub trait FileUploader: Send + Sync {
    async fn upload(&self, attachment: &Attachment) -> Result<UploadResult, UploadError>;
}

#[async_trait]
impl<T: FileUploader + ?Sized> FileUploader for Arc<T> {
    async fn upload(&self, attachment: &Attachment) -> Result<UploadResult, UploadError> {
        (**self).upload(attachment).await
    }
}

/// Uploads to `{base_url}/file/upload`
#[derive(Clone, Debug)]
pub struct HttpUploader {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUploader {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_url(&self) -> String {
        format!("{}/file/upload", self.base_url)
    }

    /// Where the backend serves a stored file
    pub fn download_url(&self, remote_id: &str) -> String {
        format!("{}/file/download/{}", self.base_url, remote_id)
    }
}

#[async_trait]
impl FileUploader for HttpUploader {
    async fn upload(&self, attachment: &Attachment) -> Result<UploadResult, UploadError> {
        let bytes = attachment.decode_content()?;
        let part = Part::bytes(bytes)
            .file_name(attachment.name.clone())
            .mime_str(&attachment.mime_type)?;
        let form = Form::new().part("file", part);

        tracing::debug!(
            "Uploading {} ({} bytes) to {}",
            attachment.name,
            attachment.size_bytes,
            self.upload_url()
        );

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UploadError::Status(response.status()));
        }

        let body = response.text().await?;
        let remote_id = parse_remote_id(&body)?;

        tracing::info!("Uploaded {} as {}", attachment.name, remote_id);

        Ok(UploadResult {
            download_url: self.download_url(&remote_id),
            remote_id,
            name: attachment.name.clone(),
            mime_type: attachment.mime_type.clone(),
            size_bytes: attachment.size_bytes,
        })
    }
}

/// Pull the `id` out of an upload response body.
///
/// String and numeric ids are accepted; anything else is malformed.
fn parse_remote_id(body: &str) -> Result<String, UploadError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| UploadError::InvalidResponse(format!("not JSON: {}", e)))?;

    match value.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        Some(other) => Err(UploadError::InvalidResponse(format!(
            "unexpected id value: {}",
            other
        ))),
        None => Err(UploadError::InvalidResponse("missing id field".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_trim_trailing_slash() {
        let uploader = HttpUploader::new("http://localhost:8001/");
        assert_eq!(uploader.base_url(), "http://localhost:8001");
        assert_eq!(uploader.upload_url(), "http://localhost:8001/file/upload");
        assert_eq!(
            uploader.download_url("abc123"),
            "http://localhost:8001/file/download/abc123"
        );
    }

    #[test]
    fn test_parse_string_id() {
        assert_eq!(
            parse_remote_id(r#"{"id": "abc123", "filename": "a.png"}"#).unwrap(),
            "abc123"
        );
    }

    #[test]
    fn test_parse_numeric_id() {
        assert_eq!(parse_remote_id(r#"{"id": 42}"#).unwrap(), "42");
    }

    #[test]
    fn test_parse_rejects_malformed_bodies() {
        assert!(matches!(
            parse_remote_id("not json"),
            Err(UploadError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_remote_id(r#"{"name": "a.png"}"#),
            Err(UploadError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_remote_id(r#"{"id": null}"#),
            Err(UploadError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_remote_id(r#"{"id": ""}"#),
            Err(UploadError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_remote_id(r#"["abc123"]"#),
            Err(UploadError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_base64_fails_before_request() {
        let uploader = HttpUploader::new("http://127.0.0.1:9");
        let attachment = Attachment {
            name: "a.txt".to_string(),
            mime_type: "text/plain".to_string(),
            size_bytes: 3,
            base64_content: "!!not base64!!".to_string(),
        };
        assert!(matches!(
            uploader.upload(&attachment).await,
            Err(UploadError::Encoding(_))
        ));
    }
}

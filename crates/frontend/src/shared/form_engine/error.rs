//! Error types of the form engine
//!
//! Every error here is recoverable: it ends up as a notification or as a
//! message next to a field, never as a panic.

use std::collections::BTreeMap;
use thiserror::Error;

/// Failure of a call to the CMS backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("request failed"))]
    Status { status: u16, detail: Option<String> },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error from a non-2xx response body.
    ///
    /// The backend reports problems as `{"error": "..."}` or `{"message": "..."}`;
    /// a short plain-text body is used as is.
    pub fn from_status(status: u16, body: &str) -> Self {
        ApiError::Status {
            status,
            detail: extract_detail(body),
        }
    }

    /// Text shown to the user: backend detail when present
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            other => other.to_string(),
        }
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message", "detail"] {
            match value.get(key) {
                Some(serde_json::Value::String(s)) if !s.is_empty() => return Some(s.clone()),
                Some(serde_json::Value::Array(items)) if !items.is_empty() => {
                    let joined = items
                        .iter()
                        .map(|i| i.as_str().map(str::to_string).unwrap_or_else(|| i.to_string()))
                        .collect::<Vec<_>>()
                        .join("; ");
                    return Some(joined);
                }
                _ => {}
            }
        }
        return None;
    }
    if body.len() <= 200 && !body.starts_with('<') {
        return Some(body.to_string());
    }
    None
}

/// Failure in the image staging sub-machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("Unsupported file type \"{mime}\". Allowed: {allowed}")]
    InvalidType { mime: String, allowed: String },

    #[error("File is too large ({size} bytes, maximum is {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("Select an image before uploading")]
    NoFileStaged,

    #[error("Image upload is already in progress")]
    UploadInProgress,

    #[error("Image upload failed: {}", .0.user_message())]
    Upload(ApiError),
}

/// Field path -> message, as produced by the validator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a path. The first message for a path wins.
    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Reasons a submit attempt does not reach the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("The form is already being saved")]
    AlreadySubmitting,

    #[error("Image upload is still in progress")]
    UploadInProgress,

    #[error("The selected image has not been uploaded yet")]
    ImageNotUploaded,

    #[error("Please fix {} highlighted field(s)", .0.len())]
    Invalid(FieldErrors),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_detail_from_json_error() {
        let err = ApiError::from_status(409, r#"{"error":"Slug already exists"}"#);
        assert_eq!(err.user_message(), "Slug already exists");
        assert_eq!(err.to_string(), "HTTP 409: Slug already exists");
    }

    #[test]
    fn test_status_detail_from_message_array() {
        let err = ApiError::from_status(400, r#"{"message":["slug must be unique","title too short"]}"#);
        assert_eq!(err.user_message(), "slug must be unique; title too short");
    }

    #[test]
    fn test_status_without_detail() {
        let err = ApiError::from_status(502, "<html>Bad gateway</html>");
        assert_eq!(err.user_message(), "HTTP 502: request failed");
        let err = ApiError::from_status(500, "{}");
        assert_eq!(err.user_message(), "HTTP 500: request failed");
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.insert("title_az", "Title is required");
        errors.insert("title_az", "Title is too short");
        assert_eq!(errors.get("title_az"), Some("Title is required"));
        assert_eq!(errors.len(), 1);
    }
}

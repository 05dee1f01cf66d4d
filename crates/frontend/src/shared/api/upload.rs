use super::{network, read_json, BrowserFile};
use crate::shared::api_utils::api_url;
use crate::shared::config::config;
use crate::shared::form_engine::{ApiError, ImageUploader};
use async_trait::async_trait;
use contracts::shared::UploadedImage;
use gloo_net::http::Request;
use web_sys::{FormData, RequestCredentials};

/// Multipart upload to the single-file endpoint: `file` plus `alt`
#[derive(Debug, Clone, Copy, Default)]
pub struct RestImageUploader;

/// Text parts sent next to the file; `alt` goes out even when blank
fn text_parts(alt: &str) -> [(&'static str, &str); 1] {
    [("alt", alt.trim())]
}

fn form_error(e: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Network(format!("{:?}", e))
}

#[async_trait(?Send)]
impl ImageUploader<BrowserFile> for RestImageUploader {
    async fn upload(&self, file: &BrowserFile, alt: &str) -> Result<UploadedImage, ApiError> {
        let form = FormData::new().map_err(form_error)?;
        form.append_with_blob_and_filename("file", file.as_blob(), &file.file_name())
            .map_err(form_error)?;
        for (name, value) in text_parts(alt) {
            form.append_with_str(name, value).map_err(form_error)?;
        }

        let response = Request::post(&api_url(&config().api.upload_path))
            .credentials(RequestCredentials::Include)
            .body(form)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alt_is_sent_even_when_empty() {
        assert_eq!(text_parts(""), [("alt", "")]);
        assert_eq!(text_parts("  Logo "), [("alt", "Logo")]);
    }
}

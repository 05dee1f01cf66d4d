//! Browser implementations of the form engine collaborators

pub mod browser_file;
pub mod resource;
pub mod upload;

pub use browser_file::{BrowserFile, BrowserObjectUrls};
pub use resource::RestResourceApi;
pub use upload::RestImageUploader;

use crate::shared::form_engine::ApiError;
use gloo_net::http::Response;
use serde::de::DeserializeOwned;

/// Turn a response into `T`, or into an `ApiError` carrying the backend detail
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_status(response.status(), &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub(crate) fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

use super::{network, read_json};
use crate::shared::api_utils::api_base;
use crate::shared::form_engine::{ApiError, ResourceApi};
use async_trait::async_trait;
use contracts::domain::common::{RecordKey, ResourceKind, ResourceRecord};
use contracts::shared::{Lang, ListQuery, ListResponse};
use gloo_net::http::Request;
use serde_json::Value;
use web_sys::RequestCredentials;

/// CRUD client for one resource kind. The session cookie is sent with every request.
#[derive(Debug, Clone, Copy)]
pub struct RestResourceApi {
    kind: ResourceKind,
}

impl RestResourceApi {
    pub fn new(kind: ResourceKind) -> Self {
        Self { kind }
    }

    fn collection_url(&self) -> String {
        format!("{}{}", api_base(), self.kind.api_path())
    }

    fn item_url(&self, key: &RecordKey) -> String {
        let segment = match key {
            RecordKey::Id(id) => id.to_string(),
            RecordKey::Slug(slug) => urlencoding::encode(slug).into_owned(),
        };
        format!("{}/{}", self.collection_url(), segment)
    }
}

#[async_trait(?Send)]
impl ResourceApi for RestResourceApi {
    async fn list(&self, query: &ListQuery) -> Result<ListResponse<ResourceRecord>, ApiError> {
        let qs = serde_qs::to_string(query).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = Request::get(&format!("{}?{}", self.collection_url(), qs))
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn get(&self, key: &RecordKey, lang: Lang) -> Result<ResourceRecord, ApiError> {
        let response = Request::get(&self.item_url(key))
            .query([("lang", lang.code())])
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn create(&self, payload: &Value) -> Result<ResourceRecord, ApiError> {
        let response = Request::post(&self.collection_url())
            .credentials(RequestCredentials::Include)
            .json(payload)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn update(&self, id: i64, payload: &Value) -> Result<ResourceRecord, ApiError> {
        let response = Request::put(&self.item_url(&RecordKey::Id(id)))
            .credentials(RequestCredentials::Include)
            .json(payload)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = Request::delete(&self.item_url(&RecordKey::Id(id)))
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(network)?;
        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(response.status(), &body));
        }
        Ok(())
    }
}

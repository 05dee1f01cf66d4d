//! In-memory collaborators for engine tests

use super::collaborators::{
    FormServices, ImageUploader, Navigator, Notifier, PickedFile, ResourceApi,
};
use super::error::ApiError;
use super::object_url::ObjectUrlFactory;
use super::validation::SchemaValidator;
use async_trait::async_trait;
use contracts::domain::common::{RecordKey, ResourceKind, ResourceRecord};
use contracts::shared::{Lang, ListQuery, ListResponse, UploadedImage};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl TestFile {
    pub fn new(name: &str, mime: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            mime: mime.to_string(),
            size,
        }
    }

    pub fn png(name: &str) -> Self {
        Self::new(name, "image/png", 2048)
    }
}

impl PickedFile for TestFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }
}

/// Records every created and revoked URL
#[derive(Default)]
pub struct CountingUrls {
    pub created: RefCell<Vec<String>>,
    pub revoked: RefCell<Vec<String>>,
}

impl CountingUrls {
    pub fn live(&self) -> usize {
        self.created.borrow().len() - self.revoked.borrow().len()
    }
}

impl<F: PickedFile> ObjectUrlFactory<F> for CountingUrls {
    fn create(&self, file: &F) -> Option<String> {
        let url = format!("blob:{}#{}", file.name(), self.created.borrow().len());
        self.created.borrow_mut().push(url.clone());
        Some(url)
    }

    fn revoke(&self, url: &str) {
        self.revoked.borrow_mut().push(url.to_string());
    }
}

/// Backend double. A request for a gated language waits until the gate is
/// released with `notify_one`.
#[derive(Default)]
pub struct MockApi {
    pub records: RefCell<HashMap<Lang, ResourceRecord>>,
    pub gates: RefCell<HashMap<Lang, Rc<Notify>>>,
    pub get_calls: RefCell<Vec<(RecordKey, Lang)>>,
    pub created: RefCell<Vec<Value>>,
    pub updated: RefCell<Vec<(i64, Value)>>,
    pub save_error: RefCell<Option<ApiError>>,
}

impl MockApi {
    pub fn with_record(self, lang: Lang, record: ResourceRecord) -> Self {
        self.records.borrow_mut().insert(lang, record);
        self
    }

    pub fn gate(&self, lang: Lang) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        self.gates.borrow_mut().insert(lang, Rc::clone(&gate));
        gate
    }

    fn saved(&self, id: i64) -> Result<ResourceRecord, ApiError> {
        match self.save_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(ResourceRecord::new(id)),
        }
    }
}

#[async_trait(?Send)]
impl ResourceApi for MockApi {
    async fn list(&self, _query: &ListQuery) -> Result<ListResponse<ResourceRecord>, ApiError> {
        let data: Vec<ResourceRecord> = self.records.borrow().values().cloned().collect();
        Ok(ListResponse {
            total_items: data.len() as u64,
            total_pages: 1,
            data,
        })
    }

    async fn get(&self, key: &RecordKey, lang: Lang) -> Result<ResourceRecord, ApiError> {
        self.get_calls.borrow_mut().push((key.clone(), lang));
        let gate = self.gates.borrow().get(&lang).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.records
            .borrow()
            .get(&lang)
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, r#"{"error":"Not found"}"#))
    }

    async fn create(&self, payload: &Value) -> Result<ResourceRecord, ApiError> {
        self.created.borrow_mut().push(payload.clone());
        self.saved(100)
    }

    async fn update(&self, id: i64, payload: &Value) -> Result<ResourceRecord, ApiError> {
        self.updated.borrow_mut().push((id, payload.clone()));
        self.saved(id)
    }

    async fn delete(&self, _id: i64) -> Result<(), ApiError> {
        Ok(())
    }
}

pub struct MockUploader {
    pub calls: Cell<usize>,
    pub alts: RefCell<Vec<String>>,
    pub gate: RefCell<Option<Rc<Notify>>>,
    pub result: RefCell<Result<UploadedImage, ApiError>>,
}

impl MockUploader {
    pub fn returning(image: UploadedImage) -> Self {
        Self {
            calls: Cell::new(0),
            alts: RefCell::new(Vec::new()),
            gate: RefCell::new(None),
            result: RefCell::new(Ok(image)),
        }
    }

    pub fn gate(&self) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        *self.gate.borrow_mut() = Some(Rc::clone(&gate));
        gate
    }
}

#[async_trait(?Send)]
impl ImageUploader<TestFile> for MockUploader {
    async fn upload(&self, _file: &TestFile, alt: &str) -> Result<UploadedImage, ApiError> {
        self.calls.set(self.calls.get() + 1);
        self.alts.borrow_mut().push(alt.to_string());
        let gate = self.gate.borrow().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.result.borrow().clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub successes: RefCell<Vec<String>>,
    pub errors: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub visits: RefCell<Vec<ResourceKind>>,
}

impl Navigator for RecordingNavigator {
    fn to_list(&self, kind: ResourceKind) {
        self.visits.borrow_mut().push(kind);
    }
}

/// All doubles of one test, plus the services bundle built from them
pub struct Harness {
    pub api: Rc<MockApi>,
    pub uploader: Rc<MockUploader>,
    pub notifier: Rc<RecordingNotifier>,
    pub navigator: Rc<RecordingNavigator>,
    pub urls: Rc<CountingUrls>,
}

impl Harness {
    pub fn new(api: MockApi, uploader: MockUploader) -> Self {
        Self {
            api: Rc::new(api),
            uploader: Rc::new(uploader),
            notifier: Rc::new(RecordingNotifier::default()),
            navigator: Rc::new(RecordingNavigator::default()),
            urls: Rc::new(CountingUrls::default()),
        }
    }

    pub fn services(&self) -> FormServices<TestFile> {
        FormServices {
            api: self.api.clone(),
            uploader: self.uploader.clone(),
            validator: Rc::new(SchemaValidator),
            notifier: self.notifier.clone(),
            navigator: self.navigator.clone(),
        }
    }

    pub fn url_factory(&self) -> Rc<dyn ObjectUrlFactory<TestFile>> {
        self.urls.clone()
    }
}

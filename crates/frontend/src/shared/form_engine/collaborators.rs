//! Seams between the form engine and the outside world
//!
//! The browser implementations live in `shared::api`, `shared::notifications`
//! and `layout::navigation`; tests plug in in-memory ones.

use super::binder::FormValues;
use super::descriptor::FormDescriptor;
use super::error::{ApiError, FieldErrors};
use async_trait::async_trait;
use contracts::domain::common::{RecordKey, ResourceKind, ResourceRecord};
use contracts::shared::{Lang, ListQuery, ListResponse, UploadedImage};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A file picked by the user, not yet uploaded
pub trait PickedFile: Clone + 'static {
    fn name(&self) -> String;
    fn mime_type(&self) -> String;
    fn size(&self) -> u64;
}

/// CRUD access to one resource kind
#[async_trait(?Send)]
pub trait ResourceApi {
    async fn list(&self, query: &ListQuery) -> Result<ListResponse<ResourceRecord>, ApiError>;
    async fn get(&self, key: &RecordKey, lang: Lang) -> Result<ResourceRecord, ApiError>;
    async fn create(&self, payload: &Value) -> Result<ResourceRecord, ApiError>;
    async fn update(&self, id: i64, payload: &Value) -> Result<ResourceRecord, ApiError>;
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}

#[async_trait(?Send)]
pub trait ImageUploader<F> {
    async fn upload(&self, file: &F, alt: &str) -> Result<UploadedImage, ApiError>;
}

pub trait Validator {
    fn validate(&self, descriptor: &FormDescriptor, values: &FormValues) -> Result<(), FieldErrors>;
}

pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

pub trait Navigator {
    /// Leave the form for the list of its resource
    fn to_list(&self, kind: ResourceKind);
}

/// Access to a form session that may already be gone
///
/// `with_session` returns `None` after the owning view was torn down, so a
/// late network result has nowhere to land.
pub trait SessionHandle<S> {
    fn with_session<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R>;
}

impl<S> SessionHandle<S> for Rc<RefCell<S>> {
    fn with_session<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        let mut session = self.try_borrow_mut().ok()?;
        Some(f(&mut session))
    }
}

impl<S> SessionHandle<S> for Weak<RefCell<S>> {
    fn with_session<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        let strong = self.upgrade()?;
        let mut session = strong.try_borrow_mut().ok()?;
        Some(f(&mut session))
    }
}

/// Everything a form needs besides its own state
pub struct FormServices<F> {
    pub api: Rc<dyn ResourceApi>,
    pub uploader: Rc<dyn ImageUploader<F>>,
    pub validator: Rc<dyn Validator>,
    pub notifier: Rc<dyn Notifier>,
    pub navigator: Rc<dyn Navigator>,
}

impl<F> Clone for FormServices<F> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            uploader: Rc::clone(&self.uploader),
            validator: Rc::clone(&self.validator),
            notifier: Rc::clone(&self.notifier),
            navigator: Rc::clone(&self.navigator),
        }
    }
}

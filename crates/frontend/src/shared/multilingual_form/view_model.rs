use crate::layout::navigation::{use_navigation, AppNavigation, Page};
use crate::shared::api::{BrowserFile, BrowserObjectUrls, RestImageUploader, RestResourceApi};
use crate::shared::config::config;
use crate::shared::form_engine::{
    driver, FormDescriptor, FormServices, FormSession, ImageStatus, MultilingualFormBinder,
    ObjectUrlFactory, SchemaValidator, SessionHandle,
};
use crate::shared::notifications::use_notifications;
use contracts::domain::common::ResourceKind;
use contracts::shared::Lang;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

/// A disposed signal yields `None`, so results arriving after the form
/// was closed are dropped
impl<S: 'static> SessionHandle<S> for RwSignal<S, LocalStorage> {
    fn with_session<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// ViewModel for the multilingual edit form
///
/// Holds the form session and the browser collaborators; commands start the
/// async drivers and the view reads state through the derived helpers.
#[derive(Clone, Copy)]
pub struct MultilingualFormVm {
    pub kind: ResourceKind,
    pub record_id: Option<i64>,
    session: RwSignal<FormSession<BrowserFile>, LocalStorage>,
    services: StoredValue<FormServices<BrowserFile>, LocalStorage>,
    navigation: AppNavigation,
    pub alt_text: RwSignal<String>,
}

impl MultilingualFormVm {
    pub fn new(descriptor: FormDescriptor, record_id: Option<i64>) -> Self {
        let kind = descriptor.kind;
        let navigation = use_navigation();
        let services = FormServices {
            api: Rc::new(RestResourceApi::new(kind)),
            uploader: Rc::new(RestImageUploader),
            validator: Rc::new(SchemaValidator),
            notifier: Rc::new(use_notifications()),
            navigator: Rc::new(navigation),
        };
        let urls: Rc<dyn ObjectUrlFactory<BrowserFile>> = Rc::new(BrowserObjectUrls);
        let session = FormSession::new(
            Rc::new(descriptor),
            record_id,
            config().upload.clone(),
            urls,
            config().languages.default,
        );

        Self {
            kind,
            record_id,
            session: RwSignal::new_local(session),
            services: StoredValue::new_local(services),
            navigation,
            alt_text: RwSignal::new(String::new()),
        }
    }

    fn services(&self) -> Option<FormServices<BrowserFile>> {
        self.services.try_get_value()
    }

    // ========================================================================
    // Derived state
    // ========================================================================

    /// Read the session; `None` once the form is gone
    pub fn read<R>(&self, f: impl FnOnce(&FormSession<BrowserFile>) -> R) -> Option<R> {
        self.session.try_with(f)
    }

    pub fn active_lang(&self) -> Lang {
        self.read(|s| s.active_lang()).unwrap_or_default()
    }

    /// Active language for event handlers, without subscribing
    pub fn current_lang(&self) -> Lang {
        self.session
            .try_with_untracked(|s| s.active_lang())
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.read(|s| s.is_loading()).unwrap_or(false)
    }

    pub fn is_submitting(&self) -> bool {
        self.read(|s| s.is_submitting()).unwrap_or(false)
    }

    pub fn has_unsaved_edits(&self) -> bool {
        self.read(|s| s.tabs().has_unsaved_edits()).unwrap_or(false)
    }

    pub fn is_visited(&self, lang: Lang) -> bool {
        self.read(|s| s.tabs().is_visited(lang)).unwrap_or(false)
    }

    pub fn image_status(&self) -> ImageStatus {
        self.read(|s| s.image_status()).unwrap_or(ImageStatus::Empty)
    }

    pub fn image_url(&self) -> Option<String> {
        self.read(|s| s.image_url()).flatten()
    }

    pub fn image_error(&self) -> Option<String> {
        self.read(|s| s.image().error().map(|e| e.to_string()))
            .flatten()
    }

    pub fn staged_file_name(&self) -> Option<String> {
        self.read(|s| s.image().staged_file().map(|f| f.file_name()))
            .flatten()
    }

    pub fn field_error(&self, path: &str) -> Option<String> {
        self.read(|s| s.field_error(path)).flatten()
    }

    /// Save is blocked while either request is running
    pub fn is_busy(&self) -> bool {
        self.read(|s| s.is_submitting() || s.image().is_uploading())
            .unwrap_or(true)
    }

    pub fn title(&self) -> String {
        match self.record_id {
            Some(id) => format!("{} #{}", self.kind.title(), id),
            None => format!("{}: new", self.kind.title()),
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Load the record for the initial language (edit forms only)
    pub fn mount(&self) {
        let Some(services) = self.services() else {
            return;
        };
        let session = self.session;
        spawn_local(async move {
            driver::hydrate(&session, &services).await;
        });
    }

    pub fn switch_language(&self, lang: Lang) {
        let Some(services) = self.services() else {
            return;
        };
        let session = self.session;
        spawn_local(async move {
            driver::switch_language(&session, &services, lang).await;
        });
    }

    /// Apply a field edit through the binder
    pub fn edit(&self, f: impl FnOnce(&mut MultilingualFormBinder) -> bool) {
        self.session.with_session(|s| s.edit(f));
    }

    pub fn select_file(&self, file: BrowserFile) {
        if let Some(Err(err)) = self.session.with_session(|s| s.select_file(file)) {
            if let Some(services) = self.services() {
                services.notifier.error(&err.to_string());
            }
        }
    }

    pub fn upload_image(&self) {
        let Some(services) = self.services() else {
            return;
        };
        let session = self.session;
        let alt = self.alt_text.get_untracked();
        spawn_local(async move {
            driver::upload_image(&session, &services, &alt).await;
        });
    }

    pub fn clear_image(&self) {
        self.session.with_session(|s| s.clear_image());
        self.alt_text.set(String::new());
    }

    pub fn save(&self) {
        let Some(services) = self.services() else {
            return;
        };
        let session = self.session;
        spawn_local(async move {
            driver::submit(&session, &services).await;
        });
    }

    pub fn cancel(&self) {
        self.navigation.go(Page::List(self.kind));
    }

    /// Release the preview URL and invalidate outstanding requests
    pub fn teardown(&self) {
        let _ = self.session.try_update_untracked(|s| s.teardown());
    }
}

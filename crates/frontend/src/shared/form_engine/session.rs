//! FormSession
//!
//! One per open form. Owns tabs, binder, image staging, sync and submit
//! state and is the only place they are mutated from.

use super::binder::{FormValues, MultilingualFormBinder};
use super::collaborators::{PickedFile, Validator};
use super::descriptor::FormDescriptor;
use super::error::{ApiError, FieldErrors, ImageError, SubmitBlocked};
use super::image_staging::{ImageStagingController, ImageStatus, UploadOutcome, UploadPolicy, UploadTicket};
use super::language_tabs::EditSession;
use super::object_url::ObjectUrlFactory;
use super::submit::{SubmitMode, SubmitOutcome, SubmitPipeline, SubmitRequest, SubmitTicket};
use super::sync_policy::{FetchRequest, FetchTicket, RecordSyncPolicy, SyncOutcome};
use contracts::domain::common::{ResourceKind, ResourceRecord};
use contracts::shared::{Lang, UploadedImage};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Uninitialized,
    Hydrating(Lang),
    Idle,
    Submitting,
    SubmittedOk,
}

pub struct FormSession<F> {
    phase: FormPhase,
    tabs: EditSession,
    binder: MultilingualFormBinder,
    image: ImageStagingController<F>,
    sync: RecordSyncPolicy,
    submit: SubmitPipeline,
    field_errors: FieldErrors,
    torn_down: bool,
}

impl<F: PickedFile> FormSession<F> {
    /// `record_id` is `None` for a create form
    pub fn new(
        descriptor: Rc<FormDescriptor>,
        record_id: Option<i64>,
        policy: UploadPolicy,
        urls: Rc<dyn ObjectUrlFactory<F>>,
        initial: Lang,
    ) -> Self {
        Self {
            phase: FormPhase::Uninitialized,
            tabs: EditSession::new(initial),
            binder: MultilingualFormBinder::initialize(descriptor),
            image: ImageStagingController::new(policy, urls),
            sync: RecordSyncPolicy::new(record_id),
            submit: SubmitPipeline::new(record_id),
            field_errors: FieldErrors::new(),
            torn_down: false,
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn kind(&self) -> ResourceKind {
        self.binder.descriptor().kind
    }

    pub fn record_id(&self) -> Option<i64> {
        self.sync.record_id()
    }

    pub fn mode(&self) -> SubmitMode {
        self.submit.mode()
    }

    pub fn tabs(&self) -> &EditSession {
        &self.tabs
    }

    pub fn active_lang(&self) -> Lang {
        self.tabs.active()
    }

    pub fn binder(&self) -> &MultilingualFormBinder {
        &self.binder
    }

    pub fn values(&self) -> &FormValues {
        self.binder.values()
    }

    pub fn image(&self) -> &ImageStagingController<F> {
        &self.image
    }

    pub fn image_status(&self) -> ImageStatus {
        self.image.status()
    }

    pub fn image_url(&self) -> Option<String> {
        self.image.display_url().map(str::to_string)
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn field_error(&self, path: &str) -> Option<String> {
        self.field_errors.get(path).map(str::to_string)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, FormPhase::Hydrating(_)) || self.sync.is_fetching(self.tabs.active())
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_submitting()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    pub fn mount(&mut self) -> Option<FetchRequest> {
        if self.torn_down || self.phase != FormPhase::Uninitialized {
            return None;
        }
        let request = self.sync.on_mount(&mut self.tabs);
        self.phase = match &request {
            Some(r) => FormPhase::Hydrating(r.lang),
            None => FormPhase::Idle,
        };
        log::debug!("{} form mounted, phase {:?}", self.kind(), self.phase);
        request
    }

    pub fn switch_language(&mut self, lang: Lang) -> Option<FetchRequest> {
        if self.torn_down {
            return None;
        }
        self.sync.on_switch(&mut self.tabs, lang)
    }

    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<ResourceRecord, ApiError>,
    ) -> SyncOutcome {
        let outcome = self.sync.complete(
            ticket,
            result.map_err(|e| e.user_message()),
            &mut self.tabs,
            &mut self.binder,
        );
        if let SyncOutcome::Applied { .. } = outcome {
            self.image.adopt_server_image(self.binder.values().image.as_ref());
        }
        if outcome != SyncOutcome::Discarded && self.phase == FormPhase::Hydrating(ticket.lang()) {
            self.phase = FormPhase::Idle;
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Apply a local edit. Ignored while saving.
    pub fn edit(&mut self, f: impl FnOnce(&mut MultilingualFormBinder) -> bool) -> bool {
        if self.torn_down || self.phase == FormPhase::Submitting {
            return false;
        }
        let changed = f(&mut self.binder);
        if changed {
            self.tabs.mark_edited();
            if self.phase == FormPhase::SubmittedOk {
                self.phase = FormPhase::Idle;
            }
        }
        changed
    }

    pub fn select_file(&mut self, file: F) -> Result<(), ImageError> {
        self.image.select_file(file)
    }

    pub fn begin_upload(&mut self) -> Result<(UploadTicket, F), ImageError> {
        self.image.begin_upload()
    }

    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<UploadedImage, ApiError>,
    ) -> UploadOutcome {
        let outcome = self.image.finish_upload(ticket, result);
        if let UploadOutcome::Committed(image) = &outcome {
            self.binder.set_image(Some(image.clone()));
            self.tabs.mark_edited();
        }
        outcome
    }

    pub fn clear_image(&mut self) {
        self.image.clear();
        if self.binder.set_image(None) {
            self.tabs.mark_edited();
        }
    }

    // ------------------------------------------------------------------
    // Saving
    // ------------------------------------------------------------------

    pub fn begin_submit(&mut self, validator: &dyn Validator) -> Result<SubmitRequest, SubmitBlocked> {
        match self.submit.begin(&self.image, &self.binder, validator) {
            Ok(request) => {
                self.field_errors = FieldErrors::new();
                self.phase = FormPhase::Submitting;
                Ok(request)
            }
            Err(SubmitBlocked::Invalid(errors)) => {
                self.field_errors = errors.clone();
                Err(SubmitBlocked::Invalid(errors))
            }
            Err(blocked) => Err(blocked),
        }
    }

    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<ResourceRecord, ApiError>,
    ) -> SubmitOutcome {
        let outcome = self.submit.finish(ticket, result);
        match &outcome {
            SubmitOutcome::Created(_) => {
                self.binder.reset();
                self.image.clear();
                self.tabs.reset_after_successful_save();
                self.phase = FormPhase::SubmittedOk;
            }
            SubmitOutcome::Updated(_) => {
                self.tabs.reset_after_successful_save();
                self.phase = FormPhase::SubmittedOk;
            }
            SubmitOutcome::Failed(_) => self.phase = FormPhase::Idle,
            SubmitOutcome::Discarded => {}
        }
        outcome
    }

    /// The owning view is gone: drop previews, ignore late results
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.sync.teardown();
        self.submit.teardown();
        self.image.clear();
        log::debug!("{} form torn down", self.kind());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form_engine::descriptor::{FieldSpec, ImageRequirement};
    use crate::shared::form_engine::testing::{CountingUrls, TestFile};
    use crate::shared::form_engine::validation::SchemaValidator;
    use contracts::shared::Translation;

    fn descriptor() -> Rc<FormDescriptor> {
        Rc::new(
            FormDescriptor::new(ResourceKind::Blog)
                .localized(FieldSpec::text("title", "Title").required().min_len(5))
                .localized(FieldSpec::multiline("description", "Content").required().min_len(20))
                .image(ImageRequirement::Required),
        )
    }

    fn session(record_id: Option<i64>) -> (Rc<CountingUrls>, FormSession<TestFile>) {
        let urls = Rc::new(CountingUrls::default());
        let factory: Rc<dyn ObjectUrlFactory<TestFile>> = urls.clone();
        let session = FormSession::new(descriptor(), record_id, UploadPolicy::default(), factory, Lang::Az);
        (urls, session)
    }

    fn record(id: i64, lang: Lang, title: &str) -> ResourceRecord {
        let mut record = ResourceRecord::new(id);
        record.translations.push(
            Translation::new(lang)
                .with("title", title)
                .with("description", "Məzmun kifayət qədər uzundur."),
        );
        record
    }

    #[test]
    fn test_create_flow_with_uploaded_image() {
        let (urls, mut session) = session(None);
        assert_eq!(session.mount(), None);
        assert_eq!(session.phase(), FormPhase::Idle);

        session.edit(|b| b.set_localized("title", Lang::Az, "Test post"));
        session.edit(|b| b.set_localized("description", Lang::Az, "Bu, sınaq məzmunudur, uzun mətn."));
        session.select_file(TestFile::png("cover.png")).unwrap();
        let (ticket, file) = session.begin_upload().unwrap();
        assert_eq!(file.name, "cover.png");
        session.finish_upload(
            ticket,
            Ok(UploadedImage {
                id: 7,
                url: "/img/7.png".into(),
            }),
        );
        assert_eq!(urls.live(), 0);
        assert_eq!(session.image_url().as_deref(), Some("/img/7.png"));

        let request = session.begin_submit(&SchemaValidator).unwrap();
        assert_eq!(session.phase(), FormPhase::Submitting);
        assert_eq!(request.ticket.mode(), SubmitMode::Create);
        assert_eq!(request.payload["image"], 7);
        assert_eq!(request.payload["translations"][0]["title"], "Test post");
        assert_eq!(request.payload["translations"][0]["lang"], "az");

        // edits are ignored while saving
        assert!(!session.edit(|b| b.set_localized("title", Lang::Az, "changed")));

        let outcome = session.finish_submit(request.ticket, Ok(ResourceRecord::new(11)));
        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert_eq!(session.phase(), FormPhase::SubmittedOk);
        assert_eq!(session.values().localized("title", Lang::Az), "");
        assert_eq!(session.image_status(), ImageStatus::Empty);
        assert!(!session.tabs().has_unsaved_edits());
    }

    #[test]
    fn test_language_race_keeps_local_edit() {
        let (_, mut session) = session(Some(3));
        let az = session.mount().unwrap();
        assert_eq!(session.phase(), FormPhase::Hydrating(Lang::Az));
        session.finish_fetch(az.ticket, Ok(record(3, Lang::Az, "Köhnə")));
        assert_eq!(session.phase(), FormPhase::Idle);

        let en = session.switch_language(Lang::En).unwrap();
        session.edit(|b| b.set_localized("title", Lang::Az, "Yeni"));
        session.finish_fetch(en.ticket, Ok(record(3, Lang::En, "Old EN")));

        assert_eq!(session.values().localized("title", Lang::Az), "Yeni");
        assert_eq!(session.values().localized("title", Lang::En), "Old EN");
        assert!(session.tabs().has_unsaved_edits());
        // revisiting AZ must not refetch over the edit
        assert_eq!(session.switch_language(Lang::Az), None);
    }

    #[test]
    fn test_short_title_attaches_field_error() {
        let (_, mut session) = session(None);
        session.mount();
        session.edit(|b| b.set_localized("title", Lang::Az, "abc"));

        let blocked = session.begin_submit(&SchemaValidator).unwrap_err();
        assert!(matches!(blocked, SubmitBlocked::Invalid(_)));
        assert!(session.field_error("title_az").is_some());
        assert_eq!(session.phase(), FormPhase::Idle);
        assert!(!session.is_submitting());
    }

    #[test]
    fn test_failed_update_preserves_state() {
        let (_, mut session) = session(Some(8));
        let request = session.mount().unwrap();
        let mut server = record(8, Lang::Az, "Başlıq adı");
        server.image = Some(UploadedImage {
            id: 4,
            url: "/img/4.png".into(),
        });
        session.finish_fetch(request.ticket, Ok(server));
        assert_eq!(session.image_status(), ImageStatus::Uploaded);

        session.edit(|b| b.set_localized("title", Lang::Az, "Yeni başlıq"));
        let request = session.begin_submit(&SchemaValidator).unwrap();
        assert_eq!(request.ticket.mode(), SubmitMode::Update(8));

        let outcome = session.finish_submit(request.ticket, Err(ApiError::Network("offline".into())));
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(session.phase(), FormPhase::Idle);
        assert_eq!(session.values().localized("title", Lang::Az), "Yeni başlıq");
        assert_eq!(session.values().image.as_ref().map(|i| i.id), Some(4));
        assert!(session.tabs().has_unsaved_edits());
    }

    #[test]
    fn test_teardown_releases_preview_and_drops_results() {
        let (urls, mut session) = session(Some(2));
        let request = session.mount().unwrap();
        session.select_file(TestFile::png("a.png")).unwrap();
        session.teardown();
        assert_eq!(urls.live(), 0);
        assert_eq!(
            session.finish_fetch(request.ticket, Ok(record(2, Lang::Az, "late"))),
            SyncOutcome::Discarded
        );
        assert!(!session.edit(|b| b.set_localized("title", Lang::Az, "x")));
    }
}

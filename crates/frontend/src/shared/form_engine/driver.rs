//! Async operations of a form
//!
//! Each driver takes a synchronous step on the session, awaits one network
//! call and hands the result back. Between the two steps the session may have
//! been torn down, in which case the result is dropped.

use super::collaborators::{FormServices, PickedFile, SessionHandle};
use super::image_staging::UploadOutcome;
use super::session::FormSession;
use super::submit::{SubmitMode, SubmitOutcome};
use super::sync_policy::{FetchRequest, SyncOutcome};
use contracts::domain::common::RecordKey;
use contracts::shared::Lang;

/// Mount the form and load the record for the initial language
pub async fn hydrate<F, H>(handle: &H, services: &FormServices<F>)
where
    F: PickedFile,
    H: SessionHandle<FormSession<F>>,
{
    if let Some(Some(request)) = handle.with_session(|s| s.mount()) {
        fetch(handle, services, request).await;
    }
}

pub async fn switch_language<F, H>(handle: &H, services: &FormServices<F>, lang: Lang)
where
    F: PickedFile,
    H: SessionHandle<FormSession<F>>,
{
    if let Some(Some(request)) = handle.with_session(|s| s.switch_language(lang)) {
        fetch(handle, services, request).await;
    }
}

async fn fetch<F, H>(handle: &H, services: &FormServices<F>, request: FetchRequest)
where
    F: PickedFile,
    H: SessionHandle<FormSession<F>>,
{
    log::debug!("fetching record {} for {}", request.id, request.lang);
    let result = services
        .api
        .get(&RecordKey::Id(request.id), request.lang)
        .await;
    match handle.with_session(|s| s.finish_fetch(request.ticket, result)) {
        Some(SyncOutcome::Failed { lang, message }) => {
            services.notifier.error(&format!(
                "Failed to load {} content: {}",
                lang.label(),
                message
            ));
        }
        Some(SyncOutcome::Discarded) | None => {
            log::debug!("record {} response dropped", request.id);
        }
        Some(SyncOutcome::Applied { .. }) => {}
    }
}

/// Upload the staged image. `alt` may be empty.
pub async fn upload_image<F, H>(handle: &H, services: &FormServices<F>, alt: &str)
where
    F: PickedFile,
    H: SessionHandle<FormSession<F>>,
{
    let (ticket, file) = match handle.with_session(|s| s.begin_upload()) {
        Some(Ok(started)) => started,
        Some(Err(err)) => {
            services.notifier.error(&err.to_string());
            return;
        }
        None => return,
    };

    log::debug!("uploading {} ({} bytes)", file.name(), file.size());
    let result = services.uploader.upload(&file, alt).await;

    match handle.with_session(|s| s.finish_upload(ticket, result)) {
        Some(UploadOutcome::Committed(image)) => {
            log::debug!("image committed as #{}", image.id);
            services.notifier.success("Image uploaded");
        }
        Some(UploadOutcome::Failed(err)) => services.notifier.error(&err.to_string()),
        Some(UploadOutcome::Discarded) | None => {}
    }
}

/// Validate and save. On success the user is taken back to the list.
pub async fn submit<F, H>(handle: &H, services: &FormServices<F>)
where
    F: PickedFile,
    H: SessionHandle<FormSession<F>>,
{
    let validator = services.validator.clone();
    let Some((kind, begun)) =
        handle.with_session(|s| (s.kind(), s.begin_submit(validator.as_ref())))
    else {
        return;
    };
    let request = match begun {
        Ok(request) => request,
        Err(blocked) => {
            services.notifier.error(&blocked.to_string());
            return;
        }
    };

    let result = match request.ticket.mode() {
        SubmitMode::Create => services.api.create(&request.payload).await,
        SubmitMode::Update(id) => services.api.update(id, &request.payload).await,
    };

    match handle.with_session(|s| s.finish_submit(request.ticket, result)) {
        Some(SubmitOutcome::Created(record)) => {
            log::info!("{} #{} created", kind, record.id);
            services.notifier.success("Created successfully");
            services.navigator.to_list(kind);
        }
        Some(SubmitOutcome::Updated(record)) => {
            log::info!("{} #{} updated", kind, record.id);
            services.notifier.success("Saved successfully");
            services.navigator.to_list(kind);
        }
        Some(SubmitOutcome::Failed(message)) => {
            services.notifier.error(&format!("Save failed: {}", message));
        }
        Some(SubmitOutcome::Discarded) | None => {}
    }
}

//! SubmitPipeline: guards, validation and create-or-update

use super::binder::MultilingualFormBinder;
use super::collaborators::{PickedFile, Validator};
use super::error::{ApiError, SubmitBlocked};
use super::image_staging::ImageStagingController;
use contracts::domain::common::ResourceRecord;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update(i64),
}

impl SubmitMode {
    pub fn for_record(id: Option<i64>) -> Self {
        id.map(SubmitMode::Update).unwrap_or(SubmitMode::Create)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    generation: u64,
    mode: SubmitMode,
}

impl SubmitTicket {
    pub fn mode(&self) -> SubmitMode {
        self.mode
    }
}

/// The request the caller sends to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub ticket: SubmitTicket,
    pub payload: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(ResourceRecord),
    Updated(ResourceRecord),
    /// Message for the user; form state is untouched
    Failed(String),
    Discarded,
}

#[derive(Debug, Clone, Default)]
pub struct SubmitPipeline {
    record_id: Option<i64>,
    in_flight: bool,
    generation: u64,
}

impl SubmitPipeline {
    pub fn new(record_id: Option<i64>) -> Self {
        Self {
            record_id,
            ..Self::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn mode(&self) -> SubmitMode {
        SubmitMode::for_record(self.record_id)
    }

    pub fn begin<F: PickedFile>(
        &mut self,
        image: &ImageStagingController<F>,
        binder: &MultilingualFormBinder,
        validator: &dyn Validator,
    ) -> Result<SubmitRequest, SubmitBlocked> {
        if self.in_flight {
            return Err(SubmitBlocked::AlreadySubmitting);
        }
        if image.is_uploading() {
            return Err(SubmitBlocked::UploadInProgress);
        }
        if image.has_pending_file() {
            return Err(SubmitBlocked::ImageNotUploaded);
        }
        validator
            .validate(binder.descriptor(), binder.values())
            .map_err(SubmitBlocked::Invalid)?;

        self.in_flight = true;
        let ticket = SubmitTicket {
            generation: self.generation,
            mode: self.mode(),
        };
        log::debug!("submitting {:?}", ticket.mode);
        Ok(SubmitRequest {
            ticket,
            payload: binder.to_wire_payload(),
        })
    }

    pub fn finish(
        &mut self,
        ticket: SubmitTicket,
        result: Result<ResourceRecord, ApiError>,
    ) -> SubmitOutcome {
        if ticket.generation != self.generation || !self.in_flight {
            return SubmitOutcome::Discarded;
        }
        self.in_flight = false;
        match (ticket.mode, result) {
            (SubmitMode::Create, Ok(record)) => SubmitOutcome::Created(record),
            (SubmitMode::Update(_), Ok(record)) => SubmitOutcome::Updated(record),
            (_, Err(err)) => {
                log::warn!("save failed: {}", err);
                SubmitOutcome::Failed(err.user_message())
            }
        }
    }

    pub fn teardown(&mut self) {
        self.in_flight = false;
        self.generation += 1;
    }
}

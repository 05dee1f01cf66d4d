//! ImageStagingController
//!
//! One pending image per form: picked file, local preview, upload, committed
//! server image. Network calls are done by the caller between
//! `begin_upload` and `finish_upload`.

use super::collaborators::PickedFile;
use super::error::{ApiError, ImageError};
use super::object_url::{ObjectUrl, ObjectUrlFactory};
use contracts::shared::UploadedImage;
use serde::Deserialize;
use std::rc::Rc;

/// Accepted image files
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    pub allowed_mime_types: Vec<String>,
    pub max_size_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_mime_types: ["image/jpeg", "image/png", "image/webp", "image/svg+xml", "image/gif"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_size_bytes: 5 * 1024 * 1024,
        }
    }
}

impl UploadPolicy {
    pub fn check<F: PickedFile>(&self, file: &F) -> Result<(), ImageError> {
        let mime = file.mime_type();
        if !self
            .allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&mime))
        {
            return Err(ImageError::InvalidType {
                mime,
                allowed: self.allowed_mime_types.join(", "),
            });
        }
        let size = file.size();
        if size > self.max_size_bytes {
            return Err(ImageError::TooLarge {
                size,
                max: self.max_size_bytes,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    Empty,
    Selected,
    Uploading,
    Uploaded,
    /// Upload failed; the file is still staged for a retry
    UploadFailed,
}

/// Issued by `begin_upload`, redeemed by `finish_upload`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Committed(UploadedImage),
    Failed(ImageError),
    /// The controller was cleared while the request was in flight
    Discarded,
}

pub struct ImageStagingController<F> {
    policy: UploadPolicy,
    urls: Rc<dyn ObjectUrlFactory<F>>,
    file: Option<F>,
    preview: Option<ObjectUrl>,
    committed: Option<UploadedImage>,
    error: Option<ImageError>,
    uploading: bool,
    generation: u64,
}

impl<F: PickedFile> ImageStagingController<F> {
    pub fn new(policy: UploadPolicy, urls: Rc<dyn ObjectUrlFactory<F>>) -> Self {
        Self {
            policy,
            urls,
            file: None,
            preview: None,
            committed: None,
            error: None,
            uploading: false,
            generation: 0,
        }
    }

    pub fn status(&self) -> ImageStatus {
        if self.uploading {
            ImageStatus::Uploading
        } else if self.file.is_some() && matches!(self.error, Some(ImageError::Upload(_))) {
            ImageStatus::UploadFailed
        } else if self.file.is_some() {
            ImageStatus::Selected
        } else if self.committed.is_some() {
            ImageStatus::Uploaded
        } else {
            ImageStatus::Empty
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// A file is picked but not uploaded yet
    pub fn has_pending_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn staged_file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn committed(&self) -> Option<&UploadedImage> {
        self.committed.as_ref()
    }

    pub fn error(&self) -> Option<&ImageError> {
        self.error.as_ref()
    }

    /// Local preview while a file is staged, otherwise the committed server URL
    pub fn display_url(&self) -> Option<&str> {
        self.preview
            .as_ref()
            .map(ObjectUrl::as_str)
            .or_else(|| self.committed.as_ref().map(|i| i.url.as_str()))
    }

    pub fn select_file(&mut self, file: F) -> Result<(), ImageError> {
        if self.uploading {
            return Err(ImageError::UploadInProgress);
        }
        if let Err(err) = self.policy.check(&file) {
            log::debug!("rejected image {}: {}", file.name(), err);
            self.error = Some(err.clone());
            return Err(err);
        }
        // Release the old preview before creating the next one
        self.preview = None;
        self.preview = ObjectUrl::acquire(&self.urls, &file);
        self.file = Some(file);
        self.error = None;
        Ok(())
    }

    /// Mark the staged file as uploading and hand it out for the request
    pub fn begin_upload(&mut self) -> Result<(UploadTicket, F), ImageError> {
        if self.uploading {
            return Err(ImageError::UploadInProgress);
        }
        let Some(file) = self.file.clone() else {
            self.error = Some(ImageError::NoFileStaged);
            return Err(ImageError::NoFileStaged);
        };
        self.uploading = true;
        self.error = None;
        let ticket = UploadTicket {
            generation: self.generation,
        };
        Ok((ticket, file))
    }

    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<UploadedImage, ApiError>,
    ) -> UploadOutcome {
        if ticket.generation != self.generation || !self.uploading {
            return UploadOutcome::Discarded;
        }
        self.uploading = false;
        match result {
            Ok(image) => {
                self.committed = Some(image.clone());
                self.file = None;
                self.preview = None;
                self.error = None;
                UploadOutcome::Committed(image)
            }
            Err(err) => {
                let err = ImageError::Upload(err);
                self.error = Some(err.clone());
                UploadOutcome::Failed(err)
            }
        }
    }

    /// Show an image that came with the server record
    pub fn adopt_server_image(&mut self, image: Option<&UploadedImage>) {
        if self.file.is_none() && self.committed.is_none() {
            self.committed = image.cloned();
        }
    }

    /// Drop everything; a running upload's result will be discarded
    pub fn clear(&mut self) {
        self.preview = None;
        self.file = None;
        self.committed = None;
        self.error = None;
        self.uploading = false;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form_engine::testing::{CountingUrls, TestFile};

    fn controller() -> (Rc<CountingUrls>, ImageStagingController<TestFile>) {
        let urls = Rc::new(CountingUrls::default());
        let factory: Rc<dyn ObjectUrlFactory<TestFile>> = urls.clone();
        (urls, ImageStagingController::new(UploadPolicy::default(), factory))
    }

    fn uploaded(id: i64) -> UploadedImage {
        UploadedImage {
            id,
            url: format!("/uploads/{id}.png"),
        }
    }

    #[test]
    fn test_preview_urls_released_on_replace_and_clear() {
        let (urls, mut controller) = controller();
        for i in 0..5 {
            controller
                .select_file(TestFile::png(&format!("photo-{i}.png")))
                .unwrap();
            assert_eq!(urls.live(), 1);
        }
        assert_eq!(urls.created.borrow().len(), 5);
        controller.clear();
        assert_eq!(urls.live(), 0);
        assert_eq!(controller.status(), ImageStatus::Empty);
    }

    #[test]
    fn test_dropping_controller_releases_preview() {
        let (urls, mut controller) = controller();
        controller.select_file(TestFile::png("a.png")).unwrap();
        drop(controller);
        assert_eq!(urls.live(), 0);
    }

    #[test]
    fn test_invalid_file_keeps_previous_selection() {
        let (urls, mut controller) = controller();
        controller.select_file(TestFile::png("ok.png")).unwrap();
        let preview = controller.display_url().map(str::to_string);

        let err = controller
            .select_file(TestFile::new("doc.pdf", "application/pdf", 10))
            .unwrap_err();
        assert!(matches!(err, ImageError::InvalidType { .. }));

        let err = controller
            .select_file(TestFile::new("huge.png", "image/png", 6 * 1024 * 1024))
            .unwrap_err();
        assert!(matches!(err, ImageError::TooLarge { .. }));

        assert_eq!(controller.display_url().map(str::to_string), preview);
        assert_eq!(controller.staged_file().map(|f| f.name.as_str()), Some("ok.png"));
        assert_eq!(urls.live(), 1);
    }

    #[test]
    fn test_rejected_pick_is_not_an_upload_failure() {
        let (_, mut controller) = controller();
        controller.select_file(TestFile::png("ok.png")).unwrap();
        assert!(controller
            .select_file(TestFile::new("doc.pdf", "application/pdf", 10))
            .is_err());
        assert_eq!(controller.status(), ImageStatus::Selected);
        assert!(matches!(controller.error(), Some(ImageError::InvalidType { .. })));

        let (ticket, _) = controller.begin_upload().unwrap();
        controller.finish_upload(ticket, Err(ApiError::Network("offline".into())));
        assert_eq!(controller.status(), ImageStatus::UploadFailed);
        assert!(controller
            .select_file(TestFile::new("huge.png", "image/png", 6 * 1024 * 1024))
            .is_err());
        assert_eq!(controller.status(), ImageStatus::Selected);
    }

    #[test]
    fn test_upload_without_file_is_an_error() {
        let (_, mut controller) = controller();
        assert_eq!(controller.begin_upload(), Err(ImageError::NoFileStaged));
        assert_eq!(controller.error(), Some(&ImageError::NoFileStaged));
        assert!(!controller.is_uploading());
    }

    #[test]
    fn test_second_upload_is_rejected_while_uploading() {
        let (_, mut controller) = controller();
        controller.select_file(TestFile::png("a.png")).unwrap();
        let (ticket, _) = controller.begin_upload().unwrap();
        assert_eq!(controller.begin_upload(), Err(ImageError::UploadInProgress));
        assert_eq!(
            controller.select_file(TestFile::png("b.png")),
            Err(ImageError::UploadInProgress)
        );

        let outcome = controller.finish_upload(ticket, Ok(uploaded(7)));
        assert_eq!(outcome, UploadOutcome::Committed(uploaded(7)));
        assert_eq!(controller.status(), ImageStatus::Uploaded);
        assert_eq!(controller.display_url(), Some("/uploads/7.png"));
    }

    #[test]
    fn test_failed_upload_keeps_file_for_retry() {
        let (urls, mut controller) = controller();
        controller.select_file(TestFile::png("a.png")).unwrap();
        let (ticket, _) = controller.begin_upload().unwrap();
        let outcome = controller.finish_upload(ticket, Err(ApiError::Network("offline".into())));
        assert!(matches!(outcome, UploadOutcome::Failed(ImageError::Upload(_))));
        assert_eq!(controller.status(), ImageStatus::UploadFailed);
        assert!(controller.has_pending_file());
        assert_eq!(urls.live(), 1);
        assert!(controller.begin_upload().is_ok());
    }

    #[test]
    fn test_result_after_clear_is_discarded() {
        let (_, mut controller) = controller();
        controller.select_file(TestFile::png("a.png")).unwrap();
        let (ticket, _) = controller.begin_upload().unwrap();
        controller.clear();
        assert_eq!(
            controller.finish_upload(ticket, Ok(uploaded(1))),
            UploadOutcome::Discarded
        );
        assert_eq!(controller.committed(), None);
    }

    #[test]
    fn test_server_urls_are_never_revoked() {
        let (urls, mut controller) = controller();
        controller.adopt_server_image(Some(&uploaded(3)));
        assert_eq!(controller.status(), ImageStatus::Uploaded);
        controller.clear();
        assert!(urls.revoked.borrow().is_empty());
    }
}

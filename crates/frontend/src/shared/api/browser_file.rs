use crate::shared::form_engine::{ObjectUrlFactory, PickedFile};
use web_sys::{Blob, File, Url};

/// A file from an `<input type="file">`
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserFile(File);

impl BrowserFile {
    pub fn new(file: File) -> Self {
        Self(file)
    }

    pub fn as_blob(&self) -> &Blob {
        &self.0
    }

    pub fn file_name(&self) -> String {
        self.0.name()
    }
}

impl PickedFile for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }
}

/// `URL.createObjectURL` / `URL.revokeObjectURL`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserObjectUrls;

impl ObjectUrlFactory<BrowserFile> for BrowserObjectUrls {
    fn create(&self, file: &BrowserFile) -> Option<String> {
        match Url::create_object_url_with_blob(file.as_blob()) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("failed to create preview for {}: {:?}", file.file_name(), e);
                None
            }
        }
    }

    fn revoke(&self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log::warn!("failed to revoke {}: {:?}", url, e);
        }
    }
}

//! Multi-language form engine
//!
//! Platform-independent state of the editing forms: tabs, bound values,
//! staged image, record sync and submit. Browser access goes through the
//! traits in `collaborators`.

pub mod binder;
pub mod collaborators;
pub mod descriptor;
pub mod driver;
pub mod error;
pub mod image_staging;
pub mod language_tabs;
pub mod object_url;
pub mod session;
pub mod submit;
pub mod sync_policy;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use binder::{FormValues, LangMap, MetaRow, MultilingualFormBinder, SideDraft, SideKind};
pub use collaborators::{
    FormServices, ImageUploader, Navigator, Notifier, PickedFile, ResourceApi, SessionHandle,
    Validator,
};
pub use descriptor::{CollectionSpec, FieldSpec, FormDescriptor, ImageRequirement, SideSpec};
pub use error::{ApiError, FieldErrors, ImageError, SubmitBlocked};
pub use image_staging::{ImageStagingController, ImageStatus, UploadPolicy};
pub use language_tabs::EditSession;
pub use object_url::ObjectUrlFactory;
pub use session::{FormPhase, FormSession};
pub use submit::SubmitMode;
pub use validation::{FieldRules, SchemaValidator};

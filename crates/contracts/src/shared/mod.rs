pub mod lang;
pub mod list;
pub mod media;
pub mod translation;

pub use lang::Lang;
pub use list::{ListQuery, ListResponse};
pub use media::UploadedImage;
pub use translation::{ContentSide, LocalizedRow, MetaEntry, MetaTranslation, Translation};

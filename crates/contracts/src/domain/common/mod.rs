//! Common types for all CMS resources

pub mod record;
pub mod resource_kind;

// Re-exports
pub use record::{RecordKey, ResourceRecord};
pub use resource_kind::ResourceKind;

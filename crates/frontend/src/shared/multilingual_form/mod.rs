//! Multilingual edit form
//!
//! MVVM split shared by every resource that has a form:
//! - view_model.rs: form session, collaborators and commands
//! - view.rs: Leptos components driven by a `FormDescriptor`

mod view;
mod view_model;

pub use view::MultilingualForm;
pub use view_model::MultilingualFormVm;

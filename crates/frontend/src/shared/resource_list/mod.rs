//! List screen shared by every resource
//!
//! - state.rs: paging and list language
//! - view.rs: table with pagination, create/edit navigation and delete

mod state;
mod view;

pub use state::ListState;
pub use view::ResourceList;

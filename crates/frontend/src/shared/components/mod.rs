pub mod pagination_controls;
pub mod ui;

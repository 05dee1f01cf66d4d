pub mod api;
pub mod api_utils;
pub mod components;
pub mod config;
pub mod form_engine;
pub mod icons;
pub mod multilingual_form;
pub mod notifications;
pub mod resource_list;

//! CMS resources
//!
//! Every resource module describes the form it is edited with (if any) and the
//! columns of its list. The form itself is the shared `MultilingualForm`.

pub mod a001_blog;
pub mod a002_news;
pub mod a003_service;
pub mod a004_project;
pub mod a005_about_section;
pub mod a006_course;
pub mod a007_testimonial;
pub mod a008_contact;
pub mod a009_consultation;
pub mod a010_redirect;
pub mod a011_statistic;
pub mod a012_contact_info;
mod article;

use crate::shared::form_engine::FormDescriptor;
use contracts::domain::common::{ResourceKind, ResourceRecord};
use contracts::shared::Lang;

/// Where a list cell takes its value from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// Translation field in the list language, falling back to AZ
    Localized,
    /// Non-localized field of the record
    Plain,
    Slug,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListColumn {
    pub label: &'static str,
    pub field: &'static str,
    pub source: ColumnSource,
}

impl ListColumn {
    pub const fn localized(label: &'static str, field: &'static str) -> Self {
        Self {
            label,
            field,
            source: ColumnSource::Localized,
        }
    }

    pub const fn plain(label: &'static str, field: &'static str) -> Self {
        Self {
            label,
            field,
            source: ColumnSource::Plain,
        }
    }

    pub const fn slug() -> Self {
        Self {
            label: "Slug",
            field: "slug",
            source: ColumnSource::Slug,
        }
    }

    pub const fn created_at() -> Self {
        Self {
            label: "Received",
            field: "created_at",
            source: ColumnSource::CreatedAt,
        }
    }

    /// Text of this column for one record
    pub fn cell(&self, record: &ResourceRecord, lang: Lang) -> String {
        match self.source {
            ColumnSource::Localized => record.display_title(self.field, lang),
            ColumnSource::Plain => record.plain(self.field).unwrap_or_default(),
            ColumnSource::Slug => record.slug.clone().unwrap_or_default(),
            ColumnSource::CreatedAt => record
                .created_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Form layout of a resource; `None` for read-only inbound resources
pub fn descriptor(kind: ResourceKind) -> Option<FormDescriptor> {
    match kind {
        ResourceKind::Blog => Some(a001_blog::descriptor()),
        ResourceKind::News => Some(a002_news::descriptor()),
        ResourceKind::Service => Some(a003_service::descriptor()),
        ResourceKind::Project => Some(a004_project::descriptor()),
        ResourceKind::AboutSection => Some(a005_about_section::descriptor()),
        ResourceKind::Course => Some(a006_course::descriptor()),
        ResourceKind::Testimonial => Some(a007_testimonial::descriptor()),
        ResourceKind::Contact | ResourceKind::Consultation => None,
        ResourceKind::Redirect => Some(a010_redirect::descriptor()),
        ResourceKind::Statistic => Some(a011_statistic::descriptor()),
        ResourceKind::ContactInfo => Some(a012_contact_info::descriptor()),
    }
}

pub fn list_columns(kind: ResourceKind) -> &'static [ListColumn] {
    match kind {
        ResourceKind::Blog
        | ResourceKind::News
        | ResourceKind::Service
        | ResourceKind::Project => article::LIST_COLUMNS,
        ResourceKind::AboutSection => a005_about_section::LIST_COLUMNS,
        ResourceKind::Course => a006_course::LIST_COLUMNS,
        ResourceKind::Testimonial => a007_testimonial::LIST_COLUMNS,
        ResourceKind::Contact => a008_contact::LIST_COLUMNS,
        ResourceKind::Consultation => a009_consultation::LIST_COLUMNS,
        ResourceKind::Redirect => a010_redirect::LIST_COLUMNS,
        ResourceKind::Statistic => a011_statistic::LIST_COLUMNS,
        ResourceKind::ContactInfo => a012_contact_info::LIST_COLUMNS,
    }
}

//! Counters shown on the home page ("500+ students")

use super::ListColumn;
use crate::shared::form_engine::{FieldSpec, FormDescriptor};
use contracts::domain::common::ResourceKind;

pub const LIST_COLUMNS: &[ListColumn] = &[
    ListColumn::localized("Title", "title"),
    ListColumn::plain("Value", "value"),
];

pub fn descriptor() -> FormDescriptor {
    FormDescriptor::new(ResourceKind::Statistic)
        .localized(FieldSpec::text("title", "Title").required().max_len(100))
        .plain(FieldSpec::text("value", "Value").required().max_len(20))
}

//! Courses (study areas) with their program and groups

use super::ListColumn;
use crate::shared::form_engine::{FieldSpec, FormDescriptor, ImageRequirement};
use contracts::domain::common::ResourceKind;

pub const LIST_COLUMNS: &[ListColumn] = &[
    ListColumn::localized("Title", "title"),
    ListColumn::slug(),
    ListColumn::plain("Duration", "duration"),
];

pub fn descriptor() -> FormDescriptor {
    FormDescriptor::new(ResourceKind::Course)
        .localized(FieldSpec::text("title", "Title").required().min_len(5).max_len(200))
        .localized(
            FieldSpec::multiline("description", "Description")
                .required()
                .min_len(20),
        )
        .plain(FieldSpec::text("duration", "Duration"))
        .with_slug()
        .image(ImageRequirement::Required)
        .collection(
            "program",
            "Program",
            vec![
                FieldSpec::text("title", "Module").required(),
                FieldSpec::multiline("description", "Topics"),
            ],
        )
        .collection(
            "groups",
            "Groups",
            vec![
                FieldSpec::text("name", "Group").required(),
                FieldSpec::text("schedule", "Schedule"),
            ],
        )
        .with_meta()
}

//! Layout shared by blog posts, news, services and projects

use super::ListColumn;
use crate::shared::form_engine::{FieldSpec, FormDescriptor, ImageRequirement};
use contracts::domain::common::ResourceKind;

pub(super) const LIST_COLUMNS: &[ListColumn] = &[
    ListColumn::localized("Title", "title"),
    ListColumn::slug(),
];

pub(super) fn descriptor(kind: ResourceKind) -> FormDescriptor {
    FormDescriptor::new(kind)
        .localized(FieldSpec::text("title", "Title").required().min_len(5).max_len(200))
        .localized(
            FieldSpec::multiline("description", "Description")
                .required()
                .min_len(20),
        )
        .with_slug()
        .image(ImageRequirement::Required)
        .with_meta()
}

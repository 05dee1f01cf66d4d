//! Customer testimonials; the photo is optional

use super::ListColumn;
use crate::shared::form_engine::{FieldSpec, FormDescriptor, ImageRequirement};
use contracts::domain::common::ResourceKind;

pub const LIST_COLUMNS: &[ListColumn] = &[
    ListColumn::localized("Name", "name"),
    ListColumn::localized("Position", "position"),
];

pub fn descriptor() -> FormDescriptor {
    FormDescriptor::new(ResourceKind::Testimonial)
        .localized(FieldSpec::text("name", "Name").required().max_len(100))
        .localized(FieldSpec::text("position", "Position").max_len(100))
        .localized(FieldSpec::multiline("content", "Testimonial").required().min_len(10))
        .image(ImageRequirement::Optional)
}

//! About page sections: a title and two halves, each text or image

use super::ListColumn;
use crate::shared::form_engine::{FieldSpec, FormDescriptor};
use contracts::domain::common::ResourceKind;

pub const LIST_COLUMNS: &[ListColumn] = &[ListColumn::localized("Title", "title")];

pub fn descriptor() -> FormDescriptor {
    let content = || FieldSpec::multiline("content", "Content").required();
    FormDescriptor::new(ResourceKind::AboutSection)
        .localized(FieldSpec::text("title", "Title").required().max_len(200))
        .side("left_side", "Left side", content())
        .side("right_side", "Right side", content())
}

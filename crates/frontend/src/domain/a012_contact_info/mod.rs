//! Company contact details shown in the site footer

use super::ListColumn;
use crate::shared::form_engine::{FieldSpec, FormDescriptor};
use contracts::domain::common::ResourceKind;

pub const LIST_COLUMNS: &[ListColumn] = &[
    ListColumn::localized("Address", "address"),
    ListColumn::plain("Phone", "phone"),
    ListColumn::plain("Email", "email"),
];

pub fn descriptor() -> FormDescriptor {
    FormDescriptor::new(ResourceKind::ContactInfo)
        .localized(FieldSpec::multiline("address", "Address").required())
        .plain(FieldSpec::text("phone", "Phone").required())
        .plain(FieldSpec::text("email", "Email").required())
}

//! URL redirects

use super::ListColumn;
use crate::shared::form_engine::{FieldSpec, FormDescriptor};
use contracts::domain::common::ResourceKind;

pub const LIST_COLUMNS: &[ListColumn] = &[
    ListColumn::plain("From", "from"),
    ListColumn::plain("To", "to"),
];

pub fn descriptor() -> FormDescriptor {
    FormDescriptor::new(ResourceKind::Redirect)
        .plain(FieldSpec::text("from", "From").required())
        .plain(FieldSpec::text("to", "To").required())
}

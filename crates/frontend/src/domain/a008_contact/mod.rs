//! Messages from the contact form. Read and delete only.

use super::ListColumn;

pub const LIST_COLUMNS: &[ListColumn] = &[
    ListColumn::plain("Name", "name"),
    ListColumn::plain("Email", "email"),
    ListColumn::plain("Phone", "phone"),
    ListColumn::plain("Message", "message"),
    ListColumn::created_at(),
];

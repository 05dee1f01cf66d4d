//! Consultation requests. Read and delete only.

use super::ListColumn;

pub const LIST_COLUMNS: &[ListColumn] = &[
    ListColumn::plain("Name", "name"),
    ListColumn::plain("Phone", "phone"),
    ListColumn::plain("Subject", "subject"),
    ListColumn::created_at(),
];

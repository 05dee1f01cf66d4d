//! Wire contracts shared between the admin dashboard and the CMS backend.

pub mod domain;
pub mod shared;

//! Services

use crate::domain::article;
use crate::shared::form_engine::FormDescriptor;
use contracts::domain::common::ResourceKind;

pub fn descriptor() -> FormDescriptor {
    article::descriptor(ResourceKind::Service)
}

//! Per-resource form configuration
//!
//! A `FormDescriptor` tells the binder which fields a resource has and how they
//! map onto the wire payload. Resources differ only in their descriptor.

use super::validation::FieldRules;
use contracts::domain::common::ResourceKind;

/// Whether a resource carries an uploaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRequirement {
    None,
    Optional,
    Required,
}

/// A single text field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    /// Rendered as a textarea (rich text stand-in)
    pub multiline: bool,
    pub rules: FieldRules,
}

impl FieldSpec {
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            multiline: false,
            rules: FieldRules::none(),
        }
    }

    pub fn multiline(name: &'static str, label: &'static str) -> Self {
        Self {
            multiline: true,
            ..Self::text(name, label)
        }
    }

    pub fn required(mut self) -> Self {
        self.rules.required = true;
        self
    }

    pub fn min_len(mut self, min: usize) -> Self {
        self.rules.min_length = Some(min);
        self
    }

    pub fn max_len(mut self, max: usize) -> Self {
        self.rules.max_length = Some(max);
        self
    }
}

/// A text-or-image half of a page section
#[derive(Debug, Clone, PartialEq)]
pub struct SideSpec {
    pub name: &'static str,
    pub label: &'static str,
    /// Localized field used when the side holds text
    pub text_field: FieldSpec,
}

/// A repeatable list of localized rows
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormDescriptor {
    pub kind: ResourceKind,
    pub localized: Vec<FieldSpec>,
    pub plain: Vec<FieldSpec>,
    pub slug: bool,
    pub image: ImageRequirement,
    pub meta: bool,
    pub sides: Vec<SideSpec>,
    pub collections: Vec<CollectionSpec>,
}

impl FormDescriptor {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            localized: Vec::new(),
            plain: Vec::new(),
            slug: false,
            image: ImageRequirement::None,
            meta: false,
            sides: Vec::new(),
            collections: Vec::new(),
        }
    }

    pub fn localized(mut self, field: FieldSpec) -> Self {
        self.localized.push(field);
        self
    }

    pub fn plain(mut self, field: FieldSpec) -> Self {
        self.plain.push(field);
        self
    }

    pub fn with_slug(mut self) -> Self {
        self.slug = true;
        self
    }

    pub fn image(mut self, requirement: ImageRequirement) -> Self {
        self.image = requirement;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn side(mut self, name: &'static str, label: &'static str, text_field: FieldSpec) -> Self {
        self.sides.push(SideSpec {
            name,
            label,
            text_field,
        });
        self
    }

    pub fn collection(
        mut self,
        name: &'static str,
        label: &'static str,
        fields: Vec<FieldSpec>,
    ) -> Self {
        self.collections.push(CollectionSpec {
            name,
            label,
            fields,
        });
        self
    }

    pub fn has_image(&self) -> bool {
        self.image != ImageRequirement::None
    }

    pub fn side_spec(&self, name: &str) -> Option<&SideSpec> {
        self.sides.iter().find(|s| s.name == name)
    }

    pub fn collection_spec(&self, name: &str) -> Option<&CollectionSpec> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Field shown as the row title in lists
    pub fn title_field(&self) -> &'static str {
        self.localized
            .first()
            .or(self.plain.first())
            .map(|f| f.name)
            .unwrap_or("id")
    }
}

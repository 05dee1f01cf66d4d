//! Validation rules for form fields

use super::binder::{
    localized_path, meta_name_path, meta_value_path, row_path, side_text_path, side_url_path,
    FormValues, SideDraft,
};
use super::collaborators::Validator;
use super::descriptor::{FieldSpec, FormDescriptor, ImageRequirement};
use super::error::FieldErrors;
use contracts::shared::Lang;

/// Validation rules for a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldRules {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl FieldRules {
    pub const fn none() -> Self {
        Self {
            required: false,
            min_length: None,
            max_length: None,
        }
    }

    pub const fn required() -> Self {
        Self {
            required: true,
            min_length: None,
            max_length: None,
        }
    }

    /// Validate a string value. Lengths are counted in characters.
    pub fn validate_str(&self, value: &str, label: &str) -> Result<(), String> {
        let trimmed = value.trim();
        if self.required && trimmed.is_empty() {
            return Err(format!("{} is required", label));
        }

        let len = trimmed.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!("{} must be at least {} characters", label, min));
            }
        }

        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!("{} must be at most {} characters", label, max));
            }
        }

        Ok(())
    }

    /// Rules for a language that may be left empty: lengths only, and only
    /// when something was typed
    fn optional(&self) -> Self {
        Self {
            required: false,
            ..*self
        }
    }
}

fn lang_label(label: &str, lang: Lang) -> String {
    format!("{} ({})", label, lang.label())
}

fn check_localized(
    errors: &mut FieldErrors,
    field: &FieldSpec,
    lang: Lang,
    value: &str,
    path: String,
) {
    let rules = if lang.is_required() {
        field.rules
    } else if value.trim().is_empty() {
        return;
    } else {
        field.rules.optional()
    };
    if let Err(message) = rules.validate_str(value, &lang_label(field.label, lang)) {
        errors.insert(path, message);
    }
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Validator driven by the rules declared in a `FormDescriptor`
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl Validator for SchemaValidator {
    fn validate(&self, descriptor: &FormDescriptor, values: &FormValues) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        for field in &descriptor.localized {
            for lang in Lang::ALL {
                let value = values.localized(field.name, lang);
                check_localized(&mut errors, field, lang, value, localized_path(field.name, lang));
            }
        }

        for field in &descriptor.plain {
            if let Err(message) = field.rules.validate_str(values.plain(field.name), field.label) {
                errors.insert(field.name, message);
            }
        }

        if descriptor.slug {
            let slug = values.slug.trim();
            if slug.is_empty() {
                errors.insert("slug", "Slug is required");
            } else if !is_valid_slug(slug) {
                errors.insert(
                    "slug",
                    "Slug may contain only lowercase letters, digits and hyphens",
                );
            }
        }

        if descriptor.image == ImageRequirement::Required && values.image.is_none() {
            errors.insert("image", "Image is required");
        }

        if descriptor.meta {
            for (index, row) in values.meta_rows().enumerate() {
                // The primary entry may stay blank; additional ones need a name
                if index > 0 && row.name.trim().is_empty() {
                    errors.insert(meta_name_path(index), "Meta name is required");
                }
                if index > 0 {
                    let az = row.values.get(Lang::Az);
                    if az.trim().is_empty() {
                        errors.insert(
                            meta_value_path(index, Lang::Az),
                            format!("Meta value ({}) is required", Lang::Az.label()),
                        );
                    }
                }
            }
        }

        for spec in &descriptor.sides {
            match values.side(spec.name) {
                Some(SideDraft::Text(map)) => {
                    for lang in Lang::ALL {
                        check_localized(
                            &mut errors,
                            &spec.text_field,
                            lang,
                            map.get(lang),
                            side_text_path(spec.name, spec.text_field.name, lang),
                        );
                    }
                }
                Some(SideDraft::Image { url }) => {
                    if url.trim().is_empty() {
                        errors.insert(
                            side_url_path(spec.name),
                            format!("{}: image is required", spec.label),
                        );
                    }
                }
                None => {}
            }
        }

        for spec in &descriptor.collections {
            for (index, row) in values.rows(spec.name).iter().enumerate() {
                for field in &spec.fields {
                    for lang in Lang::ALL {
                        check_localized(
                            &mut errors,
                            field,
                            lang,
                            row.value(field.name, lang),
                            row_path(spec.name, index, field.name, lang),
                        );
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

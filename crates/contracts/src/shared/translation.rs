use super::lang::Lang;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Translation
// ============================================================================

/// Перевод локализуемых полей на один язык
///
/// На проводе поля лежат рядом с `lang`: `{"title": "...", "description": "...", "lang": "az"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub lang: Lang,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Translation {
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            fields: Map::new(),
        }
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(field.to_string(), Value::String(value.into()));
        self
    }

    /// Значение поля как строка (числа приводятся к строке, отсутствующее поле = "")
    pub fn field(&self, name: &str) -> String {
        match self.fields.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// Найти перевод для языка
pub fn translation_for(translations: &[Translation], lang: Lang) -> Option<&Translation> {
    translations.iter().find(|t| t.lang == lang)
}

// ============================================================================
// Meta
// ============================================================================

/// Значение мета-тега на одном языке
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTranslation {
    pub name: String,
    pub value: String,
    pub lang: Lang,
}

/// Мета-тег записи (`description`, `keywords`, ...)
///
/// Имя тега дублируется в каждом переводе, так его ожидает backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetaEntry {
    #[serde(default)]
    pub translations: Vec<MetaTranslation>,
}

impl MetaEntry {
    /// Имя тега: первое непустое имя среди переводов
    pub fn name(&self) -> &str {
        self.translations
            .iter()
            .map(|t| t.name.as_str())
            .find(|n| !n.is_empty())
            .unwrap_or("")
    }

    pub fn value_for(&self, lang: Lang) -> Option<&str> {
        self.translations
            .iter()
            .find(|t| t.lang == lang)
            .map(|t| t.value.as_str())
    }
}

// ============================================================================
// Content side / rows
// ============================================================================

/// Половина секции страницы "О нас": либо текст, либо картинка
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentSide {
    Text { translations: Vec<Translation> },
    Image { url: String },
}

/// Строка повторяемой коллекции (программа курса, группы и т.п.)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalizedRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_translation_flattens_fields_next_to_lang() {
        let t = Translation::new(Lang::Az)
            .with("title", "Salam")
            .with("description", "Təsvir");
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(
            value,
            json!({"title": "Salam", "description": "Təsvir", "lang": "az"})
        );
    }

    #[test]
    fn test_translation_field_tolerates_numbers_and_missing() {
        let t: Translation = serde_json::from_value(json!({"lang": "en", "order": 3})).unwrap();
        assert_eq!(t.field("order"), "3");
        assert_eq!(t.field("title"), "");
    }

    #[test]
    fn test_content_side_is_tagged() {
        let side: ContentSide =
            serde_json::from_value(json!({"type": "image", "url": "/img/1.png"})).unwrap();
        assert_eq!(
            side,
            ContentSide::Image {
                url: "/img/1.png".into()
            }
        );
        let text = ContentSide::Text {
            translations: vec![Translation::new(Lang::Ru).with("content", "Текст")],
        };
        let value = serde_json::to_value(&text).unwrap();
        assert_eq!(value["type"], "text");
        assert!(value.get("url").is_none());
    }

    #[test]
    fn test_meta_entry_name_comes_from_any_translation() {
        let meta = MetaEntry {
            translations: vec![
                MetaTranslation {
                    name: String::new(),
                    value: "x".into(),
                    lang: Lang::Az,
                },
                MetaTranslation {
                    name: "keywords".into(),
                    value: "y".into(),
                    lang: Lang::En,
                },
            ],
        };
        assert_eq!(meta.name(), "keywords");
        assert_eq!(meta.value_for(Lang::En), Some("y"));
        assert_eq!(meta.value_for(Lang::Ru), None);
    }
}

use crate::shared::translation::{translation_for, ContentSide, LocalizedRow, MetaEntry, Translation};
use crate::shared::{Lang, UploadedImage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// ============================================================================
// Record key
// ============================================================================

/// Ключ для получения записи: числовой ID или slug
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Id(i64),
    Slug(String),
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Id(id) => write!(f, "{}", id),
            RecordKey::Slug(slug) => f.write_str(slug),
        }
    }
}

impl From<i64> for RecordKey {
    fn from(id: i64) -> Self {
        RecordKey::Id(id)
    }
}

// ============================================================================
// Resource record
// ============================================================================

/// Запись ресурса в том виде, в котором её отдаёт backend
///
/// Общие поля типизированы; специфичные для ресурса (стороны секций, коллекции,
/// простые поля вроде `from`/`to` у редиректов) остаются в `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<UploadedImage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub translations: Vec<Translation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta: Vec<MetaEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRecord {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            slug: None,
            image: None,
            translations: Vec::new(),
            meta: Vec::new(),
            created_at: None,
            extra: Map::new(),
        }
    }

    pub fn translation(&self, lang: Lang) -> Option<&Translation> {
        translation_for(&self.translations, lang)
    }

    /// Простое (нелокализуемое) поле как строка
    pub fn plain(&self, name: &str) -> Option<String> {
        match self.extra.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Сторона секции (`left_side`, `right_side`)
    pub fn side(&self, name: &str) -> Option<ContentSide> {
        self.extra
            .get(name)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Строки коллекции (`program`, `groups`)
    pub fn rows(&self, name: &str) -> Vec<LocalizedRow> {
        self.extra
            .get(name)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    /// Заголовок для списков: первое поле перевода на языке, иначе на AZ
    pub fn display_title(&self, field: &str, lang: Lang) -> String {
        let pick = |l: Lang| {
            self.translation(l)
                .map(|t| t.field(field))
                .filter(|v| !v.is_empty())
        };
        pick(lang)
            .or_else(|| pick(Lang::Az))
            .or_else(|| self.plain(field))
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_keeps_resource_specific_fields_in_extra() {
        let record: ResourceRecord = serde_json::from_value(json!({
            "id": 5,
            "slug": "about",
            "left_side": {"type": "image", "url": "/img/5.png"},
            "from": "/old",
            "program": [{"translations": [{"title": "Modul 1", "lang": "az"}]}]
        }))
        .unwrap();

        assert_eq!(record.slug.as_deref(), Some("about"));
        assert_eq!(
            record.side("left_side"),
            Some(ContentSide::Image {
                url: "/img/5.png".into()
            })
        );
        assert_eq!(record.side("right_side"), None);
        assert_eq!(record.plain("from").as_deref(), Some("/old"));
        let rows = record.rows("program");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].translations[0].field("title"), "Modul 1");
    }

    #[test]
    fn test_display_title_falls_back_to_az() {
        let mut record = ResourceRecord::new(9);
        record
            .translations
            .push(Translation::new(Lang::Az).with("title", "Xəbər"));
        assert_eq!(record.display_title("title", Lang::En), "Xəbər");
        assert_eq!(ResourceRecord::new(3).display_title("title", Lang::Az), "#3");
    }
}

//! MultilingualFormBinder
//!
//! Holds the per-language field values of one form and reshapes them to and
//! from the backend wire format. Validation is not done here.

use super::descriptor::{FieldSpec, FormDescriptor};
use contracts::domain::common::ResourceRecord;
use contracts::shared::translation::{translation_for, ContentSide, LocalizedRow};
use contracts::shared::{Lang, MetaEntry, MetaTranslation, Translation, UploadedImage};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use uuid::Uuid;

/// Name sent for the primary meta entry when the user left it blank
pub const DEFAULT_PRIMARY_META: &str = "description";

// ============================================================================
// Value types
// ============================================================================

/// One value per supported language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LangMap<T> {
    az: T,
    en: T,
    ru: T,
}

impl<T> LangMap<T> {
    pub fn get(&self, lang: Lang) -> &T {
        match lang {
            Lang::Az => &self.az,
            Lang::En => &self.en,
            Lang::Ru => &self.ru,
        }
    }

    pub fn get_mut(&mut self, lang: Lang) -> &mut T {
        match lang {
            Lang::Az => &mut self.az,
            Lang::En => &mut self.en,
            Lang::Ru => &mut self.ru,
        }
    }

    pub fn set(&mut self, lang: Lang, value: T) {
        *self.get_mut(lang) = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Lang, &T)> {
        Lang::ALL.into_iter().map(move |lang| (lang, self.get(lang)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaRow {
    /// Stable identity for rendering and edit tracking
    pub key: Uuid,
    pub name: String,
    pub values: LangMap<String>,
    /// Index of the server meta entry the row was filled from
    origin: Option<usize>,
}

impl MetaRow {
    fn new() -> Self {
        Self {
            key: Uuid::new_v4(),
            name: String::new(),
            values: LangMap::default(),
            origin: None,
        }
    }

    fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.values.iter().all(|(_, v)| v.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideKind {
    Text,
    Image,
}

impl SideKind {
    pub fn code(&self) -> &'static str {
        match self {
            SideKind::Text => "text",
            SideKind::Image => "image",
        }
    }
}

/// Editable state of a text-or-image side. Only the live variant exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideDraft {
    Text(LangMap<String>),
    Image { url: String },
}

impl SideDraft {
    fn empty(kind: SideKind) -> Self {
        match kind {
            SideKind::Text => SideDraft::Text(LangMap::default()),
            SideKind::Image => SideDraft::Image { url: String::new() },
        }
    }

    pub fn kind(&self) -> SideKind {
        match self {
            SideDraft::Text(_) => SideKind::Text,
            SideDraft::Image { .. } => SideKind::Image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRow {
    pub key: Uuid,
    /// Server id of an existing row
    pub id: Option<i64>,
    pub values: BTreeMap<&'static str, LangMap<String>>,
    /// Position in the server list, for rows that came without an id
    origin: Option<usize>,
}

impl CollectionRow {
    fn new(fields: &[FieldSpec]) -> Self {
        Self {
            key: Uuid::new_v4(),
            id: None,
            origin: None,
            values: fields
                .iter()
                .map(|f| (f.name, LangMap::default()))
                .collect(),
        }
    }

    pub fn value(&self, field: &str, lang: Lang) -> &str {
        self.values
            .get(field)
            .map(|m| m.get(lang).as_str())
            .unwrap_or("")
    }
}

/// Current values of a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub slug: String,
    pub image: Option<UploadedImage>,
    pub plain: BTreeMap<&'static str, String>,
    pub localized: BTreeMap<&'static str, LangMap<String>>,
    pub primary_meta: MetaRow,
    pub additional_meta: Vec<MetaRow>,
    pub sides: BTreeMap<&'static str, SideDraft>,
    pub collections: BTreeMap<&'static str, Vec<CollectionRow>>,
}

impl FormValues {
    pub fn localized(&self, field: &str, lang: Lang) -> &str {
        self.localized
            .get(field)
            .map(|m| m.get(lang).as_str())
            .unwrap_or("")
    }

    pub fn plain(&self, field: &str) -> &str {
        self.plain.get(field).map(String::as_str).unwrap_or("")
    }

    /// Primary meta entry followed by the additional ones
    pub fn meta_rows(&self) -> impl Iterator<Item = &MetaRow> {
        std::iter::once(&self.primary_meta).chain(self.additional_meta.iter())
    }

    pub fn meta_row(&self, index: usize) -> Option<&MetaRow> {
        if index == 0 {
            Some(&self.primary_meta)
        } else {
            self.additional_meta.get(index - 1)
        }
    }

    pub fn side(&self, name: &str) -> Option<&SideDraft> {
        self.sides.get(name)
    }

    pub fn rows(&self, collection: &str) -> &[CollectionRow] {
        self.collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ============================================================================
// Field paths (used for validation messages)
// ============================================================================

pub fn localized_path(field: &str, lang: Lang) -> String {
    format!("{field}_{lang}")
}

pub fn meta_name_path(index: usize) -> String {
    format!("meta.{index}.name")
}

pub fn meta_value_path(index: usize, lang: Lang) -> String {
    format!("meta.{index}.value_{lang}")
}

pub fn side_text_path(side: &str, field: &str, lang: Lang) -> String {
    format!("{side}.{field}_{lang}")
}

pub fn side_url_path(side: &str) -> String {
    format!("{side}.url")
}

pub fn row_path(collection: &str, index: usize, field: &str, lang: Lang) -> String {
    format!("{collection}.{index}.{field}_{lang}")
}

// Edit tracking for list items uses the row key, so removing a row does not
// shift the marks of the rows after it.
fn keyed(prefix: &str, key: Uuid, what: &str) -> String {
    format!("{prefix}#{key}.{what}")
}

const META_ROWS: &str = "meta.rows";

fn rows_mark(collection: &str) -> String {
    format!("{collection}.rows")
}

/// Server entry whose local row the user removed
fn removed_mark(prefix: &str, binding: &str) -> String {
    format!("{prefix}.removed.{binding}")
}

/// Collection rows are tied to the server by id, or by position when the
/// server sent none
fn row_binding(id: Option<i64>, origin: Option<usize>) -> Option<String> {
    match (id, origin) {
        (Some(id), _) => Some(format!("id{id}")),
        (None, Some(index)) => Some(format!("at{index}")),
        (None, None) => None,
    }
}

fn side_type_mark(side: &str) -> String {
    format!("{side}.type")
}

// ============================================================================
// Binder
// ============================================================================

#[derive(Debug, Clone)]
pub struct MultilingualFormBinder {
    descriptor: Rc<FormDescriptor>,
    values: FormValues,
    /// Paths edited locally; server data never overwrites them
    touched: HashSet<String>,
}

impl MultilingualFormBinder {
    pub fn initialize(descriptor: Rc<FormDescriptor>) -> Self {
        let values = Self::defaults(&descriptor);
        Self {
            descriptor,
            values,
            touched: HashSet::new(),
        }
    }

    fn defaults(d: &FormDescriptor) -> FormValues {
        FormValues {
            slug: String::new(),
            image: None,
            plain: d.plain.iter().map(|f| (f.name, String::new())).collect(),
            localized: d
                .localized
                .iter()
                .map(|f| (f.name, LangMap::default()))
                .collect(),
            primary_meta: MetaRow::new(),
            additional_meta: Vec::new(),
            sides: d
                .sides
                .iter()
                .map(|s| (s.name, SideDraft::empty(SideKind::Text)))
                .collect(),
            collections: d.collections.iter().map(|c| (c.name, Vec::new())).collect(),
        }
    }

    pub fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    pub fn shared_descriptor(&self) -> Rc<FormDescriptor> {
        Rc::clone(&self.descriptor)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn is_touched(&self, path: &str) -> bool {
        self.touched.contains(path)
    }

    /// Back to the empty form of the descriptor
    pub fn reset(&mut self) {
        self.values = Self::defaults(&self.descriptor);
        self.touched.clear();
    }

    // ------------------------------------------------------------------
    // Local edits
    // ------------------------------------------------------------------

    pub fn set_localized(&mut self, field: &str, lang: Lang, value: impl Into<String>) -> bool {
        let Some(map) = self.values.localized.get_mut(field) else {
            return false;
        };
        map.set(lang, value.into());
        self.touched.insert(localized_path(field, lang));
        true
    }

    pub fn set_plain(&mut self, field: &str, value: impl Into<String>) -> bool {
        let Some(slot) = self.values.plain.get_mut(field) else {
            return false;
        };
        *slot = value.into();
        self.touched.insert(field.to_string());
        true
    }

    pub fn set_slug(&mut self, value: impl Into<String>) -> bool {
        if !self.descriptor.slug {
            return false;
        }
        self.values.slug = value.into();
        self.touched.insert("slug".to_string());
        true
    }

    pub fn set_image(&mut self, image: Option<UploadedImage>) -> bool {
        if !self.descriptor.has_image() {
            return false;
        }
        self.values.image = image;
        self.touched.insert("image".to_string());
        true
    }

    fn meta_row_mut(&mut self, index: usize) -> Option<&mut MetaRow> {
        if !self.descriptor.meta {
            return None;
        }
        if index == 0 {
            Some(&mut self.values.primary_meta)
        } else {
            self.values.additional_meta.get_mut(index - 1)
        }
    }

    pub fn set_meta_name(&mut self, index: usize, name: impl Into<String>) -> bool {
        let Some(row) = self.meta_row_mut(index) else {
            return false;
        };
        row.name = name.into();
        let mark = keyed("meta", row.key, "name");
        self.touched.insert(mark);
        true
    }

    pub fn set_meta_value(&mut self, index: usize, lang: Lang, value: impl Into<String>) -> bool {
        let Some(row) = self.meta_row_mut(index) else {
            return false;
        };
        row.values.set(lang, value.into());
        let mark = keyed("meta", row.key, &format!("value_{lang}"));
        self.touched.insert(mark);
        true
    }

    /// Append an additional meta entry, returning its index
    pub fn add_meta(&mut self) -> Option<usize> {
        if !self.descriptor.meta {
            return None;
        }
        self.values.additional_meta.push(MetaRow::new());
        self.touched.insert(META_ROWS.to_string());
        Some(self.values.additional_meta.len())
    }

    /// Remove an additional meta entry. The primary entry (index 0) stays.
    pub fn remove_meta(&mut self, index: usize) -> bool {
        if index == 0 || index > self.values.additional_meta.len() {
            return false;
        }
        let row = self.values.additional_meta.remove(index - 1);
        if let Some(origin) = row.origin {
            self.touched.insert(removed_mark("meta", &origin.to_string()));
        }
        self.touched.insert(META_ROWS.to_string());
        true
    }

    /// Switch a side between text and image. The previous branch is dropped.
    pub fn set_side_kind(&mut self, side: &str, kind: SideKind) -> bool {
        let Some(draft) = self.values.sides.get_mut(side) else {
            return false;
        };
        if draft.kind() != kind {
            *draft = SideDraft::empty(kind);
        }
        self.touched.insert(side_type_mark(side));
        true
    }

    pub fn set_side_text(&mut self, side: &str, lang: Lang, value: impl Into<String>) -> bool {
        let Some(spec) = self.descriptor.side_spec(side) else {
            return false;
        };
        let path = side_text_path(side, spec.text_field.name, lang);
        match self.values.sides.get_mut(side) {
            Some(SideDraft::Text(map)) => {
                map.set(lang, value.into());
                self.touched.insert(path);
                true
            }
            _ => false,
        }
    }

    pub fn set_side_url(&mut self, side: &str, value: impl Into<String>) -> bool {
        match self.values.sides.get_mut(side) {
            Some(SideDraft::Image { url }) => {
                *url = value.into();
                self.touched.insert(side_url_path(side));
                true
            }
            _ => false,
        }
    }

    /// Append an empty row to a collection, returning its index
    pub fn add_row(&mut self, collection: &str) -> Option<usize> {
        let spec = self.descriptor.collection_spec(collection)?;
        let row = CollectionRow::new(&spec.fields);
        let rows = self.values.collections.get_mut(collection)?;
        rows.push(row);
        let index = rows.len() - 1;
        self.touched.insert(rows_mark(collection));
        Some(index)
    }

    pub fn remove_row(&mut self, collection: &str, index: usize) -> bool {
        let Some(rows) = self.values.collections.get_mut(collection) else {
            return false;
        };
        if index >= rows.len() {
            return false;
        }
        let row = rows.remove(index);
        if let Some(binding) = row_binding(row.id, row.origin) {
            self.touched.insert(removed_mark(collection, &binding));
        }
        self.touched.insert(rows_mark(collection));
        true
    }

    pub fn set_row_value(
        &mut self,
        collection: &str,
        index: usize,
        field: &str,
        lang: Lang,
        value: impl Into<String>,
    ) -> bool {
        let Some(row) = self
            .values
            .collections
            .get_mut(collection)
            .and_then(|rows| rows.get_mut(index))
        else {
            return false;
        };
        let Some(map) = row.values.get_mut(field) else {
            return false;
        };
        map.set(lang, value.into());
        let mark = keyed(collection, row.key, &localized_path(field, lang));
        self.touched.insert(mark);
        true
    }

    // ------------------------------------------------------------------
    // Server -> form
    // ------------------------------------------------------------------

    /// Write the `lang` part of a server record into the form.
    ///
    /// Other languages are left alone, locally edited fields are kept, and
    /// language-neutral fields (slug, image, plain fields, meta names) are
    /// only filled while still empty. Applying the same record twice is a no-op.
    pub fn apply_server_record(&mut self, record: &ResourceRecord, lang: Lang) {
        let descriptor = Rc::clone(&self.descriptor);
        let d = descriptor.as_ref();

        if let Some(translation) = record.translation(lang) {
            for field in &d.localized {
                let path = localized_path(field.name, lang);
                if self.touched.contains(&path) {
                    continue;
                }
                if let Some(map) = self.values.localized.get_mut(field.name) {
                    map.set(lang, translation.field(field.name));
                }
            }
        }

        if d.slug && self.values.slug.is_empty() && !self.touched.contains("slug") {
            if let Some(slug) = &record.slug {
                self.values.slug = slug.clone();
            }
        }

        if d.has_image() && self.values.image.is_none() && !self.touched.contains("image") {
            self.values.image = record.image.clone();
        }

        for field in &d.plain {
            if self.touched.contains(field.name) {
                continue;
            }
            if let Some(slot) = self.values.plain.get_mut(field.name) {
                if slot.is_empty() {
                    if let Some(value) = record.plain(field.name) {
                        *slot = value;
                    }
                }
            }
        }

        if d.meta {
            self.apply_meta(&record.meta, lang);
        }

        for spec in &d.sides {
            let Some(server) = record.side(spec.name) else {
                continue;
            };
            let type_touched = self.touched.contains(&side_type_mark(spec.name));
            let Some(local) = self.values.sides.get_mut(spec.name) else {
                continue;
            };
            let server_kind = match &server {
                ContentSide::Text { .. } => SideKind::Text,
                ContentSide::Image { .. } => SideKind::Image,
            };
            if local.kind() != server_kind {
                if type_touched {
                    continue;
                }
                *local = SideDraft::empty(server_kind);
            }
            match (local, server) {
                (SideDraft::Text(map), ContentSide::Text { translations }) => {
                    let path = side_text_path(spec.name, spec.text_field.name, lang);
                    if !self.touched.contains(&path) {
                        if let Some(t) = translation_for(&translations, lang) {
                            map.set(lang, t.field(spec.text_field.name));
                        }
                    }
                }
                (SideDraft::Image { url }, ContentSide::Image { url: server_url }) => {
                    if url.is_empty() && !self.touched.contains(&side_url_path(spec.name)) {
                        *url = server_url;
                    }
                }
                _ => {}
            }
        }

        for spec in &d.collections {
            let server_rows = record.rows(spec.name);
            self.apply_rows(spec.name, &spec.fields, &server_rows, lang);
        }
    }

    // Entry 0 is the primary row; the others go to the row created from them
    fn apply_meta(&mut self, entries: &[MetaEntry], lang: Lang) {
        for (index, entry) in entries.iter().enumerate() {
            let row = if index == 0 {
                &mut self.values.primary_meta
            } else {
                let bound = self
                    .values
                    .additional_meta
                    .iter()
                    .position(|r| r.origin == Some(index));
                let pos = match bound {
                    Some(pos) => pos,
                    None => {
                        if self.touched.contains(&removed_mark("meta", &index.to_string())) {
                            continue;
                        }
                        let mut row = MetaRow::new();
                        row.origin = Some(index);
                        self.values.additional_meta.push(row);
                        self.values.additional_meta.len() - 1
                    }
                };
                &mut self.values.additional_meta[pos]
            };
            if row.name.is_empty() && !self.touched.contains(&keyed("meta", row.key, "name")) {
                row.name = entry.name().to_string();
            }
            if let Some(value) = entry.value_for(lang) {
                if !self
                    .touched
                    .contains(&keyed("meta", row.key, &format!("value_{lang}")))
                {
                    row.values.set(lang, value.to_string());
                }
            }
        }
    }

    fn apply_rows(
        &mut self,
        collection: &'static str,
        fields: &[FieldSpec],
        server_rows: &[LocalizedRow],
        lang: Lang,
    ) {
        let Some(rows) = self.values.collections.get_mut(collection) else {
            return;
        };
        for (index, server_row) in server_rows.iter().enumerate() {
            let bound = rows.iter().position(|r| match server_row.id {
                Some(id) => r.id == Some(id),
                None => r.id.is_none() && r.origin == Some(index),
            });
            let pos = match bound {
                Some(pos) => pos,
                None => {
                    let removed = row_binding(server_row.id, Some(index))
                        .is_some_and(|b| self.touched.contains(&removed_mark(collection, &b)));
                    if removed {
                        continue;
                    }
                    let mut row = CollectionRow::new(fields);
                    row.id = server_row.id;
                    row.origin = Some(index);
                    rows.push(row);
                    rows.len() - 1
                }
            };
            let row = &mut rows[pos];
            let Some(translation) = translation_for(&server_row.translations, lang) else {
                continue;
            };
            for field in fields {
                let mark = keyed(collection, row.key, &localized_path(field.name, lang));
                if self.touched.contains(&mark) {
                    continue;
                }
                if let Some(map) = row.values.get_mut(field.name) {
                    map.set(lang, translation.field(field.name));
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Form -> wire
    // ------------------------------------------------------------------

    /// Build the create/update request body
    pub fn to_wire_payload(&self) -> Value {
        let d = self.descriptor.as_ref();
        let v = &self.values;
        let mut payload = Map::new();

        if d.slug {
            payload.insert("slug".into(), Value::String(v.slug.trim().to_string()));
        }
        if d.has_image() {
            if let Some(image) = &v.image {
                payload.insert("image".into(), Value::from(image.id));
            }
        }
        for field in &d.plain {
            payload.insert(
                field.name.into(),
                Value::String(v.plain(field.name).to_string()),
            );
        }
        if !d.localized.is_empty() {
            let translations = collapse(&d.localized, |field, lang| v.localized(field, lang));
            payload.insert("translations".into(), to_json(&translations));
        }
        if d.meta {
            let entries: Vec<MetaEntry> = v
                .meta_rows()
                .enumerate()
                .filter(|(index, row)| *index == 0 || !row.is_blank())
                .map(|(index, row)| meta_entry(row, index == 0))
                .collect();
            payload.insert("meta".into(), to_json(&entries));
        }
        for spec in &d.sides {
            let Some(draft) = v.sides.get(spec.name) else {
                continue;
            };
            let side = match draft {
                SideDraft::Text(map) => ContentSide::Text {
                    translations: collapse(std::slice::from_ref(&spec.text_field), |_, lang| {
                        map.get(lang).as_str()
                    }),
                },
                SideDraft::Image { url } => ContentSide::Image { url: url.clone() },
            };
            payload.insert(spec.name.into(), to_json(&side));
        }
        for spec in &d.collections {
            let rows: Vec<LocalizedRow> = v
                .rows(spec.name)
                .iter()
                .map(|row| LocalizedRow {
                    id: row.id,
                    translations: collapse(&spec.fields, |field, lang| row.value(field, lang)),
                })
                .collect();
            payload.insert(spec.name.into(), to_json(&rows));
        }

        Value::Object(payload)
    }
}

/// One translation per language; optional languages with nothing filled in are left out
fn collapse<'a>(fields: &[FieldSpec], value: impl Fn(&str, Lang) -> &'a str) -> Vec<Translation> {
    Lang::ALL
        .into_iter()
        .filter(|lang| {
            lang.is_required() || fields.iter().any(|f| !value(f.name, *lang).trim().is_empty())
        })
        .map(|lang| {
            fields
                .iter()
                .fold(Translation::new(lang), |t, f| t.with(f.name, value(f.name, lang)))
        })
        .collect()
}

fn meta_entry(row: &MetaRow, primary: bool) -> MetaEntry {
    let name = if row.name.trim().is_empty() && primary {
        DEFAULT_PRIMARY_META.to_string()
    } else {
        row.name.trim().to_string()
    };
    MetaEntry {
        translations: row
            .values
            .iter()
            .filter(|(lang, value)| lang.is_required() || !value.trim().is_empty())
            .map(|(lang, value)| MetaTranslation {
                name: name.clone(),
                value: value.clone(),
                lang,
            })
            .collect(),
    }
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form_engine::descriptor::ImageRequirement;
    use contracts::domain::common::ResourceKind;
    use serde_json::json;

    fn article() -> Rc<FormDescriptor> {
        Rc::new(
            FormDescriptor::new(ResourceKind::News)
                .localized(FieldSpec::text("title", "Title").required().min_len(5))
                .localized(FieldSpec::multiline("description", "Content").required().min_len(20))
                .with_slug()
                .image(ImageRequirement::Required)
                .with_meta(),
        )
    }

    fn about() -> Rc<FormDescriptor> {
        Rc::new(
            FormDescriptor::new(ResourceKind::AboutSection)
                .localized(FieldSpec::text("title", "Title"))
                .side("left_side", "Left", FieldSpec::multiline("content", "Text"))
                .side("right_side", "Right", FieldSpec::multiline("content", "Text")),
        )
    }

    fn full_record() -> ResourceRecord {
        serde_json::from_value(json!({
            "id": 3,
            "slug": "yeni-xeber",
            "image": {"id": 7, "url": "/img/7.png"},
            "translations": [
                {"title": "Başlıq", "description": "Azərbaycan dilində mətn", "lang": "az"},
                {"title": "Title", "description": "Text in English", "lang": "en"},
                {"title": "Заголовок", "description": "Текст на русском", "lang": "ru"}
            ],
            "meta": [
                {"translations": [
                    {"name": "description", "value": "az meta", "lang": "az"},
                    {"name": "description", "value": "en meta", "lang": "en"},
                    {"name": "description", "value": "ru meta", "lang": "ru"}
                ]},
                {"translations": [
                    {"name": "keywords", "value": "xəbər", "lang": "az"},
                    {"name": "keywords", "value": "news", "lang": "en"},
                    {"name": "keywords", "value": "новости", "lang": "ru"}
                ]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_initialize_builds_field_per_language() {
        let binder = MultilingualFormBinder::initialize(article());
        let values = binder.values();
        assert_eq!(values.localized.len(), 2);
        for lang in Lang::ALL {
            assert_eq!(values.localized("title", lang), "");
        }
        assert!(values.additional_meta.is_empty());
        assert_eq!(values.image, None);
    }

    #[test]
    fn test_apply_writes_only_requested_language() {
        let mut binder = MultilingualFormBinder::initialize(article());
        binder.apply_server_record(&full_record(), Lang::En);

        let values = binder.values();
        assert_eq!(values.localized("title", Lang::En), "Title");
        assert_eq!(values.localized("title", Lang::Az), "");
        assert_eq!(values.localized("title", Lang::Ru), "");
        assert_eq!(values.primary_meta.values.get(Lang::En), "en meta");
        assert_eq!(values.primary_meta.values.get(Lang::Az), "");
        // language-neutral fields are filled on the first application
        assert_eq!(values.slug, "yeni-xeber");
        assert_eq!(values.image.as_ref().map(|i| i.id), Some(7));
        assert_eq!(values.additional_meta.len(), 1);
        assert_eq!(values.additional_meta[0].name, "keywords");
    }

    #[test]
    fn test_apply_keeps_local_edits_and_local_image() {
        let mut binder = MultilingualFormBinder::initialize(article());
        binder.set_localized("title", Lang::Az, "Yeni başlıq");
        binder.set_image(Some(UploadedImage {
            id: 42,
            url: "/img/42.png".into(),
        }));
        binder.set_meta_name(0, "og:description");

        binder.apply_server_record(&full_record(), Lang::Az);

        let values = binder.values();
        assert_eq!(values.localized("title", Lang::Az), "Yeni başlıq");
        assert_eq!(values.localized("description", Lang::Az), "Azərbaycan dilində mətn");
        assert_eq!(values.image.as_ref().map(|i| i.id), Some(42));
        assert_eq!(values.primary_meta.name, "og:description");
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut binder = MultilingualFormBinder::initialize(article());
        binder.apply_server_record(&full_record(), Lang::Ru);
        let once = binder.values().clone();
        binder.apply_server_record(&full_record(), Lang::Ru);
        assert_eq!(binder.values(), &once);
    }

    #[test]
    fn test_round_trip_reproduces_server_fields() {
        let record = full_record();
        let mut binder = MultilingualFormBinder::initialize(article());
        for lang in Lang::ALL {
            binder.apply_server_record(&record, lang);
        }

        let mut expected = serde_json::to_value(&record).unwrap();
        let obj = expected.as_object_mut().unwrap();
        obj.remove("id");
        obj.insert("image".into(), json!(7));

        assert_eq!(binder.to_wire_payload(), expected);
    }

    #[test]
    fn test_payload_omits_empty_optional_languages() {
        let mut binder = MultilingualFormBinder::initialize(article());
        binder.set_localized("title", Lang::Ru, "Только русский");
        binder.set_meta_value(0, Lang::En, "en only");

        let payload = binder.to_wire_payload();
        let langs: Vec<&str> = payload["translations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["lang"].as_str().unwrap())
            .collect();
        assert_eq!(langs, vec!["az", "ru"]);
        assert_eq!(payload["translations"][0]["title"], "");

        let meta = &payload["meta"][0]["translations"];
        assert_eq!(meta.as_array().unwrap().len(), 2);
        assert_eq!(meta[0]["name"], DEFAULT_PRIMARY_META);
        assert_eq!(meta[1]["lang"], "en");
        assert!(payload.get("image").is_none());
    }

    #[test]
    fn test_additional_meta_add_and_remove() {
        let mut binder = MultilingualFormBinder::initialize(article());
        assert_eq!(binder.add_meta(), Some(1));
        assert_eq!(binder.add_meta(), Some(2));
        binder.set_meta_name(2, "keywords");
        binder.set_meta_value(2, Lang::Az, "açar");
        assert!(!binder.remove_meta(0));
        assert!(binder.remove_meta(1));

        let payload = binder.to_wire_payload();
        let meta = payload["meta"].as_array().unwrap();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta[1]["translations"][0]["name"], "keywords");
    }

    #[test]
    fn test_removed_meta_rows_are_not_restored_by_fetch() {
        let mut binder = MultilingualFormBinder::initialize(article());
        binder.apply_server_record(&full_record(), Lang::Az);
        assert!(binder.remove_meta(1));
        binder.apply_server_record(&full_record(), Lang::En);
        assert!(binder.values().additional_meta.is_empty());
    }

    fn meta_entry_json(name: &str, tag: &str) -> Value {
        json!({"translations": [
            {"name": name, "value": format!("{tag}-az"), "lang": "az"},
            {"name": name, "value": format!("{tag}-en"), "lang": "en"}
        ]})
    }

    #[test]
    fn test_removing_middle_meta_keeps_later_rows_bound() {
        let record: ResourceRecord = serde_json::from_value(json!({
            "id": 3,
            "meta": [
                meta_entry_json("description", "d"),
                meta_entry_json("keywords", "k"),
                meta_entry_json("author", "a"),
                meta_entry_json("robots", "r")
            ]
        }))
        .unwrap();
        let mut binder = MultilingualFormBinder::initialize(article());
        binder.apply_server_record(&record, Lang::Az);
        assert!(binder.remove_meta(2));
        binder.apply_server_record(&record, Lang::En);

        let rows = &binder.values().additional_meta;
        assert_eq!(rows.len(), 2);
        for (row, tag) in rows.iter().zip(["k", "r"]) {
            assert_eq!(row.values.get(Lang::Az), &format!("{tag}-az"));
            assert_eq!(row.values.get(Lang::En), &format!("{tag}-en"));
        }
        assert_eq!(rows[1].name, "robots");

        let payload = binder.to_wire_payload();
        assert_eq!(payload["meta"][2]["translations"][1]["value"], "r-en");
    }

    fn course() -> Rc<FormDescriptor> {
        Rc::new(
            FormDescriptor::new(ResourceKind::Course)
                .localized(FieldSpec::text("title", "Title"))
                .collection("program", "Program", vec![FieldSpec::text("title", "Module")]),
        )
    }

    fn program_row(id: Option<i64>, tag: &str) -> Value {
        let mut row = json!({"translations": [
            {"title": format!("{tag}-az"), "lang": "az"},
            {"title": format!("{tag}-en"), "lang": "en"}
        ]});
        if let Some(id) = id {
            row["id"] = json!(id);
        }
        row
    }

    #[test]
    fn test_removing_middle_row_keeps_later_rows_bound() {
        for ids in [[Some(10), Some(11), Some(12)], [None, None, None]] {
            let record: ResourceRecord = serde_json::from_value(json!({
                "id": 5,
                "program": [
                    program_row(ids[0], "m1"),
                    program_row(ids[1], "m2"),
                    program_row(ids[2], "m3")
                ]
            }))
            .unwrap();
            let mut binder = MultilingualFormBinder::initialize(course());
            binder.apply_server_record(&record, Lang::Az);
            assert!(binder.remove_row("program", 1));
            binder.apply_server_record(&record, Lang::En);

            let rows = binder.values().rows("program");
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].id, ids[0]);
            assert_eq!(rows[1].id, ids[2]);
            for (row, tag) in rows.iter().zip(["m1", "m3"]) {
                assert_eq!(row.value("title", Lang::Az), format!("{tag}-az"));
                assert_eq!(row.value("title", Lang::En), format!("{tag}-en"));
            }
        }
    }

    #[test]
    fn test_server_rows_do_not_fill_locally_added_rows() {
        let record: ResourceRecord = serde_json::from_value(json!({
            "id": 5,
            "program": [program_row(Some(10), "m1")]
        }))
        .unwrap();
        let mut binder = MultilingualFormBinder::initialize(course());
        let index = binder.add_row("program").unwrap();
        binder.set_row_value("program", index, "title", Lang::Az, "Yeni modul");
        binder.apply_server_record(&record, Lang::Az);

        let rows = binder.values().rows("program");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, None);
        assert_eq!(rows[0].value("title", Lang::Az), "Yeni modul");
        assert_eq!(rows[1].id, Some(10));
        assert_eq!(rows[1].value("title", Lang::Az), "m1-az");
    }

    #[test]
    fn test_side_switch_drops_stale_url() {
        let mut binder = MultilingualFormBinder::initialize(about());
        binder.set_side_kind("left_side", SideKind::Image);
        binder.set_side_url("left_side", "/img/old.png");
        binder.set_side_kind("left_side", SideKind::Text);
        binder.set_side_text("left_side", Lang::Az, "Mətn");

        let payload = binder.to_wire_payload();
        let left = &payload["left_side"];
        assert_eq!(left["type"], "text");
        assert_eq!(left["translations"][0]["content"], "Mətn");
        assert!(left.get("url").is_none());
    }

    #[test]
    fn test_side_text_ignored_while_image_selected() {
        let mut binder = MultilingualFormBinder::initialize(about());
        binder.set_side_kind("right_side", SideKind::Image);
        assert!(!binder.set_side_text("right_side", Lang::Az, "lost"));
        binder.set_side_url("right_side", "/img/r.png");

        let payload = binder.to_wire_payload();
        assert_eq!(payload["right_side"], json!({"type": "image", "url": "/img/r.png"}));
    }

    #[test]
    fn test_server_side_kind_does_not_override_user_choice() {
        let record: ResourceRecord = serde_json::from_value(json!({
            "id": 1,
            "left_side": {"type": "image", "url": "/img/server.png"}
        }))
        .unwrap();
        let mut binder = MultilingualFormBinder::initialize(about());
        binder.set_side_kind("left_side", SideKind::Text);
        binder.apply_server_record(&record, Lang::Az);
        assert_eq!(
            binder.values().side("left_side").map(SideDraft::kind),
            Some(SideKind::Text)
        );

        let mut fresh = MultilingualFormBinder::initialize(about());
        fresh.apply_server_record(&record, Lang::Az);
        assert_eq!(
            fresh.values().side("left_side"),
            Some(&SideDraft::Image {
                url: "/img/server.png".into()
            })
        );
    }

    #[test]
    fn test_collection_rows_in_payload() {
        let descriptor = Rc::new(
            FormDescriptor::new(ResourceKind::Course)
                .localized(FieldSpec::text("title", "Title"))
                .collection(
                    "program",
                    "Program",
                    vec![FieldSpec::text("title", "Module"), FieldSpec::multiline("description", "Details")],
                ),
        );
        let mut binder = MultilingualFormBinder::initialize(descriptor);
        let index = binder.add_row("program").unwrap();
        binder.set_row_value("program", index, "title", Lang::Az, "Modul 1");
        binder.set_row_value("program", index, "title", Lang::En, "Module 1");

        let payload = binder.to_wire_payload();
        let row = &payload["program"][0];
        assert!(row.get("id").is_none());
        assert_eq!(row["translations"].as_array().unwrap().len(), 2);
        assert_eq!(row["translations"][1]["title"], "Module 1");
        assert_eq!(row["translations"][1]["description"], "");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut binder = MultilingualFormBinder::initialize(article());
        binder.set_localized("title", Lang::Az, "Salam");
        binder.add_meta();
        binder.reset();
        assert_eq!(binder.values().localized("title", Lang::Az), "");
        assert!(binder.values().additional_meta.is_empty());
        assert!(!binder.is_touched("title_az"));
    }
}

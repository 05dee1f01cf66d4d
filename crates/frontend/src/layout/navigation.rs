//! Current page, mirrored into the URL as `?page=<resource>&id=<id|new>`

use crate::shared::form_engine::Navigator;
use contracts::domain::common::ResourceKind;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use web_sys::window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    List(ResourceKind),
    Create(ResourceKind),
    Edit(ResourceKind, i64),
}

impl Default for Page {
    fn default() -> Self {
        Page::List(ResourceKind::Blog)
    }
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

const NEW_ID: &str = "new";

impl Page {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Page::List(kind) | Page::Create(kind) | Page::Edit(kind, _) => *kind,
        }
    }

    pub fn to_query_string(&self) -> String {
        let id = match self {
            Page::List(_) => None,
            Page::Create(_) => Some(NEW_ID.to_string()),
            Page::Edit(_, id) => Some(id.to_string()),
        };
        let query = PageQuery {
            page: Some(self.kind().code().to_string()),
            id,
        };
        serde_qs::to_string(&query).unwrap_or_default()
    }

    /// Unknown resources and forms of read-only resources yield `None`
    pub fn from_query_string(search: &str) -> Option<Page> {
        let query: PageQuery = serde_qs::from_str(search.trim_start_matches('?')).ok()?;
        let kind: ResourceKind = query.page?.parse().ok()?;
        match query.id.as_deref() {
            None => Some(Page::List(kind)),
            Some(_) if !kind.has_form() => None,
            Some(NEW_ID) => Some(Page::Create(kind)),
            Some(id) => id.parse().ok().map(|id| Page::Edit(kind, id)),
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppNavigation {
    page: RwSignal<Page>,
}

impl AppNavigation {
    /// Start from the page in the current URL
    pub fn new() -> Self {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let page = Page::from_query_string(&search).unwrap_or_default();
        Self {
            page: RwSignal::new(page),
        }
    }

    pub fn page(&self) -> Page {
        self.page.get()
    }

    pub fn go(&self, page: Page) {
        log::debug!("navigate to {:?}", page);
        self.page.set(page);
    }

    /// Keep the address bar in step with the current page
    pub fn init_url_sync(&self) {
        let page = self.page;
        Effect::new(move |_| {
            let new_url = format!("?{}", page.get().to_query_string());
            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }
}

impl Default for AppNavigation {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for AppNavigation {
    fn to_list(&self, kind: ResourceKind) {
        self.go(Page::List(kind));
    }
}

pub fn use_navigation() -> AppNavigation {
    use_context::<AppNavigation>().expect("AppNavigation not provided in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_round_trip_through_query() {
        let pages = [
            Page::List(ResourceKind::AboutSection),
            Page::Create(ResourceKind::News),
            Page::Edit(ResourceKind::Course, 12),
        ];
        for page in pages {
            assert_eq!(Page::from_query_string(&page.to_query_string()), Some(page));
        }
        assert_eq!(
            Page::Edit(ResourceKind::News, 12).to_query_string(),
            "page=news&id=12"
        );
    }

    #[test]
    fn test_invalid_queries_are_rejected() {
        assert_eq!(Page::from_query_string("?page=unknown"), None);
        assert_eq!(Page::from_query_string("?page=contact&id=new"), None);
        assert_eq!(Page::from_query_string("?page=blog&id=abc"), None);
        assert_eq!(
            Page::from_query_string("?page=contact"),
            Some(Page::List(ResourceKind::Contact))
        );
    }
}

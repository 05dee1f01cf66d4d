use super::lang::Lang;
use serde::{Deserialize, Serialize};

/// Параметры запроса списка (`?lang=az&page=1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub lang: Lang,
    /// Номер страницы, начиная с 1
    pub page: u32,
}

impl ListQuery {
    pub fn new(lang: Lang, page: u32) -> Self {
        Self {
            lang,
            page: page.max(1),
        }
    }
}

/// Страница списка ресурсов
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    #[serde(rename = "totalItems", default)]
    pub total_items: u64,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total_items: 0,
            total_pages: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_camel_case_totals() {
        let json = r#"{"data":[1,2],"totalItems":12,"totalPages":2}"#;
        let resp: ListResponse<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data, vec![1, 2]);
        assert_eq!(resp.total_items, 12);
        assert_eq!(resp.total_pages, 2);
    }

    #[test]
    fn test_list_query_page_starts_at_one() {
        assert_eq!(ListQuery::new(Lang::Az, 0).page, 1);
    }
}

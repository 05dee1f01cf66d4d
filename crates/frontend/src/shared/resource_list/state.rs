use contracts::shared::{Lang, ListQuery};

/// Paging position and language of a list screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListState {
    pub lang: Lang,
    /// 1-based, as the backend counts pages
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl ListState {
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            page: 1,
            total_pages: 0,
            total_items: 0,
        }
    }

    pub fn query(&self) -> ListQuery {
        ListQuery::new(self.lang, self.page)
    }

    /// Record the totals of a loaded page. If the current page no longer
    /// exists (last item of the last page deleted) step back to the last one.
    pub fn apply_totals(&mut self, total_items: u64, total_pages: u32) {
        self.total_items = total_items;
        self.total_pages = total_pages;
        if total_pages > 0 && self.page > total_pages {
            self.page = total_pages;
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_forward(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns false if `page` is out of range
    pub fn go_to(&mut self, page: u32) -> bool {
        if page == 0 || page == self.page || (self.total_pages > 0 && page > self.total_pages) {
            return false;
        }
        self.page = page;
        true
    }

    /// Changing the language starts again from the first page
    pub fn set_lang(&mut self, lang: Lang) {
        if self.lang != lang {
            self.lang = lang;
            self.page = 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_stays_in_range() {
        let mut state = ListState::new(Lang::Az);
        state.apply_totals(25, 3);
        assert!(!state.can_go_back());
        assert!(state.go_to(3));
        assert!(!state.can_go_forward());
        assert!(!state.go_to(4));
        assert!(!state.go_to(0));
        assert_eq!(state.query(), ListQuery::new(Lang::Az, 3));
    }

    #[test]
    fn test_page_steps_back_when_it_disappears() {
        let mut state = ListState::new(Lang::Az);
        state.apply_totals(21, 3);
        state.go_to(3);
        state.apply_totals(20, 2);
        assert_eq!(state.page, 2);

        state.apply_totals(0, 0);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_language_change_resets_page() {
        let mut state = ListState::new(Lang::Az);
        state.apply_totals(40, 4);
        state.go_to(2);
        state.set_lang(Lang::Ru);
        assert_eq!(state.page, 1);
        assert_eq!(state.query().lang, Lang::Ru);
    }
}

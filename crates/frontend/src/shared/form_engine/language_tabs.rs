//! LanguageTabState: active tab, visited tabs and the unsaved-edits flag

use contracts::shared::Lang;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    active: Lang,
    visited: BTreeSet<Lang>,
    /// One flag for the whole form, not per language
    has_unsaved_edits: bool,
    edit_seq: u64,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(Lang::Az)
    }
}

impl EditSession {
    /// Nothing is visited yet; the first fetch records the initial tab
    pub fn new(initial: Lang) -> Self {
        Self {
            active: initial,
            visited: BTreeSet::new(),
            has_unsaved_edits: false,
            edit_seq: 0,
        }
    }

    pub fn active(&self) -> Lang {
        self.active
    }

    pub fn is_visited(&self, lang: Lang) -> bool {
        self.visited.contains(&lang)
    }

    pub fn visited(&self) -> impl Iterator<Item = Lang> + '_ {
        self.visited.iter().copied()
    }

    pub fn has_unsaved_edits(&self) -> bool {
        self.has_unsaved_edits
    }

    /// Increases on every edit
    pub fn edit_seq(&self) -> u64 {
        self.edit_seq
    }

    pub fn switch_to(&mut self, lang: Lang) {
        self.active = lang;
        self.visited.insert(lang);
    }

    pub fn mark_edited(&mut self) {
        self.has_unsaved_edits = true;
        self.edit_seq += 1;
    }

    /// A language is fetched on its first visit, or any time the form has
    /// no unsaved edits.
    pub fn should_fetch(&self, lang: Lang) -> bool {
        !self.visited.contains(&lang) || !self.has_unsaved_edits
    }

    pub fn reset_after_successful_save(&mut self) {
        self.has_unsaved_edits = false;
    }

    /// Clear the edited flag after hydration, unless the user edited
    /// something since `seq` was observed. Returns whether it was cleared.
    pub fn clear_after_hydration(&mut self, seq: u64) -> bool {
        if self.edit_seq != seq {
            return false;
        }
        self.has_unsaved_edits = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visit_always_fetches() {
        let mut session = EditSession::new(Lang::Az);
        session.mark_edited();
        assert!(session.should_fetch(Lang::En));
        session.switch_to(Lang::En);
        assert!(!session.should_fetch(Lang::En));
        assert_eq!(session.active(), Lang::En);
    }

    #[test]
    fn test_revisit_fetches_only_without_edits() {
        let mut session = EditSession::new(Lang::Az);
        session.switch_to(Lang::Az);
        session.switch_to(Lang::Ru);
        assert!(session.should_fetch(Lang::Az));

        session.mark_edited();
        assert!(!session.should_fetch(Lang::Az));
        assert!(!session.should_fetch(Lang::Ru));
        assert!(session.should_fetch(Lang::En));

        session.reset_after_successful_save();
        assert!(session.should_fetch(Lang::Az));
    }

    #[test]
    fn test_edit_in_any_language_blocks_all_refetches() {
        let mut session = EditSession::new(Lang::Az);
        for lang in Lang::ALL {
            session.switch_to(lang);
        }
        session.switch_to(Lang::Ru);
        session.mark_edited();
        for lang in Lang::ALL {
            assert!(!session.should_fetch(lang));
        }
    }

    #[test]
    fn test_hydration_does_not_clear_newer_edits() {
        let mut session = EditSession::new(Lang::Az);
        session.mark_edited();
        let seq = session.edit_seq();
        session.mark_edited();
        assert!(!session.clear_after_hydration(seq));
        assert!(session.has_unsaved_edits());
        assert!(session.clear_after_hydration(session.edit_seq()));
        assert!(!session.has_unsaved_edits());
    }
}

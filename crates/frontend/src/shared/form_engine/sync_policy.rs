//! RecordSyncPolicy
//!
//! Decides when a record is fetched for a language and whether a response is
//! still wanted when it arrives.

use super::binder::MultilingualFormBinder;
use super::language_tabs::EditSession;
use contracts::domain::common::ResourceRecord;
use contracts::shared::Lang;
use std::collections::BTreeSet;

/// Issued with every fetch, checked when the response arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    lang: Lang,
    edit_seq: u64,
}

impl FetchTicket {
    pub fn lang(&self) -> Lang {
        self.lang
    }
}

/// A fetch the caller should perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub id: i64,
    pub lang: Lang,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// `hydrated` is true when this response was the first population
    Applied { lang: Lang, hydrated: bool },
    Failed { lang: Lang, message: String },
    Discarded,
}

#[derive(Debug, Clone, Default)]
pub struct RecordSyncPolicy {
    record_id: Option<i64>,
    generation: u64,
    in_flight: BTreeSet<Lang>,
    populated: bool,
    torn_down: bool,
}

impl RecordSyncPolicy {
    pub fn new(record_id: Option<i64>) -> Self {
        Self {
            record_id,
            ..Self::default()
        }
    }

    pub fn record_id(&self) -> Option<i64> {
        self.record_id
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn is_fetching(&self, lang: Lang) -> bool {
        self.in_flight.contains(&lang)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Mount: fetch the initial language in edit mode
    pub fn on_mount(&mut self, tabs: &mut EditSession) -> Option<FetchRequest> {
        let lang = tabs.active();
        self.on_switch(tabs, lang)
    }

    /// The fetch gate is checked before the switch records the visit
    pub fn on_switch(&mut self, tabs: &mut EditSession, lang: Lang) -> Option<FetchRequest> {
        let wants_fetch = tabs.should_fetch(lang);
        tabs.switch_to(lang);

        if self.torn_down || !wants_fetch {
            return None;
        }
        let id = self.record_id?;
        if !self.in_flight.insert(lang) {
            log::debug!("fetch for {} already in flight", lang);
            return None;
        }
        Some(FetchRequest {
            ticket: FetchTicket {
                generation: self.generation,
                lang,
                edit_seq: tabs.edit_seq(),
            },
            id,
            lang,
        })
    }

    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<ResourceRecord, String>,
        tabs: &mut EditSession,
        binder: &mut MultilingualFormBinder,
    ) -> SyncOutcome {
        if self.torn_down || ticket.generation != self.generation {
            return SyncOutcome::Discarded;
        }
        self.in_flight.remove(&ticket.lang);

        match result {
            Ok(record) => {
                binder.apply_server_record(&record, ticket.lang);
                let first = !self.populated;
                self.populated = true;
                let hydrated = first && tabs.clear_after_hydration(ticket.edit_seq);
                SyncOutcome::Applied {
                    lang: ticket.lang,
                    hydrated,
                }
            }
            Err(message) => {
                log::warn!("failed to load record for {}: {}", ticket.lang, message);
                SyncOutcome::Failed {
                    lang: ticket.lang,
                    message,
                }
            }
        }
    }

    /// Responses issued before this point are dropped
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.generation += 1;
        self.in_flight.clear();
    }
}

//! Type-ahead suggestions with stale-result suppression.
//!
//! Suggestion fetches are not serialized. Each refresh opens a new session and
//! retires the previous one; a completion is applied only when its session is
//! still the current one and the engine has not been torn down.

use tracing::debug;

use crate::backend::BackendError;
use crate::types::{Row, RowId, Suggestion};

/// Identifies one suggestion fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionTicket {
    pub session: u64,
    pub term: String,
    pub limit: usize,
}

#[derive(Debug, PartialEq)]
pub enum SuggestionOutcome {
    Shown(usize),
    Hidden,
    Stale,
}

#[derive(Debug)]
pub struct SuggestionEngine {
    limit: usize,
    min_chars: usize,
    session: u64,
    torn_down: bool,
    items: Vec<Suggestion>,
    visible: bool,
}

impl SuggestionEngine {
    pub fn new(limit: usize, min_chars: usize) -> Self {
        Self {
            limit,
            min_chars,
            session: 0,
            torn_down: false,
            items: Vec::new(),
            visible: false,
        }
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn find(&self, id: &RowId) -> Option<&Suggestion> {
        self.items.iter().find(|s| &s.id == id)
    }

    /// Whether `term` is long enough to ask for suggestions.
    pub fn meets_min_length(&self, term: &str) -> bool {
        term.trim().chars().count() >= self.min_chars
    }

    /// React to a change of term, filters or guard state.
    ///
    /// Always retires the current session. Returns a ticket when a fetch should
    /// be issued; otherwise the list is cleared and hidden.
    pub fn refresh(&mut self, term: &str, enabled: bool) -> Option<SuggestionTicket> {
        self.session += 1;
        if self.torn_down {
            return None;
        }
        if !enabled || !self.meets_min_length(term) {
            self.items.clear();
            self.visible = false;
            return None;
        }
        Some(SuggestionTicket {
            session: self.session,
            term: term.trim().to_string(),
            limit: self.limit,
        })
    }

    /// Apply a finished fetch. `may_show` carries whether the input still
    /// qualifies for a visible list (guard enabled, term long enough).
    pub fn complete(
        &mut self,
        ticket: &SuggestionTicket,
        result: Result<Vec<Row>, BackendError>,
        may_show: bool,
    ) -> SuggestionOutcome {
        if self.torn_down || ticket.session != self.session {
            debug!(
                session = ticket.session,
                current = self.session,
                term = %ticket.term,
                "discarding stale suggestions"
            );
            return SuggestionOutcome::Stale;
        }

        match result {
            Ok(rows) => {
                self.items = rows.iter().take(self.limit).map(Suggestion::from).collect();
                self.visible = may_show && !self.items.is_empty();
                if self.visible {
                    SuggestionOutcome::Shown(self.items.len())
                } else {
                    SuggestionOutcome::Hidden
                }
            }
            Err(e) => {
                debug!("suggestion fetch failed for {:?}: {}", ticket.term, e);
                self.items.clear();
                self.visible = false;
                SuggestionOutcome::Hidden
            }
        }
    }

    /// Recompute visibility after an edit or focus without fetching.
    pub fn reveal_if(&mut self, term: &str, enabled: bool) {
        self.visible = enabled && self.meets_min_length(term) && !self.items.is_empty();
    }

    /// Clear and hide the list, retiring any in-flight session.
    pub fn close(&mut self) {
        self.session += 1;
        self.items.clear();
        self.visible = false;
    }

    /// No completion is applied after teardown.
    pub fn teardown(&mut self) {
        self.close();
        self.torn_down = true;
    }
}

//! Offset pagination for the main result list.
//!
//! Appends are gated on `!loading && has_more && !rows.is_empty()`, so at most
//! one append is ever in flight. Resets are not gated: a reset issued while a
//! fetch is outstanding supersedes it, and the superseded completion is
//! discarded by generation number.

use tracing::debug;

use crate::backend::BackendError;
use crate::types::Row;

#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    /// Offset of the most recently issued fetch
    pub offset: usize,
    pub page_size: usize,
    /// Pages applied since the last reset
    pub page: usize,
    pub has_more: bool,
    pub loading: bool,
    pub rows: Vec<Row>,
}

/// Identifies one issued page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    pub generation: u64,
    pub reset: bool,
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug)]
pub enum PageOutcome {
    /// Rows were applied; `added` is the size of the returned page.
    Applied { added: usize },
    /// The fetch failed; rows were left untouched.
    Failed(BackendError),
    /// A newer fetch superseded this one.
    Stale,
}

#[derive(Debug)]
pub struct PaginationController {
    state: PageState,
    generation: u64,
}

impl PaginationController {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: PageState {
                offset: 0,
                page_size: page_size.max(1),
                page: 0,
                has_more: false,
                loading: false,
                rows: Vec::new(),
            },
            generation: 0,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn rows(&self) -> &[Row] {
        &self.state.rows
    }

    pub fn can_load_more(&self) -> bool {
        !self.state.loading && self.state.has_more && !self.state.rows.is_empty()
    }

    pub fn begin_reset(&mut self) -> PageTicket {
        self.issue(true, 0)
    }

    /// `None` when an append would duplicate an in-flight fetch or read past the end.
    pub fn begin_append(&mut self) -> Option<PageTicket> {
        if !self.can_load_more() {
            return None;
        }
        let offset = self.state.page * self.state.page_size;
        Some(self.issue(false, offset))
    }

    fn issue(&mut self, reset: bool, offset: usize) -> PageTicket {
        self.generation += 1;
        self.state.loading = true;
        self.state.offset = offset;
        PageTicket {
            generation: self.generation,
            reset,
            offset,
            limit: self.state.page_size,
        }
    }

    pub fn complete(
        &mut self,
        ticket: PageTicket,
        result: Result<Vec<Row>, BackendError>,
    ) -> PageOutcome {
        if ticket.generation != self.generation {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "discarding superseded page"
            );
            return PageOutcome::Stale;
        }

        self.state.loading = false;
        match result {
            Ok(rows) => {
                let added = rows.len();
                self.state.has_more = added == self.state.page_size;
                if ticket.reset {
                    self.state.rows = rows;
                    self.state.page = 1;
                } else {
                    self.state.rows.extend(rows);
                    self.state.page += 1;
                }
                PageOutcome::Applied { added }
            }
            Err(e) => {
                self.state.has_more = false;
                PageOutcome::Failed(e)
            }
        }
    }
}

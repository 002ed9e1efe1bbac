use std::time::Duration;

use crate::debounce::DEFAULT_TERM_DEBOUNCE;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 6;
pub const DEFAULT_MIN_SUGGESTION_CHARS: usize = 2;

/// Tunables for the search engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Rows per page of the main list
    pub page_size: usize,
    /// Maximum number of autocomplete entries
    pub suggestion_limit: usize,
    /// Minimum trimmed term length before suggestions are fetched
    pub min_suggestion_chars: usize,
    /// Quiet period before a typed term is acted upon
    pub term_debounce: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            min_suggestion_chars: DEFAULT_MIN_SUGGESTION_CHARS,
            term_debounce: DEFAULT_TERM_DEBOUNCE,
        }
    }
}

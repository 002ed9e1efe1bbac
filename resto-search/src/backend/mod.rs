//! The remote capabilities the engine consumes, plus in-process stand-ins.
//!
//! - [`SearchBackend`] - the search call (and the filter-option lookups)
//! - [`DetailBackend`] - one restaurant with its schedules and menu
//! - [`MemoryBackend`] - deterministic in-memory catalog for dev mode
//! - `ScriptedBackend` - test double whose calls resolve when the test says so
//!   (`test-util` feature)

use async_trait::async_trait;

use crate::detail::{MenuItem, Schedule, ScheduleRule};
use crate::query::Query;
use crate::types::{Row, RowId};

pub mod memory;
#[cfg(any(test, feature = "test-util"))]
pub mod scripted;

pub use memory::MemoryBackend;
#[cfg(any(test, feature = "test-util"))]
pub use scripted::{PendingSearch, ScriptedBackend};

/// Fallback shown to the user when the backend gave no usable message.
pub const GENERIC_LOAD_ERROR: &str = "Could not load the list";
pub const RESTAURANT_NOT_FOUND: &str = "Restaurant not found";
pub const INVALID_RESTAURANT_ID: &str = "Invalid restaurant id";

#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    NotFound(String),
}

impl BackendError {
    /// Text for the user-facing notice: the backend's own message when it sent
    /// one, the generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Rejected { message, .. } if !message.trim().is_empty() => {
                message.trim().to_string()
            }
            BackendError::NotFound(message) => message.clone(),
            _ => GENERIC_LOAD_ERROR.to_string(),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            BackendError::Decode(e.to_string())
        } else {
            BackendError::Transport(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// One page of a search: the filter tuple plus a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: Option<String>,
    pub category: Option<String>,
    pub locality: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl SearchRequest {
    pub fn new(query: &Query, limit: usize, offset: usize) -> Self {
        Self {
            term: query.term.clone(),
            category: query.category.clone(),
            locality: query.locality.clone(),
            limit,
            offset,
        }
    }
}

/// Remote catalog search.
///
/// Implementations must order results deterministically for a fixed filter
/// tuple and offset, and may return fewer than `limit` rows only when no
/// further rows exist.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Row>>;

    /// Raw category values present in the catalog (duplicates allowed).
    async fn categories(&self) -> Result<Vec<String>>;

    /// Raw locality values present in the catalog (duplicates allowed).
    async fn localities(&self) -> Result<Vec<String>>;
}

/// Lookups behind the restaurant screen, all keyed by the restaurant id.
#[async_trait]
pub trait DetailBackend: Send + Sync {
    /// [`BackendError::NotFound`] when no restaurant has this id.
    async fn restaurant(&self, id: &RowId) -> Result<Row>;

    /// Single-day slots ordered by day.
    async fn schedules(&self, id: &RowId) -> Result<Vec<Schedule>>;

    async fn schedule_rules(&self, id: &RowId) -> Result<Vec<ScheduleRule>>;

    /// Active dishes ordered by `sort_index`, then name.
    async fn menu(&self, id: &RowId) -> Result<Vec<MenuItem>>;
}

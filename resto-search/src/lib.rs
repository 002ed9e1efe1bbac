//! Search, filter, pagination and autocomplete coordination for the
//! restaurant directory.
//!
//! [`SearchOrchestrator`] owns all state. Front ends feed it input events and
//! clock ticks, drain its completion queue, and render its read-only fields.

pub mod backend;
pub mod debounce;
pub mod detail;
pub mod guard;
pub mod options;
pub mod orchestrator;
pub mod pagination;
pub mod query;
pub mod settings;
pub mod suggestions;
pub mod supabase;
pub mod types;

pub use backend::{
    BackendError, DetailBackend, MemoryBackend, SearchBackend, SearchRequest, GENERIC_LOAD_ERROR,
};
#[cfg(any(test, feature = "test-util"))]
pub use backend::ScriptedBackend;
pub use detail::{
    ContactLinks, DetailState, MenuItem, MenuSection, RestaurantDetail, Schedule, ScheduleRule,
    ALL_MENU_TYPES,
};
pub use guard::GuardState;
pub use options::{FilterKind, FilterOptions};
pub use orchestrator::SearchOrchestrator;
pub use query::{Query, ALL_CATEGORIES, ALL_LOCALITIES};
pub use settings::EngineSettings;
pub use supabase::SupabaseClient;
pub use types::{Locality, Row, RowId, Suggestion};

//! Single owner of query, page, guard and suggestion state.
//!
//! Backend calls run as tokio tasks and post their results back through an
//! unbounded channel. State only changes when the owner drains that channel,
//! so every mutation happens on the owner's thread in arrival order. Must be
//! driven from inside a tokio runtime.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::backend::{BackendError, DetailBackend, SearchBackend, SearchRequest};
use crate::debounce::Debouncer;
use crate::detail::{load_detail, DetailState, RestaurantDetail};
use crate::guard::{GuardEvent, GuardState, SelectionGuard};
use crate::options::{normalize_options, FilterKind, FilterOptions};
use crate::pagination::{PageOutcome, PageState, PaginationController, PageTicket};
use crate::query::{Query, QueryState};
use crate::settings::EngineSettings;
use crate::suggestions::{SuggestionEngine, SuggestionTicket};
use crate::types::{Row, RowId, Suggestion};

#[derive(Debug)]
enum Completion {
    Page {
        ticket: PageTicket,
        result: Result<Vec<Row>, BackendError>,
    },
    Suggestions {
        ticket: SuggestionTicket,
        result: Result<Vec<Row>, BackendError>,
    },
    Options {
        kind: FilterKind,
        result: Result<Vec<String>, BackendError>,
    },
    Detail {
        generation: u64,
        result: Result<RestaurantDetail, BackendError>,
    },
    /// Zero-delay step after the input loses focus.
    BlurElapsed,
}

type CompletionTx = UnboundedSender<Completion>;
type CompletionRx = UnboundedReceiver<Completion>;

pub struct SearchOrchestrator {
    backend: Arc<dyn SearchBackend>,
    details: Option<Arc<dyn DetailBackend>>,
    input: String,
    input_focused: bool,
    debouncer: Debouncer<String>,
    query: QueryState,
    pages: PaginationController,
    suggestions: SuggestionEngine,
    guard: SelectionGuard,
    options: FilterOptions,
    pending_options: usize,
    detail: DetailState,
    detail_generation: u64,
    notice: Option<String>,
    shut_down: bool,
    completion_tx: CompletionTx,
    completion_rx: CompletionRx,
}

impl SearchOrchestrator {
    pub fn new(backend: Arc<dyn SearchBackend>, settings: EngineSettings) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            details: None,
            input: String::new(),
            input_focused: false,
            debouncer: Debouncer::new(settings.term_debounce),
            query: QueryState::new(),
            pages: PaginationController::new(settings.page_size),
            suggestions: SuggestionEngine::new(
                settings.suggestion_limit,
                settings.min_suggestion_chars,
            ),
            guard: SelectionGuard::new(),
            options: FilterOptions::default(),
            pending_options: 0,
            detail: DetailState::Closed,
            detail_generation: 0,
            notice: None,
            shut_down: false,
            completion_tx,
            completion_rx,
        }
    }

    /// Enables the restaurant screen.
    pub fn with_details(mut self, details: Arc<dyn DetailBackend>) -> Self {
        self.details = Some(details);
        self
    }

    // ---- UI-facing state ----

    /// Raw text of the search input.
    pub fn term(&self) -> &str {
        &self.input
    }

    pub fn query(&self) -> &Query {
        self.query.query()
    }

    pub fn category(&self) -> &str {
        self.query.category_label()
    }

    pub fn locality(&self) -> &str {
        self.query.locality_label()
    }

    pub fn rows(&self) -> &[Row] {
        self.pages.rows()
    }

    pub fn page_state(&self) -> &PageState {
        self.pages.state()
    }

    pub fn loading(&self) -> bool {
        self.pages.state().loading
    }

    pub fn has_more(&self) -> bool {
        self.pages.state().has_more
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.suggestions.items()
    }

    pub fn show_suggestions(&self) -> bool {
        self.suggestions.visible()
    }

    pub fn guard_state(&self) -> GuardState {
        self.guard.state()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn filter_options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn detail_state(&self) -> &DetailState {
        &self.detail
    }

    pub fn detail(&self) -> Option<&RestaurantDetail> {
        match &self.detail {
            DetailState::Ready(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    /// When the pending debounced term fires, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    // ---- operations ----

    /// Initial load: one unfiltered first page plus the filter choices.
    pub fn mount(&mut self) {
        if self.shut_down {
            return;
        }
        self.fetch_reset();
        self.load_options();
    }

    pub fn set_term(&mut self, text: &str, now: Instant) {
        if self.shut_down {
            return;
        }
        self.input = text.to_string();
        self.input_focused = true;
        self.guard.handle(GuardEvent::TermEdited);
        if text.trim().is_empty() {
            self.suggestions.close();
        } else {
            self.suggestions
                .reveal_if(&self.input, self.guard.is_enabled());
        }
        self.debouncer.push(text.to_string(), now);
    }

    /// Fire the debounced term if its quiet period is over. Returns true when it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.shut_down {
            return false;
        }
        match self.debouncer.poll(now) {
            Some(value) => {
                self.on_term_settled(&value);
                true
            }
            None => false,
        }
    }

    pub fn set_category(&mut self, value: &str) {
        if !self.shut_down && self.query.set_category(value) {
            self.fetch_reset();
            self.refresh_suggestions();
        }
    }

    pub fn set_locality(&mut self, value: &str) {
        if !self.shut_down && self.query.set_locality(value) {
            self.fetch_reset();
            self.refresh_suggestions();
        }
    }

    /// Explicit search: settle the typed term and reload from the first page.
    pub fn apply_filters(&mut self) {
        if self.shut_down {
            return;
        }
        self.suggestions.close();
        self.guard.handle(GuardEvent::SearchSubmitted);
        self.debouncer.cancel();
        self.query.set_term(&self.input);
        self.input_focused = false;
        self.fetch_reset();
    }

    /// Returns false when `id` is not in the current suggestion list.
    pub fn select_suggestion(&mut self, id: &RowId) -> bool {
        if self.shut_down {
            return false;
        }
        let Some(suggestion) = self.suggestions.find(id).cloned() else {
            return false;
        };
        self.input = suggestion.label.clone();
        self.suggestions.close();
        self.guard.handle(GuardEvent::SuggestionApplied);
        self.debouncer.cancel();
        self.query.set_term(&suggestion.label);
        self.input_focused = false;
        self.fetch_reset();
        true
    }

    /// Scroll-to-end. Returns true when a fetch was issued.
    pub fn load_more(&mut self) -> bool {
        if self.shut_down {
            return false;
        }
        match self.pages.begin_append() {
            Some(ticket) => {
                self.spawn_page(ticket);
                true
            }
            None => false,
        }
    }

    pub fn dismiss_suggestions(&mut self) {
        self.suggestions.close();
    }

    /// The result list started scrolling.
    pub fn scroll_began(&mut self) {
        self.suggestions.close();
    }

    pub fn focus(&mut self) {
        if self.shut_down {
            return;
        }
        self.input_focused = true;
        let reenabled = self.guard.handle(GuardEvent::InputFocused);
        self.suggestions
            .reveal_if(&self.input, self.guard.is_enabled());
        if reenabled {
            self.refresh_suggestions();
        }
    }

    /// The list closes after a zero-delay grace step, so a selection already
    /// queued behind the blur is handled first.
    pub fn blur(&mut self) {
        self.input_focused = false;
        let _ = self.completion_tx.send(Completion::BlurElapsed);
    }

    /// Start loading the restaurant screen for `id`, replacing whatever it
    /// showed. Returns false when there is no detail backend.
    pub fn open_detail(&mut self, id: &RowId) -> bool {
        if self.shut_down {
            return false;
        }
        let Some(details) = self.details.clone() else {
            return false;
        };
        self.detail_generation += 1;
        self.detail = DetailState::Loading(id.clone());

        let generation = self.detail_generation;
        let id = id.clone();
        debug!(generation, id = %id, "loading restaurant detail");
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = load_detail(&*details, &id).await;
            let _ = tx.send(Completion::Detail { generation, result });
        });
        true
    }

    /// Leave the restaurant screen; a load still in flight is discarded.
    pub fn close_detail(&mut self) {
        self.detail_generation += 1;
        self.detail = DetailState::Closed;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Stop reacting: cancel the debounce timer and ignore every later completion.
    pub fn shutdown(&mut self) {
        self.shut_down = true;
        self.debouncer.cancel();
        self.suggestions.teardown();
    }

    // ---- completion handling ----

    /// Apply every completion that is already waiting. Returns how many were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.handle(completion);
            applied += 1;
        }
        applied
    }

    /// Wait for the next completion and apply it.
    pub async fn next_completion(&mut self) -> bool {
        match self.completion_rx.recv().await {
            Some(completion) => {
                self.handle(completion);
                true
            }
            None => false,
        }
    }

    fn handle(&mut self, completion: Completion) {
        if self.shut_down {
            return;
        }
        match completion {
            Completion::Page { ticket, result } => match self.pages.complete(ticket, result) {
                PageOutcome::Applied { added } => {
                    debug!(
                        offset = ticket.offset,
                        added,
                        has_more = self.pages.state().has_more,
                        "page applied"
                    );
                }
                PageOutcome::Failed(e) => {
                    warn!("Failed to load page at offset {}: {}", ticket.offset, e);
                    self.notice = Some(e.user_message());
                }
                PageOutcome::Stale => {}
            },
            Completion::Suggestions { ticket, result } => {
                let may_show = self.guard.is_enabled()
                    && self.suggestions.meets_min_length(&self.input);
                self.suggestions.complete(&ticket, result, may_show);
            }
            Completion::Options { kind, result } => {
                match result {
                    Ok(raw) => {
                        let values = normalize_options(raw, kind.sentinel());
                        match kind {
                            FilterKind::Category => self.options.categories = values,
                            FilterKind::Locality => self.options.localities = values,
                        }
                    }
                    Err(e) => {
                        warn!("Failed to load {:?} options: {}", kind, e);
                        self.options.error = Some(e.user_message());
                    }
                }
                self.pending_options = self.pending_options.saturating_sub(1);
                self.options.loading = self.pending_options > 0;
            }
            Completion::Detail { generation, result } => {
                if generation != self.detail_generation {
                    debug!(generation, "discarding stale restaurant detail");
                } else {
                    match result {
                        Ok(detail) => self.detail = DetailState::Ready(Box::new(detail)),
                        Err(e) => {
                            warn!("Failed to load restaurant detail: {}", e);
                            self.notice = Some(e.user_message());
                            self.detail = DetailState::Closed;
                        }
                    }
                }
            }
            Completion::BlurElapsed => {
                if !self.input_focused {
                    self.suggestions.close();
                }
            }
        }
    }

    // ---- reactions ----

    /// Only suggestions follow a settled term; the list keeps its rows until
    /// the next reset, so a `load_more` in between appends the new term's
    /// later pages after the old term's first ones. That mix is intended.
    fn on_term_settled(&mut self, value: &str) {
        let changed = self.query.set_term(value);
        if self.query.query().term.is_none() {
            self.suggestions.close();
            if changed {
                self.fetch_reset();
            }
            return;
        }
        self.refresh_suggestions();
    }

    fn refresh_suggestions(&mut self) {
        let term = self.query.query().term.clone().unwrap_or_default();
        if let Some(ticket) = self.suggestions.refresh(&term, self.guard.is_enabled()) {
            self.spawn_suggestions(ticket);
        }
    }

    fn fetch_reset(&mut self) {
        let ticket = self.pages.begin_reset();
        self.spawn_page(ticket);
    }

    fn spawn_page(&self, ticket: PageTicket) {
        let request = SearchRequest::new(self.query.query(), ticket.limit, ticket.offset);
        debug!(
            reset = ticket.reset,
            offset = ticket.offset,
            limit = ticket.limit,
            "issuing page fetch"
        );
        let backend = Arc::clone(&self.backend);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = backend.search(&request).await;
            let _ = tx.send(Completion::Page { ticket, result });
        });
    }

    fn spawn_suggestions(&self, ticket: SuggestionTicket) {
        let query = self.query.query();
        let request = SearchRequest {
            term: Some(ticket.term.clone()),
            category: query.category.clone(),
            locality: query.locality.clone(),
            limit: ticket.limit,
            offset: 0,
        };
        debug!(session = ticket.session, term = %ticket.term, "issuing suggestion fetch");
        let backend = Arc::clone(&self.backend);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = backend.search(&request).await;
            let _ = tx.send(Completion::Suggestions { ticket, result });
        });
    }

    fn load_options(&mut self) {
        self.options.loading = true;
        self.options.error = None;
        for kind in [FilterKind::Category, FilterKind::Locality] {
            self.pending_options += 1;
            let backend = Arc::clone(&self.backend);
            let tx = self.completion_tx.clone();
            tokio::spawn(async move {
                let result = match kind {
                    FilterKind::Category => backend.categories().await,
                    FilterKind::Locality => backend.localities().await,
                };
                let _ = tx.send(Completion::Options { kind, result });
            });
        }
    }
}

impl Drop for SearchOrchestrator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ScriptedBackend;
    use std::time::Duration;

    fn engine(backend: &ScriptedBackend) -> SearchOrchestrator {
        SearchOrchestrator::new(Arc::new(backend.clone()), EngineSettings::default())
    }

    fn page(from: i64, count: usize) -> Vec<Row> {
        (0..count as i64)
            .map(|i| Row::new(from + i, format!("Restaurant {}", from + i)))
            .collect()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Let spawned fetches run and apply whatever they posted.
    async fn pump(engine: &mut SearchOrchestrator) {
        for _ in 0..16 {
            tokio::task::yield_now().await;
            engine.drain();
        }
    }

    fn suggestion_calls(backend: &ScriptedBackend) -> Vec<SearchRequest> {
        backend.calls().into_iter().filter(|r| r.limit == 6).collect()
    }

    /// Mount and answer the first page with `count` rows.
    async fn mounted(backend: &ScriptedBackend, count: usize) -> SearchOrchestrator {
        let mut engine = engine(backend);
        engine.mount();
        backend.wait_pending(1).await;
        backend.next_pending().unwrap().respond(page(1, count));
        pump(&mut engine).await;
        engine
    }

    /// Type `text`, let the debounce fire and answer the suggestion fetch.
    async fn suggest(
        backend: &ScriptedBackend,
        engine: &mut SearchOrchestrator,
        text: &str,
        rows: Vec<Row>,
    ) {
        let now = Instant::now();
        engine.set_term(text, now);
        assert!(engine.tick(now + ms(250)));
        backend.wait_pending(1).await;
        backend
            .take_pending(|r| r.limit == 6)
            .unwrap()
            .respond(rows);
        pump(engine).await;
    }

    #[tokio::test]
    async fn mount_scroll_until_exhausted() {
        let backend = ScriptedBackend::new();
        let mut engine = engine(&backend);

        engine.mount();
        assert!(engine.loading());
        backend.wait_pending(1).await;
        let first = backend.next_pending().unwrap();
        assert_eq!(
            first.request,
            SearchRequest {
                term: None,
                category: None,
                locality: None,
                limit: 20,
                offset: 0
            }
        );
        first.respond(page(1, 20));
        pump(&mut engine).await;

        assert!(engine.has_more());
        assert!(!engine.loading());
        assert_eq!(engine.page_state().page, 1);
        assert_eq!(engine.rows().len(), 20);

        assert!(engine.load_more());
        backend.wait_pending(1).await;
        let second = backend.next_pending().unwrap();
        assert_eq!(second.request.offset, 20);
        second.respond(page(21, 12));
        pump(&mut engine).await;

        assert!(!engine.has_more());
        assert_eq!(engine.rows().len(), 32);
        assert_eq!(engine.rows()[20].id, RowId::Number(21));
        assert!(!engine.load_more());
        assert!(!engine.load_more());
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn rapid_load_more_issues_one_fetch() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 20).await;

        assert!(engine.load_more());
        assert!(engine.loading());
        assert!(!engine.load_more());
        backend.wait_pending(1).await;
        pump(&mut engine).await;

        assert_eq!(backend.calls().len(), 2);
        assert_eq!(backend.pending_len(), 1);
    }

    #[tokio::test]
    async fn typing_burst_issues_one_suggestion_fetch() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 5).await;
        let start = Instant::now();

        for (i, text) in ["p", "pi", "piz", "pizz", "pizza"].iter().enumerate() {
            let now = start + ms(50 * i as u64);
            engine.set_term(text, now);
            assert!(!engine.tick(now));
        }
        assert_eq!(engine.next_deadline(), Some(start + ms(450)));
        assert!(!engine.tick(start + ms(449)));
        assert!(engine.tick(start + ms(450)));
        backend.wait_pending(1).await;

        let calls = suggestion_calls(&backend);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].term.as_deref(), Some("pizza"));
        assert_eq!(calls[0].offset, 0);
        // A typed term alone never reloads the main list.
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn slow_older_suggestions_never_win() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 5).await;
        let start = Instant::now();

        engine.set_term("piz", start);
        assert!(engine.tick(start + ms(250)));
        engine.set_term("pizza", start + ms(300));
        assert!(engine.tick(start + ms(550)));
        backend.wait_pending(2).await;

        backend
            .take_pending(|r| r.term.as_deref() == Some("pizza"))
            .unwrap()
            .respond(vec![Row::new(1, "La Pizza Loca"), Row::new(7, "Pizzeria Roma")]);
        pump(&mut engine).await;
        assert!(engine.show_suggestions());

        backend
            .take_pending(|r| r.term.as_deref() == Some("piz"))
            .unwrap()
            .respond(vec![Row::new(9, "Pizarro Grill")]);
        pump(&mut engine).await;

        let labels: Vec<_> = engine.suggestions().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["La Pizza Loca", "Pizzeria Roma"]);
        assert!(engine.show_suggestions());
    }

    #[tokio::test]
    async fn selecting_a_suggestion_keeps_the_list_closed() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 5).await;
        suggest(&backend, &mut engine, "pizz", vec![Row::new(7, "Pizzeria Roma")]).await;
        assert!(engine.show_suggestions());

        assert!(engine.select_suggestion(&RowId::Number(7)));
        assert_eq!(engine.term(), "Pizzeria Roma");
        assert_eq!(engine.query().term.as_deref(), Some("Pizzeria Roma"));
        assert!(!engine.show_suggestions());
        assert!(!engine.input_focused());
        assert_eq!(engine.guard_state(), GuardState::Disabled);

        backend.wait_pending(1).await;
        let reset = backend.next_pending().unwrap();
        assert_eq!(reset.request.offset, 0);
        assert_eq!(reset.request.limit, 20);
        assert_eq!(reset.request.term.as_deref(), Some("Pizzeria Roma"));
        reset.respond(vec![Row::new(7, "Pizzeria Roma")]);
        pump(&mut engine).await;

        assert!(!engine.tick(Instant::now() + ms(10_000)));
        assert!(!engine.show_suggestions());
        assert_eq!(suggestion_calls(&backend).len(), 1);

        // The next edit re-enables autocomplete.
        let now = Instant::now();
        engine.set_term("Pizzeria Rom", now);
        assert_eq!(engine.guard_state(), GuardState::Enabled);
        assert!(engine.tick(now + ms(250)));
        backend.wait_pending(1).await;
        assert_eq!(suggestion_calls(&backend).len(), 2);
    }

    #[tokio::test]
    async fn in_flight_suggestions_are_dropped_after_selection() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 5).await;
        suggest(&backend, &mut engine, "pizz", vec![Row::new(7, "Pizzeria Roma")]).await;

        let now = Instant::now();
        engine.set_term("pizze", now);
        assert!(engine.tick(now + ms(250)));
        backend.wait_pending(1).await;
        let late = backend.take_pending(|r| r.limit == 6).unwrap();

        assert!(engine.select_suggestion(&RowId::Number(7)));
        late.respond(vec![Row::new(7, "Pizzeria Roma")]);
        pump(&mut engine).await;

        assert!(!engine.show_suggestions());
        assert!(engine.suggestions().is_empty());
    }

    #[tokio::test]
    async fn unknown_suggestion_id_is_ignored() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 5).await;
        assert!(!engine.select_suggestion(&RowId::Number(99)));
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn clearing_the_term_resets_unfiltered() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 5).await;
        suggest(&backend, &mut engine, "sushi", vec![Row::new(3, "Sushi Zen")]).await;

        engine.apply_filters();
        backend.wait_pending(1).await;
        let submitted = backend.next_pending().unwrap();
        assert_eq!(submitted.request.term.as_deref(), Some("sushi"));
        submitted.respond(vec![Row::new(3, "Sushi Zen")]);
        pump(&mut engine).await;

        let now = Instant::now();
        engine.set_term("  ", now);
        assert!(!engine.show_suggestions());
        assert!(engine.suggestions().is_empty());
        assert!(engine.tick(now + ms(250)));

        backend.wait_pending(1).await;
        let reset = backend.next_pending().unwrap();
        assert_eq!(reset.request.term, None);
        assert_eq!(reset.request.offset, 0);
    }

    #[tokio::test]
    async fn filter_change_resets_without_debounce() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 20).await;

        engine.set_category("Pizzería");
        assert!(engine.loading());
        backend.wait_pending(1).await;
        let reset = backend.next_pending().unwrap();
        assert_eq!(reset.request.category.as_deref(), Some("Pizzería"));
        assert_eq!(reset.request.offset, 0);
        reset.respond(page(100, 4));
        pump(&mut engine).await;
        assert_eq!(engine.rows().len(), 4);
        assert_eq!(engine.page_state().page, 1);

        engine.set_category(" Pizzería ");
        assert_eq!(backend.calls().len(), 2);

        engine.set_locality("Todas");
        assert_eq!(backend.calls().len(), 2);

        engine.set_category("Todos");
        backend.wait_pending(1).await;
        assert_eq!(backend.next_pending().unwrap().request.category, None);
        assert_eq!(engine.category(), "Todos");
    }

    #[tokio::test]
    async fn newer_reset_wins_over_slower_older_one() {
        let backend = ScriptedBackend::new();
        let mut engine = engine(&backend);

        engine.mount();
        engine.set_locality("Orihuela");
        backend.wait_pending(2).await;

        backend
            .take_pending(|r| r.locality.is_some())
            .unwrap()
            .respond(page(50, 3));
        pump(&mut engine).await;
        assert!(!engine.loading());

        backend.next_pending().unwrap().respond(page(1, 20));
        pump(&mut engine).await;

        assert_eq!(engine.rows().len(), 3);
        assert!(!engine.has_more());
    }

    #[tokio::test]
    async fn page_failure_raises_notice_and_keeps_rows() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 20).await;

        assert!(engine.load_more());
        backend.wait_pending(1).await;
        backend.next_pending().unwrap().fail(BackendError::Rejected {
            status: 500,
            message: "statement timeout".to_string(),
        });
        pump(&mut engine).await;

        assert_eq!(engine.notice(), Some("statement timeout"));
        assert_eq!(engine.rows().len(), 20);
        assert_eq!(engine.page_state().page, 1);
        assert!(!engine.has_more());
        assert!(!engine.loading());
        assert!(!engine.load_more());

        engine.dismiss_notice();
        assert_eq!(engine.notice(), None);
    }

    #[tokio::test]
    async fn suggestion_failure_is_silent() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 5).await;
        let now = Instant::now();

        engine.set_term("tapas", now);
        assert!(engine.tick(now + ms(250)));
        backend.wait_pending(1).await;
        backend
            .next_pending()
            .unwrap()
            .fail(BackendError::Transport("offline".to_string()));
        pump(&mut engine).await;

        assert_eq!(engine.notice(), None);
        assert!(!engine.show_suggestions());
        assert!(engine.suggestions().is_empty());
    }

    #[tokio::test]
    async fn blur_closes_after_grace_step() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 5).await;
        suggest(&backend, &mut engine, "bar", vec![Row::new(4, "Bar Tapas")]).await;

        engine.blur();
        assert!(engine.show_suggestions());
        pump(&mut engine).await;
        assert!(!engine.show_suggestions());
    }

    #[tokio::test]
    async fn refocus_after_submit_reenables_suggestions() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 5).await;
        suggest(&backend, &mut engine, "bar", vec![Row::new(4, "Bar Tapas")]).await;

        engine.apply_filters();
        assert_eq!(engine.guard_state(), GuardState::Disabled);
        backend.wait_pending(1).await;
        backend.next_pending().unwrap().respond(vec![]);
        pump(&mut engine).await;

        engine.focus();
        assert_eq!(engine.guard_state(), GuardState::Enabled);
        backend.wait_pending(1).await;
        backend
            .take_pending(|r| r.limit == 6)
            .unwrap()
            .respond(vec![Row::new(4, "Bar Tapas")]);
        pump(&mut engine).await;
        assert!(engine.show_suggestions());
    }

    #[tokio::test]
    async fn scrolling_dismisses_suggestions() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 5).await;
        suggest(&backend, &mut engine, "bar", vec![Row::new(4, "Bar Tapas")]).await;

        engine.scroll_began();
        assert!(!engine.show_suggestions());
    }

    #[tokio::test]
    async fn shutdown_ignores_late_results() {
        let backend = ScriptedBackend::new();
        let mut engine = engine(&backend);
        engine.mount();
        let now = Instant::now();
        engine.set_term("tapas", now);
        assert!(engine.tick(now + ms(250)));
        backend.wait_pending(2).await;

        engine.set_term("tapas bar", now + ms(300));
        engine.shutdown();
        assert!(!engine.tick(now + ms(1_000)));

        while let Some(pending) = backend.next_pending() {
            pending.respond(vec![Row::new(4, "Bar Tapas")]);
        }
        pump(&mut engine).await;

        assert!(engine.rows().is_empty());
        assert!(engine.suggestions().is_empty());
        assert!(engine.loading());
    }

    #[tokio::test]
    async fn mount_loads_sorted_filter_options() {
        let backend = ScriptedBackend::new().with_facets(
            &["Tapas", "Pizzería", "Tapas"],
            &["Orihuela", "Villamartín"],
        );
        let mut engine = mounted(&backend, 0).await;

        let options = engine.filter_options();
        assert!(!options.loading);
        assert_eq!(options.categories, ["Todos", "Pizzería", "Tapas"]);
        assert_eq!(options.localities, ["Todas", "Orihuela", "Villamartín"]);
        assert!(!engine.has_more());
        assert!(!engine.load_more());
        engine.shutdown();
    }

    #[tokio::test]
    async fn selection_queued_behind_blur_still_applies() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 5).await;
        suggest(&backend, &mut engine, "bar", vec![Row::new(4, "Bar Tapas")]).await;

        engine.blur();
        assert!(engine.select_suggestion(&RowId::Number(4)));
        pump(&mut engine).await;

        assert!(!engine.show_suggestions());
        assert_eq!(engine.guard_state(), GuardState::Disabled);
        assert_eq!(engine.term(), "Bar Tapas");
        backend.wait_pending(1).await;
        let reset = backend.next_pending().unwrap();
        assert_eq!(reset.request.limit, 20);
        assert_eq!(reset.request.term.as_deref(), Some("Bar Tapas"));
    }

    #[tokio::test]
    async fn refocus_during_grace_keeps_list_without_refetch() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 5).await;
        suggest(&backend, &mut engine, "bar", vec![Row::new(4, "Bar Tapas")]).await;

        engine.blur();
        engine.focus();
        pump(&mut engine).await;

        assert!(engine.show_suggestions());
        assert_eq!(engine.guard_state(), GuardState::Enabled);
        assert_eq!(suggestion_calls(&backend).len(), 1);
        assert_eq!(backend.pending_len(), 0);
    }

    #[tokio::test]
    async fn filter_change_refreshes_suggestions_for_the_typed_term() {
        let backend = ScriptedBackend::new();
        let mut engine = mounted(&backend, 5).await;
        suggest(&backend, &mut engine, "pizz", vec![Row::new(7, "Pizzeria Roma")]).await;

        engine.set_category("Tapas");
        backend.wait_pending(2).await;
        let reset = backend.take_pending(|r| r.limit == 20).unwrap();
        assert_eq!(reset.request.category.as_deref(), Some("Tapas"));
        let refreshed = backend.take_pending(|r| r.limit == 6).unwrap();
        assert_eq!(refreshed.request.category.as_deref(), Some("Tapas"));
        assert_eq!(refreshed.request.term.as_deref(), Some("pizz"));
        assert_eq!(refreshed.request.offset, 0);

        engine.set_locality("Orihuela");
        backend.wait_pending(2).await;
        let refreshed = backend.take_pending(|r| r.limit == 6).unwrap();
        assert_eq!(refreshed.request.locality.as_deref(), Some("Orihuela"));
        assert_eq!(refreshed.request.category.as_deref(), Some("Tapas"));
        assert_eq!(suggestion_calls(&backend).len(), 3);
    }

    fn with_catalog() -> SearchOrchestrator {
        use crate::backend::MemoryBackend;
        use crate::detail::{MenuItem, ScheduleRule};

        let catalog = MemoryBackend::new()
            .with_rows(vec![Row::new(1, "Casa Pepe"), Row::new(2, "Mar Azul")])
            .with_rules(1, vec![ScheduleRule::new(1, 5, "13:00", "16:00")])
            .with_menu(1, vec![MenuItem::new(10, "Croquetas").with_types(&["Entrantes"])]);
        engine(&ScriptedBackend::new()).with_details(Arc::new(catalog))
    }

    #[tokio::test]
    async fn detail_loads_then_closes() {
        let mut engine = with_catalog();

        assert!(engine.open_detail(&RowId::Number(1)));
        assert_eq!(engine.detail_state(), &DetailState::Loading(RowId::Number(1)));
        assert!(engine.detail().is_none());
        pump(&mut engine).await;

        let detail = engine.detail().unwrap();
        assert_eq!(detail.restaurant.name, "Casa Pepe");
        assert_eq!(detail.opening_hours(), "Lu–Vi 13:00–16:00");
        assert_eq!(detail.menu.len(), 1);

        engine.close_detail();
        assert_eq!(engine.detail_state(), &DetailState::Closed);
    }

    #[tokio::test]
    async fn unknown_restaurant_raises_notice() {
        let mut engine = with_catalog();

        assert!(engine.open_detail(&RowId::Number(99)));
        pump(&mut engine).await;

        assert_eq!(engine.detail_state(), &DetailState::Closed);
        assert_eq!(engine.notice(), Some("Restaurant not found"));
    }

    #[tokio::test]
    async fn closed_or_replaced_detail_discards_late_loads() {
        let mut engine = with_catalog();

        engine.open_detail(&RowId::Number(1));
        engine.close_detail();
        pump(&mut engine).await;
        assert_eq!(engine.detail_state(), &DetailState::Closed);

        engine.open_detail(&RowId::Number(1));
        engine.open_detail(&RowId::Number(2));
        pump(&mut engine).await;
        assert_eq!(engine.detail().unwrap().restaurant.name, "Mar Azul");
        assert_eq!(engine.notice(), None);
    }

    #[tokio::test]
    async fn detail_needs_a_detail_backend() {
        let backend = ScriptedBackend::new();
        let mut engine = engine(&backend);
        assert!(!engine.open_detail(&RowId::Number(1)));
        assert_eq!(engine.detail_state(), &DetailState::Closed);
    }
}

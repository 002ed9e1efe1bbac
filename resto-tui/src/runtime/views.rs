use crate::app::{App, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

mod detail;
mod list;
mod picker;
mod search;
mod suggestions;

pub(super) fn handle_key(key: KeyEvent, app: &mut App, now: Instant) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // The notice is modal until dismissed.
    if app.engine.notice().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.engine.dismiss_notice();
        }
        return;
    }

    if app.picker.is_some() {
        picker::handle_picker_key(key, app);
        return;
    }

    match app.focus {
        Focus::Search => search::handle_search_key(key, app, now),
        Focus::Suggestions => suggestions::handle_suggestions_key(key, app, now),
        Focus::List => list::handle_list_key(key, app),
        Focus::Detail => detail::handle_detail_key(key, app),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dev_backend::{dev_backend, dev_rows};
    use crate::app::PickerTarget;
    use resto_search::{
        BackendError, DetailState, EngineSettings, MemoryBackend, SearchOrchestrator,
    };
    use std::sync::Arc;
    use std::time::Duration;

    fn test_app(backend: MemoryBackend) -> App {
        let engine = SearchOrchestrator::new(Arc::new(backend), EngineSettings::default());
        App::new(engine, Box::new(|value: Option<&str>| value.map(str::to_string)))
    }

    /// Dev catalog with menus and hours, answering immediately.
    fn detail_app() -> (App, MemoryBackend) {
        let backend = dev_backend().with_latency(Duration::ZERO, false);
        let engine = SearchOrchestrator::new(Arc::new(backend.clone()), EngineSettings::default())
            .with_details(Arc::new(backend.clone()));
        let app = App::new(engine, Box::new(|value: Option<&str>| value.map(str::to_string)));
        (app, backend)
    }

    fn catalog() -> MemoryBackend {
        MemoryBackend::new().with_rows(dev_rows())
    }

    async fn settle(app: &mut App) {
        for _ in 0..32 {
            tokio::task::yield_now().await;
            app.engine.drain();
        }
        app.clamp_selection();
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(KeyEvent::new(code, KeyModifiers::NONE), app, Instant::now());
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn typing_then_enter_searches() {
        let mut app = test_app(catalog());
        app.engine.mount();
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.focus, Focus::Search);
        type_text(&mut app, "sushi");
        assert_eq!(app.engine.term(), "sushi");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::List);
        settle(&mut app).await;

        assert_eq!(app.engine.query().term.as_deref(), Some("sushi"));
        let names: Vec<_> = app.engine.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Sushi Kai", "Sushi Zen"]);
    }

    #[tokio::test]
    async fn picking_a_suggestion_fills_the_input() {
        let mut app = test_app(catalog());
        app.engine.mount();
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "pizz");
        assert!(app.engine.tick(Instant::now() + Duration::from_secs(1)));
        settle(&mut app).await;
        assert!(app.engine.show_suggestions());

        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus, Focus::Suggestions);
        let first = app.engine.suggestions()[0].label.clone();

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::List);
        assert_eq!(app.search_input.value, first);
        assert!(!app.engine.show_suggestions());
    }

    #[tokio::test]
    async fn hide_entry_closes_suggestions() {
        let mut app = test_app(catalog());
        app.engine.mount();
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "sushi");
        app.engine.tick(Instant::now() + Duration::from_secs(1));
        settle(&mut app).await;

        press(&mut app, KeyCode::Down);
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.suggestion_index, app.engine.suggestions().len());
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.focus, Focus::Search);
        assert!(!app.engine.show_suggestions());
        assert_eq!(app.search_input.value, "sushi");
    }

    #[tokio::test]
    async fn category_picker_applies_filter() {
        let mut app = test_app(catalog());
        app.engine.mount();
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('c'));
        assert!(app.picker.is_some());
        type_text(&mut app, "tapas");
        press(&mut app, KeyCode::Enter);
        assert!(app.picker.is_none());
        assert_eq!(app.engine.category(), "Tapas");

        settle(&mut app).await;
        assert!(!app.engine.rows().is_empty());
        assert!(app
            .engine
            .rows()
            .iter()
            .all(|r| r.types.iter().any(|t| t == "Tapas")));
    }

    #[tokio::test]
    async fn notice_is_modal() {
        let backend = catalog();
        backend.fail_with(Some(BackendError::Rejected {
            status: 500,
            message: "boom".to_string(),
        }));
        let mut app = test_app(backend);
        app.engine.mount();
        settle(&mut app).await;
        assert_eq!(app.engine.notice(), Some("boom"));

        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.engine.notice(), None);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[tokio::test]
    async fn scrolling_near_the_end_loads_more() {
        let mut app = test_app(catalog());
        app.engine.mount();
        settle(&mut app).await;
        assert_eq!(app.engine.rows().len(), 20);

        for _ in 0..13 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert!(app.engine.loading());
        settle(&mut app).await;
        assert_eq!(app.engine.rows().len(), 40);
    }

    #[tokio::test]
    async fn enter_opens_restaurant_and_esc_returns() {
        let (mut app, _) = detail_app();
        app.engine.mount();
        settle(&mut app).await;
        press(&mut app, KeyCode::Char('j'));
        let name = app.selected().unwrap().name.clone();

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::Detail);
        assert!(matches!(app.engine.detail_state(), DetailState::Loading(_)));
        settle(&mut app).await;

        let detail = app.engine.detail().unwrap();
        assert_eq!(detail.restaurant.name, name);
        assert!(detail.opening_hours().starts_with("Lu–Vi 13:00–16:00"));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.detail_scroll, 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::List);
        assert_eq!(app.engine.detail_state(), &DetailState::Closed);
        assert_eq!(app.selected().unwrap().name, name);
    }

    #[tokio::test]
    async fn menu_type_picker_filters_sections() {
        let (mut app, _) = detail_app();
        app.engine.mount();
        settle(&mut app).await;
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.picker.as_ref().map(|p| p.target), Some(PickerTarget::MenuType));
        type_text(&mut app, "postres");
        press(&mut app, KeyCode::Enter);

        assert!(app.picker.is_none());
        assert_eq!(app.focus, Focus::Detail);
        assert_eq!(app.menu_filter, "Postres");
        let sections = app.engine.detail().unwrap().menu_sections(&app.menu_filter);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].items[0].name, "Tarta de queso");
        // Filters on the search side stay untouched.
        assert_eq!(app.engine.category(), "Todos");
    }

    #[tokio::test]
    async fn failed_restaurant_load_shows_notice_and_returns_to_list() {
        let (mut app, backend) = detail_app();
        app.engine.mount();
        settle(&mut app).await;

        press(&mut app, KeyCode::Enter);
        backend.fail_with(Some(BackendError::NotFound("Restaurant not found".to_string())));
        settle(&mut app).await;

        assert_eq!(app.engine.notice(), Some("Restaurant not found"));
        assert_eq!(app.focus, Focus::List);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.engine.notice(), None);
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = test_app(catalog());
        app.focus = Focus::Search;
        handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
            Instant::now(),
        );
        assert!(!app.running);
        assert_eq!(app.search_input.value, "");
    }
}

use resto_search::{DetailState, FilterKind, Row, SearchOrchestrator, ALL_MENU_TYPES};
use std::time::Instant;

mod state;

pub use state::{Focus, PickerState, PickerTarget, TextInput};

/// Fraction of the loaded list after which the next page is requested.
pub const LOAD_MORE_THRESHOLD: f64 = 0.7;

pub type ImageResolver = Box<dyn Fn(Option<&str>) -> Option<String> + Send>;

pub struct App {
    pub running: bool,
    pub engine: SearchOrchestrator,
    pub search_input: TextInput,
    pub focus: Focus,
    /// Highlighted suggestion; `suggestions().len()` is the "hide" entry.
    pub suggestion_index: usize,
    pub selected_row: usize,
    pub picker: Option<PickerState>,
    /// First visible line of the restaurant screen.
    pub detail_scroll: u16,
    /// Menu section filter on the restaurant screen.
    pub menu_filter: String,
    pub throbber_state: throbber_widgets_tui::ThrobberState,
    image_resolver: ImageResolver,
}

impl App {
    pub fn new(engine: SearchOrchestrator, image_resolver: ImageResolver) -> Self {
        Self {
            running: true,
            engine,
            search_input: TextInput::new(),
            focus: Focus::List,
            suggestion_index: 0,
            selected_row: 0,
            picker: None,
            detail_scroll: 0,
            menu_filter: ALL_MENU_TYPES.to_string(),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            image_resolver,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_busy(&self) -> bool {
        self.engine.loading() || self.engine.filter_options().loading
    }

    pub fn selected(&self) -> Option<&Row> {
        self.engine.rows().get(self.selected_row)
    }

    pub fn image_url(&self, row: &Row) -> Option<String> {
        self.resolve_image(row.image_url.as_deref())
    }

    /// Raw stored image value to a displayable URL.
    pub fn resolve_image(&self, value: Option<&str>) -> Option<String> {
        (self.image_resolver)(value)
    }

    // ---- search input ----

    pub fn focus_search(&mut self) {
        self.focus = Focus::Search;
        self.engine.focus();
    }

    pub fn leave_search(&mut self) {
        self.focus = Focus::List;
        self.engine.blur();
    }

    fn term_changed(&mut self, now: Instant) {
        self.engine.set_term(&self.search_input.value, now);
        self.suggestion_index = 0;
    }

    pub fn search_input_char(&mut self, c: char, now: Instant) {
        self.search_input.insert(c);
        self.term_changed(now);
    }

    pub fn search_input_backspace(&mut self, now: Instant) {
        self.search_input.backspace();
        self.term_changed(now);
    }

    pub fn search_input_clear(&mut self, now: Instant) {
        self.search_input.clear();
        self.term_changed(now);
    }

    pub fn submit_search(&mut self) {
        self.engine.apply_filters();
        self.focus = Focus::List;
        self.selected_row = 0;
    }

    // ---- suggestions ----

    pub fn enter_suggestions(&mut self) {
        if self.engine.show_suggestions() {
            self.focus = Focus::Suggestions;
            self.suggestion_index = 0;
        }
    }

    pub fn suggestion_next(&mut self) {
        if self.suggestion_index < self.engine.suggestions().len() {
            self.suggestion_index += 1;
        }
    }

    /// Returns false when already at the top entry.
    pub fn suggestion_previous(&mut self) -> bool {
        if self.suggestion_index == 0 {
            return false;
        }
        self.suggestion_index -= 1;
        true
    }

    /// Apply the highlighted entry: a suggestion, or the "hide" entry.
    pub fn confirm_suggestion(&mut self) {
        let id = self
            .engine
            .suggestions()
            .get(self.suggestion_index)
            .map(|s| s.id.clone());
        match id {
            Some(id) if self.engine.select_suggestion(&id) => {
                self.search_input.set(self.engine.term());
                self.focus = Focus::List;
                self.selected_row = 0;
            }
            _ => self.hide_suggestions(),
        }
    }

    pub fn hide_suggestions(&mut self) {
        self.engine.dismiss_suggestions();
        self.focus = Focus::Search;
        self.suggestion_index = 0;
    }

    // ---- result list ----

    pub fn select_next(&mut self) {
        let len = self.engine.rows().len();
        if self.selected_row + 1 < len {
            self.selected_row += 1;
        }
        self.list_scrolled();
    }

    pub fn select_previous(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
        self.list_scrolled();
    }

    fn list_scrolled(&mut self) {
        self.engine.scroll_began();
        if past_threshold(self.selected_row, self.engine.rows().len()) {
            self.engine.load_more();
        }
    }

    /// Keep the highlight inside the list after rows were replaced.
    pub fn clamp_selection(&mut self) {
        let len = self.engine.rows().len();
        if self.selected_row >= len {
            self.selected_row = len.saturating_sub(1);
        }
        let suggestions = self.engine.suggestions().len();
        if self.suggestion_index > suggestions {
            self.suggestion_index = suggestions;
        }
        if self.focus == Focus::Suggestions && !self.engine.show_suggestions() {
            self.focus = Focus::Search;
        }
        // A failed load closes the restaurant screen.
        if self.focus == Focus::Detail && *self.engine.detail_state() == DetailState::Closed {
            self.focus = Focus::List;
        }
    }

    // ---- restaurant screen ----

    pub fn open_detail(&mut self) {
        let Some(id) = self.selected().map(|row| row.id.clone()) else {
            return;
        };
        if self.engine.open_detail(&id) {
            self.focus = Focus::Detail;
            self.detail_scroll = 0;
            self.menu_filter = ALL_MENU_TYPES.to_string();
        }
    }

    pub fn close_detail(&mut self) {
        self.engine.close_detail();
        self.focus = Focus::List;
    }

    pub fn detail_scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn detail_scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    // ---- filter pickers ----

    pub fn open_picker(&mut self, kind: FilterKind) {
        let options = self.engine.filter_options();
        let (values, current) = match kind {
            FilterKind::Category => (options.categories.clone(), self.engine.category()),
            FilterKind::Locality => (options.localities.clone(), self.engine.locality()),
        };
        self.picker = Some(PickerState::new(PickerTarget::Filter(kind), values, current));
    }

    /// Only once the restaurant has loaded.
    pub fn open_menu_picker(&mut self) {
        let Some(detail) = self.engine.detail() else {
            return;
        };
        self.picker = Some(PickerState::new(
            PickerTarget::MenuType,
            detail.menu_type_options(),
            &self.menu_filter,
        ));
    }

    pub fn confirm_picker(&mut self) {
        let Some(picker) = self.picker.take() else {
            return;
        };
        let Some(value) = picker.selected() else {
            return;
        };
        match picker.target {
            PickerTarget::Filter(FilterKind::Category) => {
                self.engine.set_category(value);
                self.selected_row = 0;
            }
            PickerTarget::Filter(FilterKind::Locality) => {
                self.engine.set_locality(value);
                self.selected_row = 0;
            }
            PickerTarget::MenuType => {
                self.menu_filter = value.to_string();
                self.detail_scroll = 0;
            }
        }
    }

    pub fn cancel_picker(&mut self) {
        self.picker = None;
    }
}

/// True once `selected` sits in the last 30% of `len` rows.
pub fn past_threshold(selected: usize, len: usize) -> bool {
    len > 0 && (selected + 1) as f64 >= len as f64 * LOAD_MORE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_sits_at_seventy_percent() {
        assert!(!past_threshold(0, 0));
        assert!(!past_threshold(12, 20));
        assert!(past_threshold(13, 20));
        assert!(past_threshold(0, 1));
    }
}

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use resto_search::FilterKind;

/// Which part of the screen receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Suggestions,
    List,
    Detail,
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole value and put the cursor at the end.
    pub fn set(&mut self, s: &str) {
        self.value = s.to_string();
        self.cursor = self.value.len();
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.prev_boundary(self.cursor);
        self.value.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// (before, after) the cursor.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        self.value[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self, pos: usize) -> usize {
        self.value[pos..]
            .chars()
            .next()
            .map(|c| pos + c.len_utf8())
            .unwrap_or(pos)
    }
}

/// What a confirmed picker choice is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerTarget {
    Filter(FilterKind),
    /// Menu section shown on the restaurant screen.
    MenuType,
}

/// Fuzzy-filterable chooser for a filter or the menu section.
#[derive(Debug, Clone)]
pub struct PickerState {
    pub target: PickerTarget,
    pub input: TextInput,
    pub options: Vec<String>,
    pub filtered: Vec<String>,
    pub index: usize,
}

impl PickerState {
    /// Opens with the current value highlighted.
    pub fn new(target: PickerTarget, options: Vec<String>, current: &str) -> Self {
        let index = options.iter().position(|o| o == current).unwrap_or(0);
        Self {
            target,
            input: TextInput::new(),
            filtered: options.clone(),
            options,
            index,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.target {
            PickerTarget::Filter(FilterKind::Category) => "Category",
            PickerTarget::Filter(FilterKind::Locality) => "Locality",
            PickerTarget::MenuType => "Menu type",
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.filtered.get(self.index).map(String::as_str)
    }

    pub fn input_char(&mut self, c: char) {
        self.input.insert(c);
        self.filter();
    }

    pub fn backspace(&mut self) {
        self.input.backspace();
        self.filter();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.filter();
    }

    pub fn select_next(&mut self) {
        if self.index + 1 < self.filtered.len() {
            self.index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    fn filter(&mut self) {
        self.index = 0;
        if self.input.value.is_empty() {
            self.filtered = self.options.clone();
            return;
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(&String, i64)> = self
            .options
            .iter()
            .filter_map(|option| {
                matcher
                    .fuzzy_match(option, &self.input.value)
                    .map(|score| (option, score))
            })
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        self.filtered = scored.into_iter().map(|(o, _)| o.clone()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_respects_multibyte_chars() {
        let mut input = TextInput::new();
        input.set("pizzería");
        input.move_left();
        input.move_left();
        assert_eq!(input.split_at_cursor(), ("pizzer", "ía"));
        input.backspace();
        assert_eq!(input.value, "pizzeía");
        input.move_right();
        input.insert('x');
        assert_eq!(input.value, "pizzeíxa");
    }

    #[test]
    fn home_end_and_clear() {
        let mut input = TextInput::new();
        input.set("roma");
        input.home();
        input.insert('>');
        assert_eq!(input.value, ">roma");
        input.end();
        assert_eq!(input.cursor, input.value.len());
        input.clear();
        assert_eq!(input, TextInput::new());
    }

    fn picker() -> PickerState {
        PickerState::new(
            PickerTarget::Filter(FilterKind::Locality),
            vec![
                "Todas".to_string(),
                "Orihuela".to_string(),
                "Orihuela Costa".to_string(),
                "Torrevieja".to_string(),
            ],
            "Torrevieja",
        )
    }

    #[test]
    fn opens_on_current_value() {
        let picker = picker();
        assert_eq!(picker.selected(), Some("Torrevieja"));
        assert_eq!(picker.title(), "Locality");
    }

    #[test]
    fn fuzzy_filter_narrows_and_resets_index() {
        let mut picker = picker();
        for c in "costa".chars() {
            picker.input_char(c);
        }
        assert_eq!(picker.filtered, ["Orihuela Costa"]);
        assert_eq!(picker.selected(), Some("Orihuela Costa"));

        picker.clear();
        assert_eq!(picker.filtered.len(), 4);
        assert_eq!(picker.index, 0);
    }

    #[test]
    fn navigation_is_clamped() {
        let mut picker = picker();
        picker.select_next();
        picker.select_next();
        assert_eq!(picker.selected(), Some("Torrevieja"));
        for _ in 0..10 {
            picker.select_previous();
        }
        assert_eq!(picker.selected(), Some("Todas"));
    }

    #[test]
    fn menu_picker_titles_itself() {
        let picker = PickerState::new(
            PickerTarget::MenuType,
            vec!["Todos".to_string(), "Postres".to_string()],
            "Postres",
        );
        assert_eq!(picker.title(), "Menu type");
        assert_eq!(picker.selected(), Some("Postres"));
    }
}

//! Enable/disable state machine for autocomplete.
//!
//! Applying a suggestion rewrites the term, which would otherwise re-trigger a
//! suggestion fetch and reopen the list that was just closed. The guard stays
//! disabled until the user edits the term again or refocuses the input.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    #[default]
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardEvent {
    SuggestionApplied,
    SearchSubmitted,
    TermEdited,
    InputFocused,
}

#[derive(Debug, Default)]
pub struct SelectionGuard {
    state: GuardState,
}

impl SelectionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state == GuardState::Enabled
    }

    /// Apply `event`; returns true when the state actually changed.
    pub fn handle(&mut self, event: GuardEvent) -> bool {
        let next = match event {
            GuardEvent::SuggestionApplied | GuardEvent::SearchSubmitted => GuardState::Disabled,
            GuardEvent::TermEdited | GuardEvent::InputFocused => GuardState::Enabled,
        };
        let changed = next != self.state;
        self.state = next;
        changed
    }
}

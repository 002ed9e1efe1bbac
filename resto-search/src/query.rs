/// Category picker value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "Todos";
/// Locality picker value meaning "no locality filter".
pub const ALL_LOCALITIES: &str = "Todas";

/// The filter tuple sent with every search. `None` means unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub term: Option<String>,
    pub category: Option<String>,
    pub locality: Option<String>,
}

#[derive(Debug, Default)]
pub struct QueryState {
    query: Query,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Returns true when the normalized term changed.
    pub fn set_term(&mut self, value: &str) -> bool {
        replace(&mut self.query.term, normalize_term(value))
    }

    /// Returns true when the normalized category changed.
    pub fn set_category(&mut self, value: &str) -> bool {
        replace(
            &mut self.query.category,
            normalize_filter(value, ALL_CATEGORIES),
        )
    }

    /// Returns true when the normalized locality changed.
    pub fn set_locality(&mut self, value: &str) -> bool {
        replace(
            &mut self.query.locality,
            normalize_filter(value, ALL_LOCALITIES),
        )
    }

    /// Category as shown in the picker, sentinel included.
    pub fn category_label(&self) -> &str {
        self.query.category.as_deref().unwrap_or(ALL_CATEGORIES)
    }

    /// Locality as shown in the picker, sentinel included.
    pub fn locality_label(&self) -> &str {
        self.query.locality.as_deref().unwrap_or(ALL_LOCALITIES)
    }
}

fn replace(slot: &mut Option<String>, next: Option<String>) -> bool {
    if *slot == next {
        return false;
    }
    *slot = next;
    true
}

pub fn normalize_term(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_filter(value: &str, sentinel: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == sentinel {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_normalize_to_none() {
        let mut state = QueryState::new();
        assert!(!state.set_category("Todos"));
        assert!(!state.set_locality(" Todas "));
        assert_eq!(state.query(), &Query::default());
        assert_eq!(state.category_label(), ALL_CATEGORIES);
        assert_eq!(state.locality_label(), ALL_LOCALITIES);
    }

    #[test]
    fn values_pass_through_trimmed() {
        let mut state = QueryState::new();
        assert!(state.set_category("  Pizzería "));
        assert!(state.set_locality("Orihuela"));
        assert!(state.set_term("  roma "));
        assert_eq!(
            state.query(),
            &Query {
                term: Some("roma".to_string()),
                category: Some("Pizzería".to_string()),
                locality: Some("Orihuela".to_string()),
            }
        );
    }

    #[test]
    fn whitespace_term_is_unfiltered() {
        let mut state = QueryState::new();
        assert!(state.set_term("sushi"));
        assert!(state.set_term("   "));
        assert_eq!(state.query().term, None);
    }

    #[test]
    fn unchanged_values_report_no_change() {
        let mut state = QueryState::new();
        assert!(state.set_category("Tapas"));
        assert!(!state.set_category(" Tapas"));
        assert!(state.set_category("Todos"));
        assert_eq!(state.query().category, None);
    }
}

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::query::{ALL_CATEGORIES, ALL_LOCALITIES};

/// Choices offered by the category and locality pickers.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub localities: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            categories: vec![ALL_CATEGORIES.to_string()],
            localities: vec![ALL_LOCALITIES.to_string()],
            loading: false,
            error: None,
        }
    }
}

/// Which picker a list of options belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Category,
    Locality,
}

impl FilterKind {
    pub fn sentinel(self) -> &'static str {
        match self {
            FilterKind::Category => ALL_CATEGORIES,
            FilterKind::Locality => ALL_LOCALITIES,
        }
    }
}

/// Sentinel first, then distinct trimmed values, sorted ignoring case and accents.
pub fn normalize_options(raw: Vec<String>, sentinel: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values: Vec<String> = raw
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != sentinel)
        .filter(|v| seen.insert(v.clone()))
        .collect();
    values.sort_by(|a, b| compare_base(a, b));

    let mut options = Vec::with_capacity(values.len() + 1);
    options.push(sentinel.to_string());
    options.extend(values);
    options
}

pub(crate) fn compare_base(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

fn fold(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            other => other,
        })
        .collect()
}

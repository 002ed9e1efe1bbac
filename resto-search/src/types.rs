use serde::{Deserialize, Serialize};
use std::fmt;

/// Row identifier. The catalog uses numeric ids, but string ids are accepted
/// so the engine never has to care which one a backend hands back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RowId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Number(n) => write!(f, "{}", n),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        RowId::Number(value)
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        RowId::Text(value.to_string())
    }
}

/// The `city` column is either a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Locality {
    #[default]
    Unknown,
    One(String),
    Many(Vec<String>),
}

impl Locality {
    /// Non-empty, trimmed locality names in catalog order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Locality::Unknown => vec![],
            Locality::One(name) => {
                let name = name.trim();
                if name.is_empty() {
                    vec![]
                } else {
                    vec![name]
                }
            }
            Locality::Many(names) => names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// Human-readable form, e.g. "Villamartín · Orihuela".
    pub fn display(&self) -> String {
        self.names().join(" · ")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().iter().any(|n| *n == name)
    }
}

/// A restaurant as returned by `search_restaurants`.
///
/// The engine only relies on `id` and `name`; the remaining fields are carried
/// for the front end.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Row {
    pub id: RowId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: Locality,
    #[serde(default)]
    pub is_open: Option<bool>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub web: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    /// Banner picture; preferred over `image_url` on the detail screen.
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Accepted payment methods, free text.
    #[serde(default)]
    pub pago: Option<String>,
    /// Preferred order of menu sections.
    #[serde(default, deserialize_with = "null_as_default")]
    pub menu_type_order: Vec<String>,
}

impl Row {
    pub fn new(id: impl Into<RowId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            types: Vec::new(),
            city: Locality::Unknown,
            is_open: None,
            image_url: None,
            price_range: None,
            address: None,
            phone: None,
            web: None,
            description: None,
            whatsapp: None,
            lat: None,
            lng: None,
            photo_url: None,
            pago: None,
            menu_type_order: Vec::new(),
        }
    }

    pub fn with_types(mut self, types: &[&str]) -> Self {
        self.types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_city(mut self, city: &str) -> Self {
        self.city = Locality::One(city.to_string());
        self
    }

    pub fn with_open(mut self, is_open: bool) -> Self {
        self.is_open = Some(is_open);
        self
    }
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An autocomplete entry: the projection of a [`Row`] shown under the search box.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub id: RowId,
    pub label: String,
}

impl From<&Row> for Suggestion {
    fn from(row: &Row) -> Self {
        Self {
            id: row.id.clone(),
            label: row.name.clone(),
        }
    }
}

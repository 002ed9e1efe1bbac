//! The restaurant screen: one row plus its opening hours, menu and contact
//! links.
//!
//! Loading goes through [`DetailBackend`](crate::backend::DetailBackend); the
//! helpers here only shape what was loaded for display.

use serde::{Deserialize, Deserializer, Serialize};

use crate::backend::{DetailBackend, Result};
use crate::types::{null_as_default, Row, RowId};

mod contact;
mod hours;
mod menu;

pub use contact::ContactLinks;
pub use hours::opening_hours;
pub use menu::{MenuSection, ALL_MENU_TYPES, UNTYPED_SECTION};

/// One opening slot for a single weekday (1 = Monday, 7 or 0 = Sunday).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Schedule {
    pub day: i64,
    pub open: String,
    pub close: String,
}

impl Schedule {
    pub fn new(day: i64, open: &str, close: &str) -> Self {
        Self {
            day,
            open: open.to_string(),
            close: close.to_string(),
        }
    }
}

/// One opening slot shared by a range of weekdays.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScheduleRule {
    pub day_from: i64,
    pub day_to: i64,
    pub open_time: String,
    pub close_time: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl ScheduleRule {
    pub fn new(day_from: i64, day_to: i64, open_time: &str, close_time: &str) -> Self {
        Self {
            day_from,
            day_to,
            open_time: open_time.to_string(),
            close_time: close_time.to_string(),
            note: None,
        }
    }
}

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MenuItem {
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allergens: Vec<String>,
    /// Menu sections the dish is listed under; the column is text or text[].
    #[serde(rename = "type", default, deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    #[serde(default)]
    pub sort_index: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl MenuItem {
    pub fn new(id: impl Into<RowId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price: None,
            image_url: None,
            allergens: Vec::new(),
            types: Vec::new(),
            sort_index: None,
            is_active: Some(true),
        }
    }

    pub fn with_types(mut self, types: &[&str]) -> Self {
        self.types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_allergens(mut self, allergens: &[&str]) -> Self {
        self.allergens = allergens.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_sort_index(mut self, index: i64) -> Self {
        self.sort_index = Some(index);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = Some(false);
        self
    }

    /// Missing means active.
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }

    /// "12,50 €"; `None` for a missing or zero price.
    pub fn price_label(&self) -> Option<String> {
        self.price.filter(|p| *p > 0.0).map(format_eur)
    }
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<Option<String>>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values.into_iter().flatten().collect(),
    })
}

/// Euro amount the way es-ES writes it: decimal comma, dot grouping from
/// five integer digits on.
fn format_eur(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let digits = (cents / 100).to_string();
    let integer = if digits.len() > 4 {
        let mut grouped = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        grouped
    } else {
        digits
    };
    format!("{},{:02} €", integer, cents % 100)
}

/// Everything the restaurant screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantDetail {
    pub restaurant: Row,
    pub schedules: Vec<Schedule>,
    pub rules: Vec<ScheduleRule>,
    pub menu: Vec<MenuItem>,
}

impl RestaurantDetail {
    /// First category, shown under the name.
    pub fn type_label(&self) -> Option<&str> {
        self.restaurant
            .types
            .iter()
            .map(|t| t.trim())
            .find(|t| !t.is_empty())
    }

    /// Raw banner image value: the photo when there is one, else the list image.
    pub fn banner_image(&self) -> Option<&str> {
        [&self.restaurant.photo_url, &self.restaurant.image_url]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .find(|v| !v.trim().is_empty())
    }

    /// "Calle Mayor 3, Almoradí, Orihuela": street and localities.
    pub fn full_address(&self) -> Option<String> {
        let street = self.restaurant.address.as_deref().unwrap_or("").trim();
        let cities = self.restaurant.city.names().join(", ");
        match (street.is_empty(), cities.is_empty()) {
            (true, true) => None,
            (false, true) => Some(street.to_string()),
            (true, false) => Some(cities),
            (false, false) if street.ends_with(',') => Some(format!("{} {}", street, cities)),
            (false, false) => Some(format!("{}, {}", street, cities)),
        }
    }

    /// Compact opening hours, empty when nothing is known.
    pub fn opening_hours(&self) -> String {
        opening_hours(&self.rules, &self.schedules)
    }

    /// "Todos" followed by every menu section in display order.
    pub fn menu_type_options(&self) -> Vec<String> {
        let mut options = vec![ALL_MENU_TYPES.to_string()];
        options.extend(menu::ordered_types(
            &self.menu,
            &self.restaurant.menu_type_order,
        ));
        options
    }

    /// Sections to show for the chosen type filter.
    pub fn menu_sections(&self, filter: &str) -> Vec<MenuSection<'_>> {
        menu::sections(&self.menu, &self.restaurant.menu_type_order, filter)
    }

    pub fn contact_links(&self) -> ContactLinks {
        ContactLinks::for_restaurant(&self.restaurant, self.full_address().as_deref())
    }
}

/// Where the restaurant screen stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Closed,
    Loading(RowId),
    Ready(Box<RestaurantDetail>),
}

/// Fetch the restaurant, then its schedules, rules and menu together.
pub async fn load_detail(backend: &dyn DetailBackend, id: &RowId) -> Result<RestaurantDetail> {
    let restaurant = backend.restaurant(id).await?;
    let (schedules, rules, menu) = tokio::try_join!(
        backend.schedules(id),
        backend.schedule_rules(id),
        backend.menu(id)
    )?;
    Ok(RestaurantDetail {
        restaurant,
        schedules,
        rules,
        menu,
    })
}

//! PostgREST adapter for a Supabase project.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::{
    BackendError, DetailBackend, Result, SearchBackend, SearchRequest, INVALID_RESTAURANT_ID,
    RESTAURANT_NOT_FOUND,
};
use crate::detail::{MenuItem, Schedule, ScheduleRule};
use crate::types::{Locality, Row, RowId};

pub const DEFAULT_IMAGE_BUCKET: &str = "restaurants";

const SEARCH_RPC: &str = "/rest/v1/rpc/search_restaurants";
const RESTAURANTS: &str = "/rest/v1/restaurants";
const SCHEDULES: &str = "/rest/v1/schedules";
const SCHEDULE_RULES: &str = "/rest/v1/schedule_rules";
const MENU_ITEMS: &str = "/rest/v1/menu_items";

const RESTAURANT_COLUMNS: &str = "id,name,types,price_range,phone,whatsapp,address,city,image_url,photo_url,lat,lng,description,web,pago,menu_type_order";
const MENU_COLUMNS: &str =
    "id,restaurant_id,name,description,price,image_url,allergens,type,sort_index,is_active";

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: Url,
    anon_key: String,
    image_bucket: String,
}

/// Argument object of the `search_restaurants` function.
#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    q: Option<&'a str>,
    cat: Option<&'a str>,
    only_open: bool,
    user_lat: Option<f64>,
    user_lng: Option<f64>,
    limit_: usize,
    offset_: usize,
    city_filter: Option<&'a str>,
}

impl<'a> From<&'a SearchRequest> for SearchBody<'a> {
    fn from(request: &'a SearchRequest) -> Self {
        Self {
            q: request.term.as_deref(),
            cat: request.category.as_deref(),
            only_open: false,
            user_lat: None,
            user_lng: None,
            limit_: request.limit,
            offset_: request.offset,
            city_filter: request.locality.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypesRow {
    #[serde(default)]
    types: Option<Vec<Option<String>>>,
}

#[derive(Debug, Deserialize)]
struct CityRow {
    #[serde(default)]
    city: Option<Locality>,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(BackendError::Config("Supabase URL is not set".to_string()));
        }
        if anon_key.trim().is_empty() {
            return Err(BackendError::Config(
                "Supabase anon key is not set".to_string(),
            ));
        }
        let base_url = Url::parse(trimmed)
            .map_err(|e| BackendError::Config(format!("Invalid Supabase URL {}: {}", trimmed, e)))?;
        let client = Client::builder()
            .build()
            .map_err(|e| BackendError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            anon_key: anon_key.trim().to_string(),
            image_bucket: DEFAULT_IMAGE_BUCKET.to_string(),
        })
    }

    pub fn with_image_bucket(mut self, bucket: &str) -> Self {
        if !bucket.trim().is_empty() {
            self.image_bucket = bucket.trim().to_string();
        }
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for an image column: absolute URLs pass through, anything
    /// else is a path inside the public image bucket.
    pub fn public_image_url(&self, value: Option<&str>) -> Option<String> {
        public_image_url(self.base_url.as_str(), &self.image_bucket, value)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::Config(format!("Failed to build URL for {}: {}", path, e)))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = rejection(status.as_u16(), &body);
            debug!(call = call_name, status = status.as_u16(), "request rejected: {}", error);
            return Err(error);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| BackendError::Decode(format!("Failed to parse {} response: {}", call_name, e)))
    }
}

#[async_trait]
impl SearchBackend for SupabaseClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Row>> {
        debug!(
            offset = request.offset,
            limit = request.limit,
            "POST {}",
            SEARCH_RPC
        );
        self.fetch_json(
            self.client
                .post(self.endpoint(SEARCH_RPC)?)
                .json(&SearchBody::from(request)),
            "POST /rpc/search_restaurants",
        )
        .await
    }

    async fn categories(&self) -> Result<Vec<String>> {
        let rows: Vec<TypesRow> = self
            .fetch_json(
                self.client
                    .get(self.endpoint(RESTAURANTS)?)
                    .query(&[("select", "types"), ("types", "not.is.null")]),
                "GET /restaurants?select=types",
            )
            .await?;
        Ok(flatten_types(rows))
    }

    async fn localities(&self) -> Result<Vec<String>> {
        let rows: Vec<CityRow> = self
            .fetch_json(
                self.client
                    .get(self.endpoint(RESTAURANTS)?)
                    .query(&[("select", "city"), ("city", "not.is.null")]),
                "GET /restaurants?select=city",
            )
            .await?;
        Ok(flatten_cities(rows))
    }
}

#[async_trait]
impl DetailBackend for SupabaseClient {
    async fn restaurant(&self, id: &RowId) -> Result<Row> {
        let id = numeric_id(id)?;
        let rows: Vec<Row> = self
            .fetch_json(
                self.client.get(self.endpoint(RESTAURANTS)?).query(&[
                    ("select", RESTAURANT_COLUMNS.to_string()),
                    ("id", format!("eq.{}", id)),
                    ("limit", "1".to_string()),
                ]),
                "GET /restaurants?id=eq",
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(RESTAURANT_NOT_FOUND.to_string()))
    }

    async fn schedules(&self, id: &RowId) -> Result<Vec<Schedule>> {
        let id = numeric_id(id)?;
        self.fetch_json(
            self.client.get(self.endpoint(SCHEDULES)?).query(&[
                ("select", "day,open,close".to_string()),
                ("restaurant_id", format!("eq.{}", id)),
                ("order", "day.asc".to_string()),
            ]),
            "GET /schedules",
        )
        .await
    }

    async fn schedule_rules(&self, id: &RowId) -> Result<Vec<ScheduleRule>> {
        let id = numeric_id(id)?;
        self.fetch_json(
            self.client.get(self.endpoint(SCHEDULE_RULES)?).query(&[
                ("select", "day_from,day_to,open_time,close_time,note".to_string()),
                ("restaurant_id", format!("eq.{}", id)),
            ]),
            "GET /schedule_rules",
        )
        .await
    }

    async fn menu(&self, id: &RowId) -> Result<Vec<MenuItem>> {
        let id = numeric_id(id)?;
        self.fetch_json(
            self.client.get(self.endpoint(MENU_ITEMS)?).query(&[
                ("select", MENU_COLUMNS.to_string()),
                ("restaurant_id", format!("eq.{}", id)),
                ("is_active", "eq.true".to_string()),
                ("order", "sort_index.asc,name.asc".to_string()),
            ]),
            "GET /menu_items",
        )
        .await
    }
}

/// Detail tables key restaurants by a positive integer.
fn numeric_id(id: &RowId) -> Result<i64> {
    let number = match id {
        RowId::Number(n) => Some(*n),
        RowId::Text(text) => text.trim().parse().ok(),
    };
    number
        .filter(|n| *n > 0)
        .ok_or_else(|| BackendError::NotFound(INVALID_RESTAURANT_ID.to_string()))
}

fn rejection(status: u16, body: &str) -> BackendError {
    let message = match serde_json::from_str::<PostgrestError>(body) {
        Ok(PostgrestError {
            message: Some(message),
            code,
            hint,
        }) => {
            if let Some(code) = code {
                debug!(code = %code, hint = ?hint, "PostgREST error");
            }
            message
        }
        _ => body.trim().to_string(),
    };
    BackendError::Rejected { status, message }
}

fn flatten_types(rows: Vec<TypesRow>) -> Vec<String> {
    rows.into_iter()
        .flat_map(|row| row.types.unwrap_or_default())
        .flatten()
        .collect()
}

fn flatten_cities(rows: Vec<CityRow>) -> Vec<String> {
    rows.into_iter()
        .filter_map(|row| row.city)
        .flat_map(|city| {
            city.names()
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

fn public_image_url(base_url: &str, bucket: &str, value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(value.to_string());
    }

    let path = value
        .trim_start_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    Some(format!(
        "{}/storage/v1/object/public/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        path
    ))
}

//! In-memory catalog backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::{BackendError, DetailBackend, Result, SearchBackend, SearchRequest, RESTAURANT_NOT_FOUND};
use crate::detail::{MenuItem, Schedule, ScheduleRule};
use crate::options::compare_base;
use crate::types::{Row, RowId};

/// Per-restaurant tables behind the detail screen.
#[derive(Debug, Clone, Default)]
struct DetailTables {
    schedules: Vec<Schedule>,
    rules: Vec<ScheduleRule>,
    menu: Vec<MenuItem>,
}

/// Search backend backed by an in-memory list of rows.
///
/// Rows are ordered by name (then id) so pagination is stable across calls.
/// Latency can be simulated per call; with `jitter` enabled, shorter terms take
/// longer so out-of-order suggestion responses show up in dev mode.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    rows: Arc<RwLock<Vec<Row>>>,
    latency: Duration,
    jitter: bool,
    failure: Arc<RwLock<Option<BackendError>>>,
    details: Arc<RwLock<HashMap<RowId, DetailTables>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, rows: Vec<Row>) -> Self {
        {
            let mut stored = self.rows.write().unwrap_or_else(|e| e.into_inner());
            stored.extend(rows);
            stored.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.id.to_string().cmp(&b.id.to_string()))
            });
        }
        self
    }

    pub fn with_schedules(self, id: impl Into<RowId>, schedules: Vec<Schedule>) -> Self {
        self.tables(id.into(), |t| t.schedules.extend(schedules));
        self
    }

    pub fn with_rules(self, id: impl Into<RowId>, rules: Vec<ScheduleRule>) -> Self {
        self.tables(id.into(), |t| t.rules.extend(rules));
        self
    }

    /// Inactive dishes are stored but never returned.
    pub fn with_menu(self, id: impl Into<RowId>, menu: Vec<MenuItem>) -> Self {
        self.tables(id.into(), |t| t.menu.extend(menu));
        self
    }

    fn tables(&self, id: RowId, update: impl FnOnce(&mut DetailTables)) {
        let mut details = self.details.write().unwrap_or_else(|e| e.into_inner());
        update(details.entry(id).or_default());
    }

    fn read_tables<T>(&self, id: &RowId, read: impl FnOnce(&DetailTables) -> T) -> Option<T> {
        let details = self.details.read().unwrap_or_else(|e| e.into_inner());
        details.get(id).map(read)
    }

    pub fn with_latency(mut self, latency: Duration, jitter: bool) -> Self {
        self.latency = latency;
        self.jitter = jitter;
        self
    }

    /// Make every following call fail with `error` until cleared.
    pub fn fail_with(&self, error: Option<BackendError>) {
        *self.failure.write().unwrap_or_else(|e| e.into_inner()) = error;
    }

    pub fn len(&self) -> usize {
        self.rows.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn simulate(&self, term: Option<&str>) -> Result<()> {
        if !self.latency.is_zero() {
            let delay = if self.jitter {
                // "p" waits longest, "pizzeria" the least.
                let len = term.map(|t| t.chars().count()).unwrap_or(0) as u32;
                self.latency * 4 / (len + 1)
            } else {
                self.latency
            };
            tokio::time::sleep(delay).await;
        }
        match self
            .failure
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn matches(row: &Row, request: &SearchRequest) -> bool {
    if let Some(category) = &request.category {
        if !row.types.iter().any(|t| t == category) {
            return false;
        }
    }
    if let Some(locality) = &request.locality {
        if !row.city.contains(locality) {
            return false;
        }
    }
    if let Some(term) = &request.term {
        let needle = term.to_lowercase();
        let name_match = row.name.to_lowercase().contains(&needle);
        let type_match = row.types.iter().any(|t| t.to_lowercase().contains(&needle));
        if !name_match && !type_match {
            return false;
        }
    }
    true
}

#[async_trait]
impl SearchBackend for MemoryBackend {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Row>> {
        self.simulate(request.term.as_deref()).await?;

        let rows = self.rows.read().unwrap_or_else(|e| e.into_inner());
        Ok(rows
            .iter()
            .filter(|row| matches(row, request))
            .skip(request.offset)
            .take(request.limit)
            .cloned()
            .collect())
    }

    async fn categories(&self) -> Result<Vec<String>> {
        self.simulate(None).await?;
        let rows = self.rows.read().unwrap_or_else(|e| e.into_inner());
        Ok(rows.iter().flat_map(|row| row.types.clone()).collect())
    }

    async fn localities(&self) -> Result<Vec<String>> {
        self.simulate(None).await?;
        let rows = self.rows.read().unwrap_or_else(|e| e.into_inner());
        Ok(rows
            .iter()
            .flat_map(|row| {
                row.city
                    .names()
                    .into_iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect())
    }
}

#[async_trait]
impl DetailBackend for MemoryBackend {
    async fn restaurant(&self, id: &RowId) -> Result<Row> {
        self.simulate(None).await?;
        let rows = self.rows.read().unwrap_or_else(|e| e.into_inner());
        rows.iter()
            .find(|row| &row.id == id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(RESTAURANT_NOT_FOUND.to_string()))
    }

    async fn schedules(&self, id: &RowId) -> Result<Vec<Schedule>> {
        self.simulate(None).await?;
        let mut schedules = self
            .read_tables(id, |t| t.schedules.clone())
            .unwrap_or_default();
        schedules.sort_by_key(|s| s.day);
        Ok(schedules)
    }

    async fn schedule_rules(&self, id: &RowId) -> Result<Vec<ScheduleRule>> {
        self.simulate(None).await?;
        Ok(self.read_tables(id, |t| t.rules.clone()).unwrap_or_default())
    }

    async fn menu(&self, id: &RowId) -> Result<Vec<MenuItem>> {
        self.simulate(None).await?;
        let mut menu: Vec<MenuItem> = self
            .read_tables(id, |t| t.menu.iter().filter(|i| i.active()).cloned().collect())
            .unwrap_or_default();
        // Missing sort index sorts last, as in PostgreSQL.
        menu.sort_by(|a, b| {
            (a.sort_index.is_none(), a.sort_index)
                .cmp(&(b.sort_index.is_none(), b.sort_index))
                .then_with(|| compare_base(&a.name, &b.name))
        });
        Ok(menu)
    }
}

//! Test double that parks every search until the test resolves it.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use super::{BackendError, Result, SearchBackend, SearchRequest};
use crate::types::Row;

/// A search call waiting for the test to decide its outcome.
pub struct PendingSearch {
    pub request: SearchRequest,
    responder: oneshot::Sender<Result<Vec<Row>>>,
}

impl PendingSearch {
    pub fn respond(self, rows: Vec<Row>) {
        let _ = self.responder.send(Ok(rows));
    }

    pub fn fail(self, error: BackendError) {
        let _ = self.responder.send(Err(error));
    }
}

#[derive(Default)]
struct ScriptState {
    log: Vec<SearchRequest>,
    pending: Vec<PendingSearch>,
    categories: Vec<String>,
    localities: Vec<String>,
}

/// Records every search request and holds it open until [`PendingSearch::respond`]
/// or [`PendingSearch::fail`] is called, so tests control completion order.
///
/// Filter-option lookups resolve immediately with the configured values.
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_facets(self, categories: &[&str], localities: &[&str]) -> Self {
        {
            let mut state = self.lock();
            state.categories = categories.iter().map(|c| c.to_string()).collect();
            state.localities = localities.iter().map(|l| l.to_string()).collect();
        }
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Every search request received so far, in arrival order.
    pub fn calls(&self) -> Vec<SearchRequest> {
        self.lock().log.clone()
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Take the oldest parked call.
    pub fn next_pending(&self) -> Option<PendingSearch> {
        let mut state = self.lock();
        if state.pending.is_empty() {
            None
        } else {
            Some(state.pending.remove(0))
        }
    }

    /// Take the oldest parked call matching `predicate`.
    pub fn take_pending(
        &self,
        predicate: impl Fn(&SearchRequest) -> bool,
    ) -> Option<PendingSearch> {
        let mut state = self.lock();
        let index = state.pending.iter().position(|p| predicate(&p.request))?;
        Some(state.pending.remove(index))
    }

    /// Yield to the runtime until at least `count` calls are parked.
    pub async fn wait_pending(&self, count: usize) {
        for _ in 0..1_000 {
            if self.pending_len() >= count {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!(
            "expected {} pending searches, found {}",
            count,
            self.pending_len()
        );
    }
}

#[async_trait]
impl SearchBackend for ScriptedBackend {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Row>> {
        let (tx, rx) = oneshot::channel();
        {
            let mut state = self.lock();
            state.log.push(request.clone());
            state.pending.push(PendingSearch {
                request: request.clone(),
                responder: tx,
            });
        }
        rx.await
            .unwrap_or_else(|_| Err(BackendError::Transport("scripted call dropped".to_string())))
    }

    async fn categories(&self) -> Result<Vec<String>> {
        Ok(self.lock().categories.clone())
    }

    async fn localities(&self) -> Result<Vec<String>> {
        Ok(self.lock().localities.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(term: &str) -> SearchRequest {
        SearchRequest {
            term: Some(term.to_string()),
            category: None,
            locality: None,
            limit: 6,
            offset: 0,
        }
    }

    #[tokio::test]
    async fn responses_can_arrive_out_of_order() {
        let backend = ScriptedBackend::new();

        let first = tokio::spawn({
            let backend = backend.clone();
            async move { backend.search(&request("piz")).await }
        });
        let second = tokio::spawn({
            let backend = backend.clone();
            async move { backend.search(&request("pizza")).await }
        });

        backend.wait_pending(2).await;
        backend
            .take_pending(|r| r.term.as_deref() == Some("pizza"))
            .unwrap()
            .respond(vec![Row::new(1, "Pizza B")]);
        assert_eq!(second.await.unwrap().unwrap()[0].name, "Pizza B");

        backend
            .next_pending()
            .unwrap()
            .fail(BackendError::Transport("timeout".to_string()));
        assert!(first.await.unwrap().is_err());

        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn facets_resolve_immediately() {
        let backend = ScriptedBackend::new().with_facets(&["Tapas"], &["Orihuela"]);
        assert_eq!(backend.categories().await.unwrap(), vec!["Tapas"]);
        assert_eq!(backend.localities().await.unwrap(), vec!["Orihuela"]);
        assert!(backend.calls().is_empty());
    }
}

use crate::background::{LatestRequest, Notifier};
use crate::runtime::AsyncSpawner;
use crate::search::{AutocompleteService, Suggestion};
use crate::Result;
use std::sync::Arc;

/// Forwards queries to an [`AutocompleteService`] and republishes the latest list
pub struct SearchCompleter {
    service: Arc<dyn AutocompleteService>,
    requests: LatestRequest<Result<Vec<Suggestion>>>,
    suggestions: Vec<Suggestion>,
    query: String,
    last_error: Option<String>,
}

impl SearchCompleter {
    pub fn new(service: Arc<dyn AutocompleteService>, spawner: Arc<dyn AsyncSpawner>) -> Self {
        Self {
            service,
            requests: LatestRequest::new(spawner),
            suggestions: Vec::new(),
            query: String::new(),
            last_error: None,
        }
    }

    pub fn set_notifier(&mut self, notifier: Notifier) {
        self.requests.set_notifier(notifier);
    }

    /// Starts completing `query`. A blank query cancels the in-flight request
    /// and clears the list without asking the service.
    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();

        if query.trim().is_empty() {
            self.requests.cancel();
            self.suggestions.clear();
            self.last_error = None;
            return;
        }

        let service = self.service.clone();
        let query = query.to_string();
        let generation = self.requests.submit(async move { service.complete(&query).await });
        log::debug!("autocomplete request #{} for {:?}", generation, self.query);
    }

    /// Applies the result of the current query if it has arrived. Returns
    /// whether the list or the error changed.
    pub fn poll(&mut self) -> bool {
        match self.requests.poll() {
            Some(Ok(suggestions)) => {
                log::debug!("{} suggestions for {:?}", suggestions.len(), self.query);
                self.suggestions = suggestions;
                self.last_error = None;
                true
            }
            Some(Err(e)) => {
                log::warn!("autocomplete for {:?} failed: {}", self.query, e);
                self.last_error = Some(e.to_string());
                true
            }
            None => false,
        }
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Message of the most recent failed completion, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_searching(&self) -> bool {
        self.requests.is_pending()
    }
}

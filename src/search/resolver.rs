use crate::background::{LatestRequest, Notifier};
use crate::runtime::AsyncSpawner;
use crate::search::{Place, PlaceLookupService, Suggestion};
use crate::Result;
use std::sync::Arc;

/// How a place lookup ended
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(Place),
    /// The service answered but matched nothing
    NotFound,
    Failed(String),
}

/// One-shot suggestion → coordinate lookups; a newer selection supersedes an older one
pub struct PlaceResolver {
    service: Arc<dyn PlaceLookupService>,
    requests: LatestRequest<Result<Option<Place>>>,
}

impl PlaceResolver {
    pub fn new(service: Arc<dyn PlaceLookupService>, spawner: Arc<dyn AsyncSpawner>) -> Self {
        Self {
            service,
            requests: LatestRequest::new(spawner),
        }
    }

    pub fn set_notifier(&mut self, notifier: Notifier) {
        self.requests.set_notifier(notifier);
    }

    pub fn resolve(&mut self, suggestion: Suggestion) {
        let service = self.service.clone();
        let generation = self
            .requests
            .submit(async move { service.lookup(&suggestion).await });
        log::debug!("place lookup #{} started", generation);
    }

    /// Outcome of the newest lookup, once it has arrived
    pub fn poll(&mut self) -> Option<Resolution> {
        let resolution = match self.requests.poll()? {
            Ok(Some(place)) => Resolution::Found(place),
            Ok(None) => Resolution::NotFound,
            Err(e) => Resolution::Failed(e.to_string()),
        };
        Some(resolution)
    }

    pub fn is_resolving(&self) -> bool {
        self.requests.is_pending()
    }
}

use super::source::TileSource;
use super::TileKey;
use crate::background::Notifier;
use crate::core::config::TileConfig;
use crate::runtime::{self, AsyncSpawner};
use crate::{Error, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Downloads tiles on the async runtime and reports finished downloads over a
/// channel. Each tile is requested at most once while in flight; tiles that
/// failed every attempt are not retried until [`TileLoader::forget_failures`].
pub struct TileLoader {
    spawner: Arc<dyn AsyncSpawner>,
    client: reqwest::Client,
    max_attempts: usize,
    tx: Sender<(TileKey, Result<Vec<u8>>)>,
    rx: Receiver<(TileKey, Result<Vec<u8>>)>,
    pending: HashSet<TileKey>,
    failed: HashSet<TileKey>,
    notifier: Option<Notifier>,
}

impl TileLoader {
    pub fn new(config: &TileConfig, spawner: Arc<dyn AsyncSpawner>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(15))
            .build()?;
        let (tx, rx) = unbounded();

        Ok(Self {
            spawner,
            client,
            max_attempts: config.max_attempts.max(1),
            tx,
            rx,
            pending: HashSet::new(),
            failed: HashSet::new(),
            notifier: None,
        })
    }

    pub fn set_notifier(&mut self, notifier: Notifier) {
        self.notifier = Some(notifier);
    }

    /// Start downloading `key` unless it is off the tile grid, already in
    /// flight or known bad. Returns whether a download was started.
    pub fn request(&mut self, source: &dyn TileSource, key: TileKey) -> bool {
        if !key.coord.is_valid() {
            log::debug!("skipping off-grid tile {:?}", key);
            return false;
        }
        if self.pending.contains(&key) || self.failed.contains(&key) {
            return false;
        }
        self.pending.insert(key);

        let url = source.url(key.coord);
        let client = self.client.clone();
        let tx = self.tx.clone();
        let notifier = self.notifier.clone();
        let max_attempts = self.max_attempts;

        runtime::spawn(self.spawner.as_ref(), async move {
            let result = fetch_with_retries(&client, &url, max_attempts).await;
            if tx.send((key, result)).is_ok() {
                if let Some(notify) = notifier {
                    notify();
                }
            }
        });
        true
    }

    /// Collects finished downloads; failures are remembered and dropped
    pub fn drain(&mut self) -> Vec<(TileKey, Vec<u8>)> {
        let mut ready = Vec::new();
        while let Ok((key, result)) = self.rx.try_recv() {
            self.pending.remove(&key);
            match result {
                Ok(data) => ready.push((key, data)),
                Err(e) => {
                    log::error!("giving up on tile {:?}: {}", key, e);
                    self.failed.insert(key);
                }
            }
        }
        ready
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn forget_failures(&mut self) {
        self.failed.clear();
    }
}

async fn fetch_with_retries(
    client: &reqwest::Client,
    url: &str,
    max_attempts: usize,
) -> Result<Vec<u8>> {
    let mut last_error = Error::Service(format!("no attempt made for {url}"));
    for attempt in 1..=max_attempts {
        log::debug!("fetch tile {} attempt {}", url, attempt);
        match fetch(client, url).await {
            Ok(data) => {
                log::info!("downloaded tile {} ({} bytes)", url, data.len());
                return Ok(data);
            }
            Err(e) => {
                log::warn!("tile {} download failed on attempt {}: {}", url, attempt, e);
                last_error = e;
                if attempt < max_attempts {
                    #[cfg(feature = "tokio-runtime")]
                    ::tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                }
            }
        }
    }
    Err(last_error)
}

async fn fetch(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(Error::Service(format!("HTTP {}", response.status())));
    }
    Ok(response.bytes().await?.to_vec())
}

#[cfg(all(test, feature = "tokio-runtime"))]
mod tests {
    use super::*;
    use crate::core::geo::TileCoord;
    use crate::map::style::MapStyle;
    use crate::tiles::TemplateSource;

    #[::tokio::test]
    async fn test_duplicate_requests_are_ignored_and_failures_remembered() {
        let config = TileConfig {
            max_attempts: 1,
            ..TileConfig::default()
        };
        let mut loader = TileLoader::new(&config, runtime::current_spawner().unwrap()).unwrap();
        // port 9 on localhost refuses connections, so the fetch fails fast
        let source = TemplateSource::new("http://127.0.0.1:9/{z}/{x}/{y}.png");
        let key = TileKey::new(MapStyle::Standard, TileCoord::new(0, 0, 0));

        assert!(loader.request(&source, key));
        assert!(!loader.request(&source, key));
        assert_eq!(loader.pending_count(), 1);

        let mut drained = Vec::new();
        for _ in 0..100 {
            ::tokio::time::sleep(Duration::from_millis(20)).await;
            drained.extend(loader.drain());
            if loader.pending_count() == 0 {
                break;
            }
        }

        assert!(drained.is_empty());
        assert_eq!(loader.pending_count(), 0);
        assert!(!loader.request(&source, key));

        loader.forget_failures();
        assert!(loader.request(&source, key));
    }

    #[::tokio::test]
    async fn test_off_grid_tiles_are_never_requested() {
        let spawner = runtime::current_spawner().unwrap();
        let mut loader = TileLoader::new(&TileConfig::default(), spawner).unwrap();
        let source = TemplateSource::new("http://127.0.0.1:9/{z}/{x}/{y}.png");
        let off_grid = TileKey::new(MapStyle::Standard, TileCoord::new(4, 0, 2));

        assert!(!loader.request(&source, off_grid));
        assert_eq!(loader.pending_count(), 0);
    }
}

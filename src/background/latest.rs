//! Latest-wins async requests
//!
//! Every submission bumps a generation counter and aborts the task before it.
//! A result is tagged with the generation it was started under and is
//! dropped, both when sent and when received, unless that generation is
//! still current. An old response therefore can never overwrite a newer one,
//! whatever order the network delivers them in.

use crate::runtime::{self, AsyncHandle, AsyncSpawner};
use crossbeam_channel::{unbounded, Receiver, Sender};
use futures::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Called from the worker after a result is queued, e.g. to request a UI repaint
pub type Notifier = Arc<dyn Fn() + Send + Sync>;

pub struct LatestRequest<T> {
    spawner: Arc<dyn AsyncSpawner>,
    generation: Arc<AtomicU64>,
    tx: Sender<(u64, T)>,
    rx: Receiver<(u64, T)>,
    in_flight: Option<Box<dyn AsyncHandle>>,
    notifier: Option<Notifier>,
}

impl<T: Send + 'static> LatestRequest<T> {
    pub fn new(spawner: Arc<dyn AsyncSpawner>) -> Self {
        let (tx, rx) = unbounded();
        Self {
            spawner,
            generation: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
            in_flight: None,
            notifier: None,
        }
    }

    pub fn set_notifier(&mut self, notifier: Notifier) {
        self.notifier = Some(notifier);
    }

    /// Starts `future`, superseding whatever was in flight
    pub fn submit<F>(&mut self, future: F) -> u64
    where
        F: Future<Output = T> + Send + 'static,
    {
        let generation = self.supersede();
        let current = self.generation.clone();
        let tx = self.tx.clone();
        let notifier = self.notifier.clone();

        let handle = runtime::spawn(self.spawner.as_ref(), async move {
            let output = future.await;
            if current.load(Ordering::SeqCst) != generation {
                log::debug!("discarding result of superseded request #{}", generation);
                return;
            }
            if tx.send((generation, output)).is_ok() {
                if let Some(notify) = notifier {
                    notify();
                }
            }
        });
        self.in_flight = Some(handle);
        generation
    }

    /// Aborts the in-flight request, if any, and invalidates its result
    pub fn cancel(&mut self) {
        self.supersede();
    }

    fn supersede(&mut self) -> u64 {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                handle.cancel();
            }
        }
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns the result of the current request once it has arrived
    pub fn poll(&mut self) -> Option<T> {
        let current = self.generation.load(Ordering::SeqCst);
        let mut latest = None;
        while let Ok((generation, output)) = self.rx.try_recv() {
            if generation == current {
                latest = Some(output);
            }
        }
        if latest.is_some() {
            self.in_flight = None;
        }
        latest
    }

    /// True while the current request's task is still running. A task that
    /// died without sending counts as settled.
    pub fn is_pending(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

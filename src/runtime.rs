//! Runtime abstraction layer for async operations
//!
//! The search completer, place resolver and tile loader spawn their network
//! futures through [`AsyncSpawner`] so the UI code never names a concrete
//! runtime, and tests can drive everything from `#[tokio::test]`.

use futures::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future accepted by [`AsyncSpawner::spawn_boxed`]
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(&self, future: BoxFuture) -> Box<dyn AsyncHandle>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

/// Convenience wrapper for spawning without boxing at the call site
pub fn spawn<F>(spawner: &dyn AsyncSpawner, future: F) -> Box<dyn AsyncHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    spawner.spawn_boxed(Box::pin(future))
}

#[cfg(feature = "tokio-runtime")]
pub mod tokio_impl {
    use super::*;
    use ::tokio::runtime::Handle;
    use ::tokio::task::JoinHandle;

    /// Tokio-based async spawner bound to one runtime
    #[derive(Debug, Clone)]
    pub struct TokioSpawner {
        handle: Handle,
    }

    impl TokioSpawner {
        pub fn new(handle: Handle) -> Self {
            Self { handle }
        }

        /// Binds to the runtime the caller is running inside, if any
        pub fn current() -> Option<Self> {
            Handle::try_current().ok().map(Self::new)
        }
    }

    impl AsyncSpawner for TokioSpawner {
        fn spawn_boxed(&self, future: BoxFuture) -> Box<dyn AsyncHandle> {
            Box::new(TokioHandle(self.handle.spawn(future)))
        }
    }

    struct TokioHandle(JoinHandle<()>);

    impl AsyncHandle for TokioHandle {
        fn is_finished(&self) -> bool {
            self.0.is_finished()
        }

        fn cancel(&self) {
            self.0.abort();
        }
    }
}

/// Spawner for the runtime the caller is inside
#[cfg(feature = "tokio-runtime")]
pub fn current_spawner() -> crate::Result<Arc<dyn AsyncSpawner>> {
    tokio_impl::TokioSpawner::current()
        .map(|spawner| Arc::new(spawner) as Arc<dyn AsyncSpawner>)
        .ok_or_else(|| crate::Error::Service("no tokio runtime is running".to_string()))
}

#[cfg(all(test, feature = "tokio-runtime"))]
mod tests {
    use super::*;
    use std::time::Duration;

    #[::tokio::test]
    async fn test_tokio_spawner() {
        let spawner = current_spawner().unwrap();
        let handle = spawn(spawner.as_ref(), async {
            ::tokio::time::sleep(Duration::from_millis(10)).await;
        });

        assert!(!handle.is_finished());

        ::tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished());
    }

    #[::tokio::test]
    async fn test_cancel_stops_task() {
        let spawner = current_spawner().unwrap();
        let (tx, rx) = crossbeam_channel::unbounded::<()>();
        let handle = spawn(spawner.as_ref(), async move {
            ::tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(());
        });

        handle.cancel();
        ::tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(handle.is_finished());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_no_runtime_outside_tokio() {
        assert!(current_spawner().is_err());
    }
}

pub mod latest;

pub use latest::{LatestRequest, Notifier};

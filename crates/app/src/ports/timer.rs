//! Timer port: one-shot delays on the host event loop.

use std::future::Future;
use std::time::Duration;

/// Resolves once `duration` has elapsed.
///
/// The browser adapter backs this with `gloo-timers`, the terminal adapter
/// with `tokio::time`.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

//! Timer backed by tokio's clock.

use std::future::Future;
use std::time::Duration;

use irrigo_app::ports::Timer;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn should_sleep_for_requested_duration() {
        let start = tokio::time::Instant::now();

        TokioTimer.sleep(Duration::from_millis(2000)).await;

        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}

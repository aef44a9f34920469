//! Timer on the browser's `setTimeout`.

use std::future::Future;
use std::time::Duration;

use irrigo_app::ports::Timer;

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        gloo_timers::future::sleep(duration)
    }
}

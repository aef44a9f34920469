//! Poller: the fetch, apply, render, reschedule cycle.
//!
//! One cycle fetches `/api/data`, replaces the store on success, and redraws.
//! Failures leave the store alone and are only logged. Every cycle is
//! followed by exactly one delayed follow-up, whatever its outcome; the next
//! delay starts only once the current cycle has settled, so polls never
//! overlap. There is no retry limit and no backoff.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::ports::{ControllerApi, Dashboard, LinkStatus, Timer};
use crate::renderer;
use crate::store::ClientStateStore;

/// Delay between the end of one cycle and the start of the next.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Result of a single poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new snapshot replaced the store and the dashboard was redrawn.
    Applied,
    /// The fetch failed; the previous snapshot is still displayed.
    Stale,
}

/// Requests an extra poll cycle outside the regular cadence.
///
/// Cheap to clone. Requests made after the poller is gone are dropped.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    sender: mpsc::UnboundedSender<()>,
}

impl RefreshHandle {
    pub fn request(&self) {
        // Only fails when the poller has been dropped.
        let _ = self.sender.send(());
    }
}

/// The state a cycle touches, kept apart from the timer and the refresh
/// receiver so both can be borrowed while a cycle runs.
struct Cycle<C, D> {
    controller: C,
    dashboard: D,
    store: ClientStateStore,
    consecutive_failures: u32,
}

impl<C: ControllerApi, D: Dashboard> Cycle<C, D> {
    async fn run(&mut self) -> CycleOutcome {
        let outcome = match self.controller.fetch_snapshot().await {
            Ok(snapshot) => {
                self.store.apply(snapshot);
                self.consecutive_failures = 0;
                tracing::debug!(
                    plants = self.store.plants().len(),
                    generation = self.store.generation(),
                    "snapshot applied"
                );
                if let Err(err) = renderer::redraw(&self.dashboard, &self.store) {
                    tracing::warn!(error = %err, "failed to render dashboard");
                }
                CycleOutcome::Applied
            }
            Err(err) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                tracing::warn!(
                    error = %err,
                    consecutive_failures = self.consecutive_failures,
                    "connection lost, keeping last snapshot"
                );
                CycleOutcome::Stale
            }
        };

        self.dashboard.show_link(LinkStatus {
            online: outcome == CycleOutcome::Applied,
            consecutive_failures: self.consecutive_failures,
        });
        outcome
    }
}

/// Drives the poll cycle against a controller and renders into a dashboard.
///
/// The poller owns the [`ClientStateStore`] and is its only writer.
pub struct Poller<C, T, D> {
    cycle: Cycle<C, D>,
    timer: T,
    interval: Duration,
    refresh_tx: mpsc::UnboundedSender<()>,
    refresh_rx: mpsc::UnboundedReceiver<()>,
}

impl<C, T, D> Poller<C, T, D>
where
    C: ControllerApi,
    T: Timer,
    D: Dashboard,
{
    /// Create a poller with an empty store and the default interval.
    pub fn new(controller: C, timer: T, dashboard: D) -> Self {
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        Self {
            cycle: Cycle {
                controller,
                dashboard,
                store: ClientStateStore::new(),
                consecutive_failures: 0,
            },
            timer,
            interval: DEFAULT_POLL_INTERVAL,
            refresh_tx,
            refresh_rx,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Handle for requesting forced refreshes.
    #[must_use]
    pub fn refresh_handle(&self) -> RefreshHandle {
        RefreshHandle {
            sender: self.refresh_tx.clone(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &ClientStateStore {
        &self.cycle.store
    }

    #[must_use]
    pub fn dashboard(&self) -> &D {
        &self.cycle.dashboard
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll forever, starting with an immediate cycle.
    pub async fn run(mut self) {
        tracing::info!(interval = ?self.interval, "poller started");
        loop {
            self.step().await;
        }
    }

    /// Run one cycle, then wait out the delay before the next.
    pub async fn step(&mut self) -> CycleOutcome {
        let outcome = self.cycle.run().await;
        self.wait_for_next_cycle().await;
        outcome
    }

    /// Run a single cycle without scheduling a follow-up.
    pub async fn poll_once(&mut self) -> CycleOutcome {
        self.cycle.run().await
    }

    /// Sleep for one interval. Forced refreshes requested meanwhile run as
    /// extra cycles while the regular delay keeps counting down.
    async fn wait_for_next_cycle(&mut self) {
        let delay = self.timer.sleep(self.interval);
        tokio::pin!(delay);

        loop {
            tokio::select! {
                biased;
                Some(()) = self.refresh_rx.recv() => {
                    tracing::debug!("forced refresh");
                    self.cycle.run().await;
                }
                () = &mut delay => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingTimer, FakeController, RecordingDashboard};

    const BASIL: &str = r#"{"plants": [{"id": 1, "originalIndex": 0, "name": "Basil"}],
                            "env": {"vpd": 1.0, "temp": 22.0, "hum": 55.0}}"#;
    const MINT: &str = r#"{"plants": [{"id": 2, "originalIndex": 1, "name": "Mint"}]}"#;

    fn build_poller(
        controller: &FakeController,
        timer: &CountingTimer,
        dashboard: &RecordingDashboard,
    ) -> Poller<FakeController, CountingTimer, RecordingDashboard> {
        Poller::new(controller.clone(), timer.clone(), dashboard.clone())
    }

    fn names(poller: &Poller<FakeController, CountingTimer, RecordingDashboard>) -> Vec<String> {
        poller
            .store()
            .plants()
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn should_replace_store_with_fetched_snapshot() {
        let controller = FakeController::default();
        controller.push_snapshot(BASIL);
        let dashboard = RecordingDashboard::default();
        let mut poller = build_poller(&controller, &CountingTimer::default(), &dashboard);

        let outcome = poller.poll_once().await;

        assert_eq!(outcome, CycleOutcome::Applied);
        assert_eq!(names(&poller), vec!["Basil"]);
        assert_eq!(poller.store().environment().temp, Some(22.0));
        assert_eq!(dashboard.mounted().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_store_unchanged_when_fetch_fails() {
        let controller = FakeController::default();
        controller.push_snapshot(BASIL);
        controller.push_failure();
        let dashboard = RecordingDashboard::default();
        let mut poller = build_poller(&controller, &CountingTimer::default(), &dashboard);

        poller.poll_once().await;
        let before = poller.store().snapshot().clone();
        let outcome = poller.poll_once().await;

        assert_eq!(outcome, CycleOutcome::Stale);
        assert_eq!(poller.store().snapshot(), &before);
        assert_eq!(poller.store().generation(), 1);
        assert_eq!(dashboard.mounted().len(), 1, "no redraw after failure");
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_merge_consecutive_snapshots() {
        let controller = FakeController::default();
        controller.push_snapshot(BASIL);
        controller.push_snapshot(MINT);
        let mut poller = build_poller(
            &controller,
            &CountingTimer::default(),
            &RecordingDashboard::default(),
        );

        poller.poll_once().await;
        poller.poll_once().await;

        assert_eq!(names(&poller), vec!["Mint"]);
        assert!(!poller.store().environment().has_readings());
    }

    #[tokio::test(start_paused = true)]
    async fn should_schedule_exactly_one_follow_up_after_success() {
        let controller = FakeController::default();
        controller.push_snapshot(BASIL);
        let timer = CountingTimer::default();
        let mut poller = build_poller(&controller, &timer, &RecordingDashboard::default());

        poller.step().await;

        assert_eq!(timer.scheduled(), vec![DEFAULT_POLL_INTERVAL]);
        assert_eq!(controller.fetch_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_schedule_exactly_one_follow_up_after_failure() {
        let controller = FakeController::default();
        let timer = CountingTimer::default();
        let mut poller = build_poller(&controller, &timer, &RecordingDashboard::default());

        let outcome = poller.step().await;

        assert_eq!(outcome, CycleOutcome::Stale);
        assert_eq!(timer.scheduled(), vec![DEFAULT_POLL_INTERVAL]);
    }

    #[tokio::test(start_paused = true)]
    async fn should_poll_immediately_then_at_fixed_cadence() {
        let controller = FakeController::default();
        let timer = CountingTimer::default();
        let poller = build_poller(&controller, &timer, &RecordingDashboard::default());

        let _ = tokio::time::timeout(Duration::from_millis(1), poller.run()).await;
        assert_eq!(controller.fetch_count(), 1, "first cycle runs before any delay");

        let controller = FakeController::default();
        let timer = CountingTimer::default();
        let poller = build_poller(&controller, &timer, &RecordingDashboard::default());
        let _ = tokio::time::timeout(Duration::from_millis(4_500), poller.run()).await;
        assert_eq!(controller.fetch_count(), 3);
        assert_eq!(timer.scheduled().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_polling_after_repeated_failures() {
        let controller = FakeController::default();
        let dashboard = RecordingDashboard::default();
        let mut poller = build_poller(&controller, &CountingTimer::default(), &dashboard);

        for _ in 0..5 {
            poller.step().await;
        }
        controller.push_snapshot(BASIL);
        let outcome = poller.step().await;

        assert_eq!(outcome, CycleOutcome::Applied);
        assert_eq!(controller.fetch_count(), 6);
        let links = dashboard.links();
        assert_eq!(links[4].consecutive_failures, 5);
        assert!(!links[4].online);
        assert_eq!(
            links[5],
            LinkStatus {
                online: true,
                consecutive_failures: 0
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_run_forced_refresh_without_adding_a_schedule() {
        let controller = FakeController::default();
        controller.push_snapshot(BASIL);
        controller.push_snapshot(MINT);
        let timer = CountingTimer::default();
        let mut poller = build_poller(&controller, &timer, &RecordingDashboard::default());
        let refresh = poller.refresh_handle();

        refresh.request();
        poller.step().await;

        assert_eq!(controller.fetch_count(), 2);
        assert_eq!(timer.scheduled().len(), 1);
        assert_eq!(names(&poller), vec!["Mint"]);
    }

    #[tokio::test(start_paused = true)]
    async fn should_use_configured_interval() {
        let timer = CountingTimer::default();
        let mut poller = build_poller(
            &FakeController::default(),
            &timer,
            &RecordingDashboard::default(),
        )
        .with_interval(Duration::from_millis(500));

        poller.step().await;

        assert_eq!(timer.scheduled(), vec![Duration::from_millis(500)]);
    }
}

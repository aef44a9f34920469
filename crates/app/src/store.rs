//! Client state store: the last snapshot successfully applied.

use irrigo_domain::environment::Environment;
use irrigo_domain::network::ControllerStatus;
use irrigo_domain::plant::Plant;
use irrigo_domain::snapshot::Snapshot;

/// Single slot holding the most recent snapshot.
///
/// Owned by the [`Poller`](crate::poller::Poller), which is its only writer;
/// the renderer borrows it read-only after each write. Snapshots replace the
/// previous one wholesale, never merge with it.
#[derive(Debug, Default)]
pub struct ClientStateStore {
    snapshot: Snapshot,
    generation: u64,
}

impl ClientStateStore {
    /// An empty store: no plants, no readings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored snapshot.
    pub fn apply(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.generation += 1;
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Plants in the order the controller reported them.
    #[must_use]
    pub fn plants(&self) -> &[Plant] {
        &self.snapshot.plants
    }

    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.snapshot.env
    }

    #[must_use]
    pub fn controller_status(&self) -> &ControllerStatus {
        &self.snapshot.status
    }

    /// Number of snapshots applied so far; `0` until the first success.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

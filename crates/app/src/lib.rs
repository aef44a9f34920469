//! # irrigo-app
//!
//! Dashboard core: the state-synchronization and rendering loop plus the
//! **port definitions** (traits) it drives.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `ControllerApi`: the controller's HTTP API
//!   - `Timer`: one-shot delays on the host event loop
//!   - `Dashboard` / `ListContainer`: where rendered output goes
//!   - `UserInteraction`: confirmations, notices, modal control
//! - Own the **client state store** (last applied snapshot)
//! - Project the store into a typed **view tree** (`view`, `renderer`)
//! - Drive the **poll cycle** (`poller`) and translate gestures into
//!   controller requests (`dispatcher`)
//!
//! ## Concurrency
//! Everything here runs on one cooperative event loop (browser UI thread or
//! a tokio `LocalSet`), so no port requires `Send`.
//!
//! ## Dependency rule
//! Depends on `irrigo-domain` only (plus `tokio::sync` for the refresh
//! channel). Never imports adapter crates.

pub mod dispatcher;
pub mod poller;
pub mod ports;
pub mod renderer;
pub mod store;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

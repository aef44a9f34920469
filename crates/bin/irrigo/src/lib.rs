//! # irrigo: terminal dashboard
//!
//! Building blocks of the `irrigo` binary, exposed so the end-to-end tests
//! can wire them against a fake controller.
//!
//! - `config`: `irrigo.toml` plus environment overrides
//! - `terminal`: text rendering of the dashboard and stdin confirmations
//! - `command` / `console`: the interactive command line
//! - `timer`: the poller's clock

pub mod command;
pub mod config;
pub mod console;
pub mod terminal;
pub mod timer;

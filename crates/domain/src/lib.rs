//! # irrigo-domain
//!
//! Pure domain model for the irrigo controller dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Plants** (one per watered channel) and their display rules:
//!   status priority and sensor classification
//! - Define the **Environment** readings (VPD, temperature, humidity)
//! - Define the **Snapshot** payload returned by the controller and its
//!   default-on-missing-field rules
//! - Define the **Requests** the dashboard sends and the fixed endpoint paths
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod endpoint;
pub mod environment;
pub mod network;
pub mod plant;
pub mod request;
pub mod snapshot;

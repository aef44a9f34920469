//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the dashboard core and the outside world:
//! the controller's HTTP API, the host's timer, the rendering surface, and
//! the person in front of it.

pub mod controller;
pub mod dashboard;
pub mod interaction;
pub mod timer;

pub use controller::ControllerApi;
pub use dashboard::{Dashboard, LinkStatus, ListContainer};
pub use interaction::UserInteraction;
pub use timer::Timer;

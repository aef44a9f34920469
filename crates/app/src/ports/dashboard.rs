//! Dashboard port: the surface rendered output is pushed to.

use irrigo_domain::error::RenderError;

use crate::view::{EnvironmentReadout, Fragment};

/// A container whose children are replaced wholesale on every redraw.
pub trait ListContainer {
    /// Drop every child and mount `fragment` in its place.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the host refuses to build or attach a node.
    fn replace_children(&mut self, fragment: Fragment) -> Result<(), RenderError>;
}

/// Outcome of the most recent poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkStatus {
    pub online: bool,
    /// Failed cycles since the last successful one.
    pub consecutive_failures: u32,
}

/// The rendering surface of one front end.
pub trait Dashboard {
    type List: ListContainer;

    /// Update the VPD / temperature / humidity readout.
    fn show_environment(&self, readout: &EnvironmentReadout);

    /// Update the controller status line (network, uptime).
    fn show_status(&self, line: &str);

    /// Look up the plant list container.
    ///
    /// `None` when it is not part of the current view; rendering is then
    /// skipped.
    fn plant_list(&self) -> Option<Self::List>;

    /// Reflect the poll link state. Ignored by default.
    fn show_link(&self, _status: LinkStatus) {}
}

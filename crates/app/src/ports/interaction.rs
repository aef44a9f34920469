//! Interaction port: the person operating the dashboard.

use std::future::Future;

/// Confirmation prompts, notices, and modal control.
pub trait UserInteraction {
    /// Ask a yes/no question; `true` means go ahead.
    fn confirm(&self, message: &str) -> impl Future<Output = bool>;

    /// Show an informational notice.
    fn notify(&self, message: &str);

    /// Close every open modal dialog.
    fn close_modals(&self);
}

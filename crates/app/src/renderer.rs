//! Renderer: pushes the store's contents to a [`Dashboard`].

use irrigo_domain::error::RenderError;
use irrigo_domain::plant::Plant;

use crate::ports::{Dashboard, ListContainer};
use crate::store::ClientStateStore;
use crate::view::{self, EnvironmentReadout};

/// What a redraw did with the plant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The container's children were replaced with `rows` rows.
    Mounted { rows: usize },
    /// No container in the current view; nothing was drawn.
    Skipped,
}

/// Redraw every part of the dashboard from `store`.
///
/// # Errors
///
/// Returns [`RenderError`] when the plant list container rejects the fragment.
pub fn redraw<D: Dashboard>(
    dashboard: &D,
    store: &ClientStateStore,
) -> Result<RenderOutcome, RenderError> {
    dashboard.show_environment(&EnvironmentReadout::from_environment(store.environment()));
    dashboard.show_status(&view::status_line(store.controller_status()));
    render_plants(dashboard, store.plants())
}

/// Replace the plant list container's content with one row per plant.
///
/// # Errors
///
/// Returns [`RenderError`] when the container rejects the fragment.
pub fn render_plants<D: Dashboard>(
    dashboard: &D,
    plants: &[Plant],
) -> Result<RenderOutcome, RenderError> {
    let Some(mut list) = dashboard.plant_list() else {
        tracing::trace!("plant list not in view, skipping render");
        return Ok(RenderOutcome::Skipped);
    };

    let fragment = view::plant_list(plants);
    let rows = fragment.len();
    list.replace_children(fragment)?;
    Ok(RenderOutcome::Mounted { rows })
}

//! Stat card component for one environment reading.

use leptos::prelude::*;

/// A card displaying a label, a live value and its unit.
#[component]
pub fn StatCard(
    /// The label shown above the value.
    #[prop(into)]
    label: String,
    /// Unit printed after the value.
    #[prop(into)]
    unit: String,
    /// Formatted reading; `--` when unavailable.
    value: Signal<String>,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-label">{label}</span>
            <span class="stat-value">{move || value.get()}<small>{unit}</small></span>
        </div>
    }
}

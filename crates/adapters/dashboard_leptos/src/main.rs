use irrigo_dashboard_leptos::{App, logging};

fn main() {
    logging::init(logging::DEFAULT_FILTER);
    leptos::mount::mount_to_body(App);
}

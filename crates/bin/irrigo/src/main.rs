//! # irrigo: terminal dashboard for the irrigation controller
//!
//! Composition root that wires the reqwest controller adapter, the core
//! poller and dispatcher, and the terminal front end together.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging to stderr
//! - Start the poller on a single-threaded runtime
//! - Run the command console on stdin until `quit` or end of input
//!
//! ## Dependency rule
//! This is the **only** crate that depends on every other crate.
//! It is the wiring layer: no domain logic belongs here.

use std::cell::RefCell;
use std::rc::Rc;

use irrigo::config::Config;
use irrigo::terminal::{LineReader, TerminalDashboard, TerminalUser};
use irrigo::timer::TokioTimer;
use irrigo::{command, console};
use irrigo_adapter_http_reqwest::ReqwestController;
use irrigo_app::dispatcher::ActionDispatcher;
use irrigo_app::poller::Poller;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run(config))
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let controller = ReqwestController::new(config.controller_url());
    tracing::info!(controller = controller.base_url(), "irrigo starting");

    let out = Rc::new(RefCell::new(std::io::stdout()));
    let input = LineReader::new(tokio::io::BufReader::new(tokio::io::stdin()));

    let poller = Poller::new(
        controller.clone(),
        TokioTimer,
        TerminalDashboard::new(Rc::clone(&out)),
    )
    .with_interval(config.poll_interval());
    let dispatcher = ActionDispatcher::new(
        controller,
        TerminalUser::new(input.clone(), Rc::clone(&out)),
        poller.refresh_handle(),
    );

    println!("{}", command::HELP);
    let polling = tokio::task::spawn_local(poller.run());
    console::run(&dispatcher, &input, &out).await?;
    polling.abort();

    tracing::info!("irrigo stopped");
    Ok(())
}

//! `tracing` output routed to the browser console.
//!
//! Each event is buffered by a [`ConsoleWriter`] and emitted with
//! `leptos::logging` when the writer is dropped, at the console level that
//! matches the event.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

pub const DEFAULT_FILTER: &str = "irrigo=info";

pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end();
        if line.is_empty() {
            return;
        }
        if self.level == Level::ERROR {
            leptos::logging::error!("{line}");
        } else if self.level == Level::WARN {
            leptos::logging::warn!("{line}");
        } else {
            leptos::logging::log!("{line}");
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

/// Install the console subscriber. Timestamps and colours are left to the
/// devtools console.
pub fn init(filter: &str) {
    let result = tracing_subscriber::fmt()
        .with_ansi(false)
        .without_time()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(ConsoleMakeWriter)
        .try_init();
    if let Err(err) = result {
        leptos::logging::warn!("tracing already initialised: {err}");
    }
}

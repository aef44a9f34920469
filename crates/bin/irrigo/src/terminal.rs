//! Terminal front end: renders the dashboard as text and asks questions on
//! stdin.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use irrigo_app::ports::{Dashboard, LinkStatus, ListContainer, UserInteraction};
use irrigo_app::view::{Action, Element, EnvironmentReadout, Fragment, Node};
use irrigo_domain::error::RenderError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::Mutex;

/// Output stream shared by the dashboard, prompts and the console.
pub type SharedWriter<W> = Rc<RefCell<W>>;

fn emit<W: Write>(out: &SharedWriter<W>, args: fmt::Arguments<'_>) {
    let mut out = out.borrow_mut();
    if let Err(err) = out.write_fmt(args).and_then(|()| out.flush()) {
        tracing::warn!(error = %err, "failed to write to terminal");
    }
}

/// Line-oriented input shared between the console loop and confirmations.
pub struct LineReader<R> {
    lines: Rc<Mutex<Lines<R>>>,
}

impl<R> Clone for LineReader<R> {
    fn clone(&self) -> Self {
        Self {
            lines: Rc::clone(&self.lines),
        }
    }
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: Rc::new(Mutex::new(reader.lines())),
        }
    }

    /// Next line without its terminator; `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    pub async fn next_line(&self) -> std::io::Result<Option<String>> {
        self.lines.lock().await.next_line().await
    }
}

/// Render one plant row as a single text line.
fn row_line(row: &Element) -> String {
    let text = |class: &str| {
        row.find_by_class(class)
            .map(Element::text_content)
            .unwrap_or_default()
    };
    let hints: Vec<String> = row
        .actions()
        .into_iter()
        .map(|action| match action {
            Action::Water(channel) => format!("water {channel}"),
            Action::Delete(id) => format!("rm {id}"),
        })
        .collect();
    format!(
        "{:>5}  {}  ({})  [{}]",
        text("p-val"),
        text("p-name"),
        text("p-meta"),
        hints.join(" | ")
    )
}

/// Render a fragment as text, one line per top-level node.
#[must_use]
pub fn render_text(fragment: &Fragment) -> String {
    let mut out = String::new();
    for node in fragment.nodes() {
        match node {
            Node::Element(element) => out.push_str(&row_line(element)),
            Node::Text(text) => out.push_str(text),
        }
        out.push('\n');
    }
    out
}

/// Dashboard printed to a writer (stdout in the binary).
pub struct TerminalDashboard<W> {
    out: SharedWriter<W>,
    online: Rc<Cell<bool>>,
}

impl<W> Clone for TerminalDashboard<W> {
    fn clone(&self) -> Self {
        Self {
            out: Rc::clone(&self.out),
            online: Rc::clone(&self.online),
        }
    }
}

impl<W: Write> TerminalDashboard<W> {
    pub fn new(out: SharedWriter<W>) -> Self {
        Self {
            out,
            online: Rc::new(Cell::new(true)),
        }
    }
}

/// The plant list section of a [`TerminalDashboard`].
pub struct TerminalList<W> {
    out: SharedWriter<W>,
}

impl<W: Write> ListContainer for TerminalList<W> {
    fn replace_children(&mut self, fragment: Fragment) -> Result<(), RenderError> {
        let body = if fragment.is_empty() {
            "  (no plants)\n".to_string()
        } else {
            render_text(&fragment)
        };
        let mut out = self.out.borrow_mut();
        out.write_all(body.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|err| RenderError {
                target: "plant list",
                reason: err.to_string(),
            })
    }
}

impl<W: Write> Dashboard for TerminalDashboard<W> {
    type List = TerminalList<W>;

    fn show_environment(&self, readout: &EnvironmentReadout) {
        emit(
            &self.out,
            format_args!(
                "\nVPD {} kPa | TEMP {}\u{00B0}C | HUM {}%\n",
                readout.vpd, readout.temp, readout.hum
            ),
        );
    }

    fn show_status(&self, line: &str) {
        emit(&self.out, format_args!("{line}\n"));
    }

    fn plant_list(&self) -> Option<Self::List> {
        Some(TerminalList {
            out: Rc::clone(&self.out),
        })
    }

    /// Print only transitions, not every failed poll.
    fn show_link(&self, status: LinkStatus) {
        let was_online = self.online.replace(status.online);
        match (was_online, status.online) {
            (true, false) => emit(
                &self.out,
                format_args!("! controller unreachable, showing last known data\n"),
            ),
            (false, true) => emit(&self.out, format_args!("controller reachable again\n")),
            _ => {}
        }
    }
}

/// Confirmations and notices on the terminal.
pub struct TerminalUser<R, W> {
    input: LineReader<R>,
    out: SharedWriter<W>,
}

impl<R, W> TerminalUser<R, W> {
    pub fn new(input: LineReader<R>, out: SharedWriter<W>) -> Self {
        Self { input, out }
    }
}

impl<R, W> UserInteraction for TerminalUser<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    async fn confirm(&self, message: &str) -> bool {
        emit(&self.out, format_args!("{message} [y/N] "));
        match self.input.next_line().await {
            Ok(Some(answer)) => matches!(answer.trim(), "y" | "Y" | "yes"),
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read confirmation");
                false
            }
        }
    }

    fn notify(&self, message: &str) {
        emit(&self.out, format_args!("{message}\n"));
    }

    fn close_modals(&self) {
        tracing::trace!("no modals on the terminal");
    }
}

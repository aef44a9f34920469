//! Command console: reads stdin lines and hands them to the dispatcher.

use std::error::Error;
use std::io::Write;

use irrigo_app::dispatcher::{ActionDispatcher, Dispatched};
use irrigo_app::ports::{ControllerApi, UserInteraction};
use irrigo_domain::error::ClientError;
use tokio::io::AsyncBufRead;

use crate::command::{Command, HELP, ParseCommandError};
use crate::terminal::{LineReader, SharedWriter};

/// Error message followed by its chain of causes.
fn describe(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn outcome(dispatched: Dispatched, sent: impl FnOnce() -> String) -> String {
    match dispatched {
        Dispatched::Sent => sent(),
        Dispatched::Declined => "cancelled".to_string(),
    }
}

/// Run one command and describe its result.
///
/// # Errors
///
/// Returns whatever the dispatcher returned.
pub async fn execute<C, U>(
    dispatcher: &ActionDispatcher<C, U>,
    command: Command,
) -> Result<String, ClientError>
where
    C: ControllerApi,
    U: UserInteraction,
{
    let message = match command {
        Command::Water(channel) => {
            let sent = dispatcher.water(channel).await?;
            outcome(sent, || format!("watering channel {channel}"))
        }
        Command::Remove(id) => {
            let sent = dispatcher.delete(id).await?;
            outcome(sent, || format!("plant {id} deleted"))
        }
        Command::Add(name) => {
            let sent = dispatcher.add_plant(&name).await?;
            outcome(sent, || format!("plant {name:?} added"))
        }
        Command::Config {
            id,
            threshold,
            duration,
        } => {
            let sent = dispatcher.update_config(id, threshold, duration).await?;
            outcome(sent, || format!("plant {id} updated"))
        }
        Command::Wifi(credentials) => {
            let sent = dispatcher.save_wifi(credentials).await?;
            outcome(sent, || "credentials saved".to_string())
        }
        Command::Scan => {
            let networks = dispatcher.scan_networks().await?;
            if networks.is_empty() {
                "scan in progress, try again shortly".to_string()
            } else {
                networks
                    .iter()
                    .map(|network| {
                        let security = if network.secure { "secured" } else { "open" };
                        format!("  {} ({security})", network.ssid)
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Command::Detect(channel) => {
            let probe = dispatcher.detect_sensor(channel).await?;
            format!("channel {channel}: {} (raw {})", probe.mode, probe.raw)
        }
        Command::Reboot => {
            let sent = dispatcher.reboot().await?;
            outcome(sent, || "reboot requested".to_string())
        }
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    };
    Ok(message)
}

/// Read commands until `quit` or end of input.
///
/// Command failures are printed and logged; the console keeps going.
///
/// # Errors
///
/// Returns the I/O error when stdin can no longer be read.
pub async fn run<C, U, R, W>(
    dispatcher: &ActionDispatcher<C, U>,
    input: &LineReader<R>,
    out: &SharedWriter<W>,
) -> std::io::Result<()>
where
    C: ControllerApi,
    U: UserInteraction,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    while let Some(line) = input.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(ParseCommandError::Empty) => continue,
            Err(err) => {
                writeln!(out.borrow_mut(), "{err}")?;
                continue;
            }
        };

        let reply = match execute(dispatcher, command).await {
            Ok(message) => message,
            Err(err) => {
                let message = describe(&err);
                tracing::warn!(error = %message, "command failed");
                format!("error: {message}")
            }
        };
        let mut out = out.borrow_mut();
        writeln!(out, "{reply}")?;
        out.flush()?;
    }
    tracing::debug!("console closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use irrigo_app::poller::Poller;
    use irrigo_domain::endpoint;
    use irrigo_domain::error::ControllerError;

    use super::*;

    #[test]
    fn should_describe_error_chain() {
        let err = ClientError::from(ControllerError::Status {
            endpoint: endpoint::WATER,
            status: 503,
        });

        assert_eq!(
            describe(&err),
            "controller request failed: /api/water responded with HTTP 503"
        );
    }

    #[test]
    fn should_report_declined_as_cancelled() {
        assert_eq!(
            outcome(Dispatched::Declined, || "sent".to_string()),
            "cancelled"
        );
        assert_eq!(outcome(Dispatched::Sent, || "sent".to_string()), "sent");
    }

    #[tokio::test]
    async fn should_stop_at_quit_and_print_parse_errors() {
        // The controller is never reached: every line either fails to parse
        // or quits.
        let controller = irrigo_adapter_http_reqwest::ReqwestController::new("http://127.0.0.1:9");
        let out = Rc::new(RefCell::new(Vec::new()));
        let input = LineReader::new(&b"\npump 3\nquit\nwater 1\n"[..]);
        let user = crate::terminal::TerminalUser::new(input.clone(), Rc::clone(&out));
        let poller = Poller::new(
            controller.clone(),
            crate::timer::TokioTimer,
            crate::terminal::TerminalDashboard::new(Rc::clone(&out)),
        );
        let dispatcher = ActionDispatcher::new(controller, user, poller.refresh_handle());

        run(&dispatcher, &input, &out).await.unwrap();

        let printed = String::from_utf8(out.borrow().clone()).unwrap();
        assert_eq!(printed, "unknown command \"pump\", type 'help'\n");
    }
}

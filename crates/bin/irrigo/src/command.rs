//! Console commands typed on stdin.

use std::str::FromStr;

use irrigo_domain::id::{ChannelIndex, PlantId};
use irrigo_domain::request::WifiCredentials;

pub const HELP: &str = "\
commands:
  water <channel>                     run the pump on a channel
  rm <id>                             delete a plant (asks first)
  add <name>                          register a plant on the next free channel
  config <id> [threshold] [duration]  change threshold (%) / pump duration (s); '-' keeps a value
  wifi <ssid> [password]              save Wi-Fi credentials, the controller reboots
  scan                                list nearby networks
  detect <channel>                    force sensor auto-detection
  reboot                              restart the controller (asks first)
  help                                show this text
  quit                                exit";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Water(ChannelIndex),
    Remove(PlantId),
    /// Everything after `add`, verbatim. May be empty.
    Add(String),
    Config {
        id: PlantId,
        threshold: Option<i32>,
        duration: Option<u32>,
    },
    Wifi(WifiCredentials),
    Scan,
    Detect(ChannelIndex),
    Reboot,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, type 'help'")]
    Unknown(String),
    #[error("{command}: missing <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("{argument}: {value:?} is not a number")]
    InvalidNumber {
        argument: &'static str,
        value: String,
    },
}

fn number<T: FromStr>(argument: &'static str, value: &str) -> Result<T, ParseCommandError> {
    value
        .parse()
        .map_err(|_| ParseCommandError::InvalidNumber {
            argument,
            value: value.to_string(),
        })
}

fn optional<T: FromStr>(
    argument: &'static str,
    value: Option<&str>,
) -> Result<Option<T>, ParseCommandError> {
    match value {
        None | Some("-") => Ok(None),
        Some(value) => number(argument, value).map(Some),
    }
}

fn required<'a>(
    command: &'static str,
    argument: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ParseCommandError> {
    value.ok_or(ParseCommandError::MissingArgument { command, argument })
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();

        match verb {
            "" => Err(ParseCommandError::Empty),
            "water" => {
                let channel = required("water", "channel", args.next())?;
                Ok(Self::Water(number("channel", channel)?))
            }
            "rm" => {
                let id = required("rm", "id", args.next())?;
                Ok(Self::Remove(number("id", id)?))
            }
            "add" => Ok(Self::Add(rest.to_string())),
            "config" => {
                let id = required("config", "id", args.next())?;
                Ok(Self::Config {
                    id: number("id", id)?,
                    threshold: optional("threshold", args.next())?,
                    duration: optional("duration", args.next())?,
                })
            }
            "wifi" => {
                let ssid = required("wifi", "ssid", args.next())?;
                Ok(Self::Wifi(WifiCredentials {
                    ssid: ssid.to_string(),
                    password: args.next().unwrap_or_default().to_string(),
                }))
            }
            "scan" => Ok(Self::Scan),
            "detect" => {
                let channel = required("detect", "channel", args.next())?;
                Ok(Self::Detect(number("channel", channel)?))
            }
            "reboot" => Ok(Self::Reboot),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

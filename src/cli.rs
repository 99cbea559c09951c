//! Command-line surface.
//!
//! clap handles the raw argument vector; [`Cli::request`] turns it into a
//! validated [`Request`] before any audio call is made.

use crate::audio::DataFlow;
use clap::{ArgAction, Parser, ValueEnum};
use thiserror::Error;

/// Step used by `up` and `down` when no amount is given.
pub const DEFAULT_STEP: i32 = 5;

pub const USAGE: &str = "\
Usage:
  volctrl <device-name> up [amount]    - Increase volume by amount (default 5%)
  volctrl <device-name> down [amount]  - Decrease volume by amount (default 5%)
  volctrl <device-name> set <value>    - Set volume to value (0-100%)
  volctrl <device-name> mute           - Mute volume
  volctrl <device-name> unmute         - Unmute volume
  volctrl <device-name> toggle         - Toggle mute state
  volctrl <device-name> status         - Display current volume and mute state
  volctrl list                         - List all available audio devices
";

#[derive(Parser, Debug)]
#[command(
    name = "volctrl",
    version,
    about = "Adjust per-device audio volume and mute state",
    override_usage = "volctrl list [--all]\n       volctrl <DEVICE> <COMMAND> [VALUE]",
    after_help = USAGE
)]
pub struct Cli {
    /// `list`, or part of the device's friendly name (case-insensitive)
    #[arg(value_name = "DEVICE")]
    pub target: String,

    /// up, down, set, mute, unmute, toggle or status
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,

    /// Percent step for up/down, level for set
    #[arg(value_name = "VALUE", allow_negative_numbers = true)]
    pub value: Option<String>,

    #[arg(hide = true)]
    pub rest: Vec<String>,

    /// Which endpoints to search
    #[arg(long, value_enum, default_value_t = FlowArg::All)]
    pub flow: FlowArg,

    /// With `list`, also show disabled, unplugged and absent devices
    #[arg(long)]
    pub all: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FlowArg {
    Render,
    Capture,
    All,
}

impl From<FlowArg> for DataFlow {
    fn from(flow: FlowArg) -> Self {
        match flow {
            FlowArg::Render => DataFlow::Render,
            FlowArg::Capture => DataFlow::Capture,
            FlowArg::All => DataFlow::All,
        }
    }
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List { include_inactive: bool },
    Device { filter: String, action: Action },
}

/// Operation on a single device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up(i32),
    Down(i32),
    /// Level in percent, already range-checked
    Set(u8),
    Mute,
    Unmute,
    Toggle,
    Status,
}

impl Action {
    pub fn parse(command: &str, value: Option<&str>) -> Result<Self, UsageError> {
        let action = match command {
            "up" => Action::Up(parse_amount(value)?),
            "down" => Action::Down(parse_amount(value)?),
            "set" => Action::Set(parse_level(value)?),
            "mute" => Action::Mute,
            "unmute" => Action::Unmute,
            "toggle" => Action::Toggle,
            "status" => Action::Status,
            other => return Err(UsageError::UnknownCommand(other.to_string())),
        };
        Ok(action)
    }
}

/// Argument errors, raised before the audio subsystem is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("Missing command")]
    MissingCommand,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid amount value")]
    InvalidAmount,

    #[error("Missing volume value")]
    MissingVolume,

    #[error("Invalid volume value")]
    InvalidVolume,

    #[error("Volume value must be between 0 and 100")]
    VolumeOutOfRange,
}

impl UsageError {
    /// Whether the usage text should follow the error message.
    pub fn shows_usage(&self) -> bool {
        !matches!(self, UsageError::VolumeOutOfRange)
    }
}

impl Cli {
    pub fn request(&self) -> Result<Request, UsageError> {
        if self.target == "list" {
            return Ok(Request::List {
                include_inactive: self.all,
            });
        }

        let command = self
            .command
            .as_deref()
            .ok_or(UsageError::MissingCommand)?;

        Ok(Request::Device {
            filter: self.target.clone(),
            action: Action::parse(command, self.value.as_deref())?,
        })
    }
}

fn parse_amount(value: Option<&str>) -> Result<i32, UsageError> {
    match value {
        None => Ok(DEFAULT_STEP),
        Some(v) => v.parse().map_err(|_| UsageError::InvalidAmount),
    }
}

fn parse_level(value: Option<&str>) -> Result<u8, UsageError> {
    let value = value.ok_or(UsageError::MissingVolume)?;
    let level: i32 = value.parse().map_err(|_| UsageError::InvalidVolume)?;
    if !(0..=100).contains(&level) {
        return Err(UsageError::VolumeOutOfRange);
    }
    Ok(level as u8)
}

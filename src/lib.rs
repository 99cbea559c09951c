//! volctrl - per-device audio volume control for Windows.
//!
//! Finds an audio endpoint by a case-insensitive substring of its friendly
//! name and reads or changes its master volume and mute state through the
//! Core Audio API.
//!
//! ## Commands
//!
//! - `list`: show active endpoints and their IDs
//! - `up`/`down`: shift the volume by a percentage, saturating at 0 and 100
//! - `set`: set the volume to a percentage
//! - `mute`/`unmute`/`toggle`: change the mute flag
//! - `status`: show volume and mute state

pub mod audio;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

pub use audio::{
    AudioBackend, AudioDevice, AudioError, DataFlow, DeviceResolver, DeviceState, VolumeControl,
    VolumeController, VolumeState,
};
#[cfg(windows)]
pub use audio::DeviceEnumerator;
pub use cli::{Action, Cli, Request, UsageError};
pub use error::Error;

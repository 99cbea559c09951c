//! Command dispatch.
//!
//! Runs one [`Request`] against an [`AudioBackend`] and writes the
//! confirmation text. Errors are returned to the caller untouched.

use crate::audio::{
    AudioBackend, AudioDevice, AudioError, DataFlow, DeviceResolver, DeviceState, VolumeControl,
    VolumeController, VolumeState,
};
use crate::cli::{Action, Cli, Request};
use crate::error::Error;
use std::io::Write;
use tracing::{debug, info};

const RULE: &str = "--------------------------------------------------";

/// Validate the parsed arguments, then open the backend and run.
///
/// `open_backend` is only called once the arguments are known to be good,
/// so a bad argument never reaches the audio subsystem.
pub fn execute<B, F, W>(cli: &Cli, open_backend: F, out: &mut W) -> Result<(), Error>
where
    B: AudioBackend,
    F: FnOnce() -> Result<B, AudioError>,
    W: Write,
{
    let request = cli.request()?;
    debug!(?request, "parsed request");

    let backend = open_backend()?;
    run(&backend, &request, cli.flow.into(), out)
}

/// Execute `request`, writing human-readable output to `out`.
pub fn run<B: AudioBackend, W: Write>(
    backend: &B,
    request: &Request,
    flow: DataFlow,
    out: &mut W,
) -> Result<(), Error> {
    match request {
        Request::List { include_inactive } => list_devices(backend, flow, *include_inactive, out),
        Request::Device { filter, action } => {
            let device = DeviceResolver::new(backend, flow).find_device(filter)?;
            let controller = VolumeController::new(backend.open_volume_control(&device)?);
            apply(&controller, &device, filter, *action, out)
        }
    }
}

fn list_devices<B: AudioBackend, W: Write>(
    backend: &B,
    flow: DataFlow,
    include_inactive: bool,
    out: &mut W,
) -> Result<(), Error> {
    let devices = backend.enumerate_endpoints(flow, include_inactive)?;

    writeln!(out, "Available audio devices:")?;
    writeln!(out, "{RULE}")?;
    for device in &devices {
        writeln!(out, "Device: {}", device.display_name())?;
        writeln!(out, "ID: {}", device.id)?;
        if device.state != DeviceState::Active {
            writeln!(out, "State: {}", device.state)?;
        }
        writeln!(out, "{RULE}")?;
    }
    Ok(())
}

fn apply<C: VolumeControl, W: Write>(
    controller: &VolumeController<C>,
    device: &AudioDevice,
    filter: &str,
    action: Action,
    out: &mut W,
) -> Result<(), Error> {
    match action {
        Action::Up(amount) => {
            let level = controller.adjust_volume(amount)?;
            info!(device = device.display_name(), level, "volume increased");
            writeln!(
                out,
                "Increased volume for {filter} by {amount}% (now {}%)",
                VolumeState::percent_of(level)
            )?;
        }
        Action::Down(amount) => {
            let level = controller.adjust_volume(amount.saturating_neg())?;
            info!(device = device.display_name(), level, "volume decreased");
            writeln!(
                out,
                "Decreased volume for {filter} by {amount}% (now {}%)",
                VolumeState::percent_of(level)
            )?;
        }
        Action::Set(percent) => {
            controller.set_volume(f32::from(percent) / 100.0)?;
            writeln!(out, "Set volume for {filter} to {percent}%")?;
        }
        Action::Mute => {
            controller.set_mute(true)?;
            writeln!(out, "Muted {filter}")?;
        }
        Action::Unmute => {
            controller.set_mute(false)?;
            writeln!(out, "Unmuted {filter}")?;
        }
        Action::Toggle => {
            let muted = controller.toggle_mute()?;
            let verb = if muted { "Muted" } else { "Unmuted" };
            writeln!(out, "{verb} {filter}")?;
        }
        Action::Status => {
            let state = controller.state()?;
            writeln!(out, "Status for {}", device.display_name())?;
            writeln!(out, "Volume: {}%", state.percent())?;
            writeln!(out, "Mute: {}", state.muted)?;
        }
    }
    Ok(())
}

//! Device lookup by friendly-name substring.

use super::backend::AudioBackend;
use super::device::{AudioDevice, AudioError, DataFlow};
use tracing::debug;

/// Resolves a user-supplied name filter to one active endpoint.
pub struct DeviceResolver<'a, B: AudioBackend> {
    backend: &'a B,
    flow: DataFlow,
}

impl<'a, B: AudioBackend> DeviceResolver<'a, B> {
    pub fn new(backend: &'a B, flow: DataFlow) -> Self {
        Self { backend, flow }
    }

    /// Find the first active device whose friendly name contains `filter`,
    /// ignoring case.
    ///
    /// Enumeration order is whatever the OS returns; when several names
    /// match, the first one wins.
    pub fn find_device(&self, filter: &str) -> Result<AudioDevice, AudioError> {
        let devices = self.backend.enumerate_endpoints(self.flow, false)?;
        debug!(count = devices.len(), filter, "searching active endpoints");

        let device = devices
            .into_iter()
            .find(|d| d.matches(filter))
            .ok_or_else(|| AudioError::DeviceNotFound(filter.to_string()))?;

        debug!(id = %device.id, name = device.display_name(), "matched device");
        Ok(device)
    }
}

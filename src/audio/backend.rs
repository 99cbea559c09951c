//! Seams between the command layer and the OS audio API.

use super::device::{AudioDevice, AudioError, DataFlow};

/// Source of audio endpoints and their volume controls.
pub trait AudioBackend {
    type Control: VolumeControl;

    /// Enumerate endpoints for `flow` in OS order.
    ///
    /// Only active endpoints are returned unless `include_inactive` is set.
    fn enumerate_endpoints(
        &self,
        flow: DataFlow,
        include_inactive: bool,
    ) -> Result<Vec<AudioDevice>, AudioError>;

    /// Open the volume-control interface of a previously enumerated device.
    fn open_volume_control(&self, device: &AudioDevice) -> Result<Self::Control, AudioError>;
}

/// Endpoint volume handle. Released when dropped.
pub trait VolumeControl {
    /// Master volume as scalar (0.0 to 1.0).
    fn volume(&self) -> Result<f32, AudioError>;

    fn set_volume(&self, level: f32) -> Result<(), AudioError>;

    fn mute(&self) -> Result<bool, AudioError>;

    fn set_mute(&self, muted: bool) -> Result<(), AudioError>;
}

impl<B: AudioBackend + ?Sized> AudioBackend for &B {
    type Control = B::Control;

    fn enumerate_endpoints(
        &self,
        flow: DataFlow,
        include_inactive: bool,
    ) -> Result<Vec<AudioDevice>, AudioError> {
        (**self).enumerate_endpoints(flow, include_inactive)
    }

    fn open_volume_control(&self, device: &AudioDevice) -> Result<Self::Control, AudioError> {
        (**self).open_volume_control(device)
    }
}

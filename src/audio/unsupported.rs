//! Placeholder backend for hosts without Core Audio.

use super::backend::{AudioBackend, VolumeControl};
use super::device::{AudioDevice, AudioError, DataFlow};

/// Backend that cannot be constructed.
#[derive(Debug)]
pub enum UnsupportedBackend {}

impl UnsupportedBackend {
    pub fn new() -> Result<Self, AudioError> {
        Err(AudioError::init(
            "Windows Core Audio is not available on this platform",
        ))
    }
}

impl AudioBackend for UnsupportedBackend {
    type Control = UnsupportedBackend;

    fn enumerate_endpoints(
        &self,
        _flow: DataFlow,
        _include_inactive: bool,
    ) -> Result<Vec<AudioDevice>, AudioError> {
        match *self {}
    }

    fn open_volume_control(&self, _device: &AudioDevice) -> Result<Self, AudioError> {
        match *self {}
    }
}

impl VolumeControl for UnsupportedBackend {
    fn volume(&self) -> Result<f32, AudioError> {
        match *self {}
    }

    fn set_volume(&self, _level: f32) -> Result<(), AudioError> {
        match *self {}
    }

    fn mute(&self) -> Result<bool, AudioError> {
        match *self {}
    }

    fn set_mute(&self, _muted: bool) -> Result<(), AudioError> {
        match *self {}
    }
}

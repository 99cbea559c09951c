//! Volume control using IAudioEndpointVolume.

use super::backend::VolumeControl;
use super::device::AudioError;
use windows::Win32::Media::Audio::{Endpoints::IAudioEndpointVolume, IMMDevice};
use windows::Win32::System::Com::CLSCTX_ALL;

/// Activated IAudioEndpointVolume for one device.
pub struct EndpointVolume {
    endpoint_volume: IAudioEndpointVolume,
}

impl EndpointVolume {
    pub fn new(device: &IMMDevice) -> Result<Self, AudioError> {
        unsafe {
            let endpoint_volume: IAudioEndpointVolume = device
                .Activate(CLSCTX_ALL, None)
                .map_err(|e| AudioError::native("Activate(IAudioEndpointVolume)", e))?;

            Ok(Self { endpoint_volume })
        }
    }
}

impl VolumeControl for EndpointVolume {
    fn volume(&self) -> Result<f32, AudioError> {
        unsafe {
            self.endpoint_volume
                .GetMasterVolumeLevelScalar()
                .map_err(|e| AudioError::native("GetMasterVolumeLevelScalar", e))
        }
    }

    fn set_volume(&self, level: f32) -> Result<(), AudioError> {
        unsafe {
            self.endpoint_volume
                .SetMasterVolumeLevelScalar(level, std::ptr::null())
                .map_err(|e| AudioError::native("SetMasterVolumeLevelScalar", e))
        }
    }

    fn mute(&self) -> Result<bool, AudioError> {
        unsafe {
            let muted = self
                .endpoint_volume
                .GetMute()
                .map_err(|e| AudioError::native("GetMute", e))?;
            Ok(muted.as_bool())
        }
    }

    fn set_mute(&self, muted: bool) -> Result<(), AudioError> {
        unsafe {
            self.endpoint_volume
                .SetMute(muted, std::ptr::null())
                .map_err(|e| AudioError::native("SetMute", e))
        }
    }
}

//! Audio device data models.
//!
//! Defines the records produced by endpoint enumeration, the volume state
//! read from a device, and the audio error taxonomy.

use thiserror::Error;

/// Boxed error from the underlying platform call.
pub type NativeError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An audio endpoint device as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDevice {
    /// Unique Windows device ID (opaque string from IMMDevice::GetId)
    pub id: String,

    /// Human-readable device name, `None` if the property store had none
    pub name: Option<String>,

    /// Endpoint GUID property, falls back to `id` when absent
    pub endpoint_id: String,

    /// Current device state
    pub state: DeviceState,

    /// Playback or recording endpoint
    pub flow: DataFlow,
}

impl AudioDevice {
    /// Create an active device whose endpoint ID equals its device ID.
    pub fn new(id: impl Into<String>, name: impl Into<String>, flow: DataFlow) -> Self {
        let id = id.into();
        Self {
            endpoint_id: id.clone(),
            id,
            name: Some(name.into()),
            state: DeviceState::Active,
            flow,
        }
    }

    /// Friendly name for display.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Case-insensitive substring match against the friendly name.
    ///
    /// Devices without a readable name never match.
    pub fn matches(&self, filter: &str) -> bool {
        match &self.name {
            Some(name) => name.to_lowercase().contains(&filter.to_lowercase()),
            None => false,
        }
    }
}

/// Windows device state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// Device is active and available for use
    Active,

    /// Device is disabled in Windows Sound settings
    Disabled,

    /// Device is not present (driver issue)
    NotPresent,

    /// Device is unplugged (for pluggable devices)
    Unplugged,
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DeviceState::Active => "active",
            DeviceState::Disabled => "disabled",
            DeviceState::NotPresent => "not present",
            DeviceState::Unplugged => "unplugged",
        };
        f.write_str(label)
    }
}

/// Endpoint direction (maps to Windows EDataFlow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataFlow {
    /// Playback endpoints (speakers, headphones)
    Render,

    /// Recording endpoints (microphones)
    Capture,

    /// Both directions
    #[default]
    All,
}

impl DataFlow {
    /// Whether a device with direction `other` belongs to this selection.
    pub fn includes(self, other: DataFlow) -> bool {
        self == DataFlow::All || self == other
    }
}

/// Volume and mute state of a single device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeState {
    /// Volume level as scalar (0.0 to 1.0)
    pub level: f32,

    /// Current mute state
    pub muted: bool,
}

impl VolumeState {
    /// Volume as percentage (0-100).
    pub fn percent(&self) -> u8 {
        Self::percent_of(self.level)
    }

    /// Convert a scalar level to a whole percentage, halves to even.
    pub fn percent_of(level: f32) -> u8 {
        (level.clamp(0.0, 1.0) * 100.0).round_ties_even() as u8
    }
}

/// Audio service error types.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio subsystem unavailable: {0}")]
    InitializationFailed(#[source] NativeError),

    #[error("device not found: {0}")]
    DeviceNotFound(String),

    #[error("{operation} failed: {source}")]
    NativeApi {
        operation: &'static str,
        #[source]
        source: NativeError,
    },
}

impl AudioError {
    /// Wrap a platform failure with the name of the call that produced it.
    pub fn native(operation: &'static str, source: impl Into<NativeError>) -> Self {
        AudioError::NativeApi {
            operation,
            source: source.into(),
        }
    }

    /// Wrap a failure to bring up the audio subsystem.
    pub fn init(source: impl Into<NativeError>) -> Self {
        AudioError::InitializationFailed(source.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_case_insensitive() {
        let device = AudioDevice::new("{0.0.0}.{a}", "Speakers (Realtek)", DataFlow::Render);
        assert!(device.matches("Speak"));
        assert!(device.matches("speakers"));
        assert!(device.matches("REALTEK"));
        assert!(!device.matches("Headphones"));
    }

    #[test]
    fn test_unnamed_device_never_matches() {
        let mut device = AudioDevice::new("{0.0.0}.{a}", "ignored", DataFlow::Render);
        device.name = None;
        assert!(!device.matches(""));
        assert_eq!(device.display_name(), "Unknown");
    }

    #[test]
    fn test_flow_selection() {
        assert!(DataFlow::All.includes(DataFlow::Capture));
        assert!(DataFlow::Render.includes(DataFlow::Render));
        assert!(!DataFlow::Render.includes(DataFlow::Capture));
    }

    #[test]
    fn test_percent_rounds() {
        let state = VolumeState { level: 0.6, muted: false };
        assert_eq!(state.percent(), 60);
        let state = VolumeState { level: 0.996, muted: true };
        assert_eq!(state.percent(), 100);
    }

    #[test]
    fn test_percent_half_rounds_to_even() {
        assert_eq!(VolumeState::percent_of(0.125), 12);
        assert_eq!(VolumeState::percent_of(0.375), 38);
    }

    #[test]
    fn test_error_messages() {
        let err = AudioError::DeviceNotFound("Nonexistent".to_string());
        assert_eq!(err.to_string(), "device not found: Nonexistent");

        let err = AudioError::native("GetMute", "device removed");
        assert_eq!(err.to_string(), "GetMute failed: device removed");
    }
}

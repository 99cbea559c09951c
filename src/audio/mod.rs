//! Audio module for Windows Core Audio API interactions.
//!
//! The resolver and volume controller work against the [`AudioBackend`]
//! traits; the Core Audio implementation is only built on Windows.

pub mod backend;
pub mod device;
pub mod resolver;
pub mod volume;

#[cfg(windows)]
pub mod endpoint;
#[cfg(windows)]
pub mod enumerator;
#[cfg(not(windows))]
pub mod unsupported;

#[cfg(test)]
pub(crate) mod memory;

pub use backend::{AudioBackend, VolumeControl};
pub use device::{AudioDevice, AudioError, DataFlow, DeviceState, NativeError, VolumeState};
#[cfg(windows)]
pub use enumerator::DeviceEnumerator;
pub use resolver::DeviceResolver;
#[cfg(not(windows))]
pub use unsupported::UnsupportedBackend;
pub use volume::{apply_delta, VolumeController};

/// Backend for the host platform.
#[cfg(windows)]
pub type SystemBackend = DeviceEnumerator;
#[cfg(not(windows))]
pub type SystemBackend = UnsupportedBackend;

/// Bring up the host audio subsystem.
pub fn open_system_backend() -> Result<SystemBackend, AudioError> {
    SystemBackend::new()
}

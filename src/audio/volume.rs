//! Volume and mute control for a resolved device.

use super::backend::VolumeControl;
use super::device::{AudioError, VolumeState};
use tracing::debug;

/// Apply a signed percentage delta to a scalar level, saturating at 0 and 1.
pub fn apply_delta(level: f32, delta_percent: i32) -> f32 {
    (level + delta_percent as f32 / 100.0).clamp(0.0, 1.0)
}

/// Volume controller for a specific device.
pub struct VolumeController<C: VolumeControl> {
    control: C,
}

impl<C: VolumeControl> VolumeController<C> {
    pub fn new(control: C) -> Self {
        Self { control }
    }

    /// Get the current volume level (0.0 to 1.0).
    pub fn get_volume(&self) -> Result<f32, AudioError> {
        self.control.volume()
    }

    /// Set the volume level, clamped to 0.0..=1.0.
    pub fn set_volume(&self, level: f32) -> Result<(), AudioError> {
        let level = level.clamp(0.0, 1.0);
        debug!(level, "setting master volume");
        self.control.set_volume(level)
    }

    /// Shift the volume by `delta_percent` points. Returns the level written.
    ///
    /// Read and write are separate calls; an external change in between is
    /// overwritten.
    pub fn adjust_volume(&self, delta_percent: i32) -> Result<f32, AudioError> {
        let current = self.get_volume()?;
        let new_level = apply_delta(current, delta_percent);
        debug!(current, new_level, delta_percent, "adjusting master volume");
        self.control.set_volume(new_level)?;
        Ok(new_level)
    }

    /// Get the current mute state.
    pub fn get_mute(&self) -> Result<bool, AudioError> {
        self.control.mute()
    }

    /// Set the mute state.
    pub fn set_mute(&self, muted: bool) -> Result<(), AudioError> {
        debug!(muted, "setting mute");
        self.control.set_mute(muted)
    }

    /// Toggle the mute state. Returns the new state.
    pub fn toggle_mute(&self) -> Result<bool, AudioError> {
        let current = self.get_mute()?;
        let new_state = !current;
        self.set_mute(new_state)?;
        Ok(new_state)
    }

    /// Read volume and mute together.
    pub fn state(&self) -> Result<VolumeState, AudioError> {
        Ok(VolumeState {
            level: self.get_volume()?,
            muted: self.get_mute()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::memory::MemoryBackend;
    use crate::audio::{AudioBackend, DataFlow};

    const ID: &str = "{0.0.0.00000000}.{speakers}";

    fn controller(backend: &MemoryBackend) -> VolumeController<impl VolumeControl> {
        let device = backend
            .enumerate_endpoints(DataFlow::All, false)
            .unwrap()
            .remove(0);
        VolumeController::new(backend.open_volume_control(&device).unwrap())
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_apply_delta_clamps() {
        assert!(close(apply_delta(0.5, 10), 0.6));
        assert!(close(apply_delta(0.8, 50), 1.0));
        assert!(close(apply_delta(0.03, -5), 0.0));
        assert!(close(apply_delta(0.5, -500), 0.0));
        assert!(close(apply_delta(0.5, 0), 0.5));
    }

    #[test]
    fn test_apply_delta_matches_clamp_formula() {
        for level in [0.0f32, 0.13, 0.5, 0.87, 1.0] {
            for delta in [-150, -37, -1, 0, 1, 42, 99, 200] {
                let expected = (level + delta as f32 / 100.0).clamp(0.0, 1.0);
                assert_eq!(apply_delta(level, delta), expected);
            }
        }
    }

    #[test]
    fn test_adjust_writes_back() {
        let backend = MemoryBackend::new().with_device(ID, "Speakers", 0.5, false);
        let controller = controller(&backend);
        let level = controller.adjust_volume(10).unwrap();
        assert!(close(level, 0.6));
        assert!(close(backend.state_of(ID).unwrap().level, 0.6));
    }

    #[test]
    fn test_set_volume_is_idempotent() {
        let backend = MemoryBackend::new().with_device(ID, "Speakers", 0.2, false);
        let controller = controller(&backend);
        controller.set_volume(0.42).unwrap();
        let first = controller.get_volume().unwrap();
        controller.set_volume(0.42).unwrap();
        assert_eq!(controller.get_volume().unwrap(), first);
    }

    #[test]
    fn test_set_volume_clamps_input() {
        let backend = MemoryBackend::new().with_device(ID, "Speakers", 0.2, false);
        let controller = controller(&backend);
        controller.set_volume(1.7).unwrap();
        assert_eq!(controller.get_volume().unwrap(), 1.0);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let backend = MemoryBackend::new().with_device(ID, "Speakers", 0.5, false);
        let controller = controller(&backend);
        assert!(controller.toggle_mute().unwrap());
        assert!(!controller.toggle_mute().unwrap());
        assert!(!backend.state_of(ID).unwrap().muted);
    }

    #[test]
    fn test_mute_independent_of_level() {
        let backend = MemoryBackend::new().with_device(ID, "Speakers", 0.0, false);
        let controller = controller(&backend);
        controller.set_mute(true).unwrap();
        let state = controller.state().unwrap();
        assert!(state.muted);
        assert_eq!(state.level, 0.0);
    }

    #[test]
    fn test_write_failure_surfaces() {
        let backend = MemoryBackend::new()
            .with_device(ID, "Speakers", 0.5, false)
            .failing_writes();
        let controller = controller(&backend);
        let err = controller.set_volume(0.3).unwrap_err();
        assert!(matches!(err, AudioError::NativeApi { .. }));
        assert!(close(backend.state_of(ID).unwrap().level, 0.5));
    }
}

//! In-memory backend used by unit tests.

use super::backend::{AudioBackend, VolumeControl};
use super::device::{AudioDevice, AudioError, DataFlow, DeviceState, VolumeState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct Endpoint {
    device: AudioDevice,
    state: Rc<RefCell<VolumeState>>,
}

/// Fake endpoint list with shared, inspectable volume state.
#[derive(Default)]
pub struct MemoryBackend {
    endpoints: Vec<Endpoint>,
    native_calls: Rc<Cell<usize>>,
    fail_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an active render device.
    pub fn with_device(self, id: &str, name: &str, level: f32, muted: bool) -> Self {
        self.with_endpoint(AudioDevice::new(id, name, DataFlow::Render), level, muted)
    }

    pub fn with_endpoint(mut self, device: AudioDevice, level: f32, muted: bool) -> Self {
        self.endpoints.push(Endpoint {
            device,
            state: Rc::new(RefCell::new(VolumeState { level, muted })),
        });
        self
    }

    /// Make every set call fail as if the device had been unplugged.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Current state of the device with the given ID.
    pub fn state_of(&self, id: &str) -> Option<VolumeState> {
        self.endpoints
            .iter()
            .find(|e| e.device.id == id)
            .map(|e| *e.state.borrow())
    }

    /// Number of backend calls made so far.
    pub fn native_calls(&self) -> usize {
        self.native_calls.get()
    }

    fn record_call(&self) {
        self.native_calls.set(self.native_calls.get() + 1);
    }
}

impl AudioBackend for MemoryBackend {
    type Control = MemoryControl;

    fn enumerate_endpoints(
        &self,
        flow: DataFlow,
        include_inactive: bool,
    ) -> Result<Vec<AudioDevice>, AudioError> {
        self.record_call();
        Ok(self
            .endpoints
            .iter()
            .map(|e| &e.device)
            .filter(|d| flow.includes(d.flow))
            .filter(|d| include_inactive || d.state == DeviceState::Active)
            .cloned()
            .collect())
    }

    fn open_volume_control(&self, device: &AudioDevice) -> Result<MemoryControl, AudioError> {
        self.record_call();
        let endpoint = self
            .endpoints
            .iter()
            .find(|e| e.device.id == device.id)
            .ok_or_else(|| AudioError::native("Activate", "no such endpoint"))?;

        Ok(MemoryControl {
            state: Rc::clone(&endpoint.state),
            calls: Rc::clone(&self.native_calls),
            fail_writes: self.fail_writes,
        })
    }
}

pub struct MemoryControl {
    state: Rc<RefCell<VolumeState>>,
    calls: Rc<Cell<usize>>,
    fail_writes: bool,
}

impl MemoryControl {
    fn record_call(&self) {
        self.calls.set(self.calls.get() + 1);
    }

    fn check_write(&self, operation: &'static str) -> Result<(), AudioError> {
        if self.fail_writes {
            Err(AudioError::native(operation, "device disconnected"))
        } else {
            Ok(())
        }
    }
}

impl VolumeControl for MemoryControl {
    fn volume(&self) -> Result<f32, AudioError> {
        self.record_call();
        Ok(self.state.borrow().level)
    }

    fn set_volume(&self, level: f32) -> Result<(), AudioError> {
        self.record_call();
        self.check_write("SetMasterVolumeLevelScalar")?;
        self.state.borrow_mut().level = level;
        Ok(())
    }

    fn mute(&self) -> Result<bool, AudioError> {
        self.record_call();
        Ok(self.state.borrow().muted)
    }

    fn set_mute(&self, muted: bool) -> Result<(), AudioError> {
        self.record_call();
        self.check_write("SetMute")?;
        self.state.borrow_mut().muted = muted;
        Ok(())
    }
}

//! Device enumeration using Windows MMDevice API.
//!
//! Provides COM initialization and the Core Audio implementation of
//! [`AudioBackend`].

use super::backend::AudioBackend;
use super::device::{AudioDevice, AudioError, DataFlow, DeviceState};
use super::endpoint::EndpointVolume;
use tracing::{debug, warn};
use windows::core::{Interface, GUID, PCWSTR, PWSTR};
use windows::Win32::Media::Audio::{
    eAll, eCapture, eRender, EDataFlow, IMMDevice, IMMDeviceEnumerator, IMMEndpoint,
    MMDeviceEnumerator, DEVICE_STATE, DEVICE_STATEMASK_ALL, DEVICE_STATE_ACTIVE,
    DEVICE_STATE_DISABLED, DEVICE_STATE_NOTPRESENT, DEVICE_STATE_UNPLUGGED,
};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoTaskMemFree, CoUninitialize, CLSCTX_ALL,
    COINIT_APARTMENTTHREADED, STGM,
};
use windows::Win32::UI::Shell::PropertiesSystem::{IPropertyStore, PROPERTYKEY};

const PKEY_DEVICE_FRIENDLY_NAME: PROPERTYKEY = PROPERTYKEY {
    fmtid: GUID::from_u128(0xa45c254e_df1c_4efd_8020_67d146a850e0),
    pid: 14,
};

const PKEY_AUDIO_ENDPOINT_GUID: PROPERTYKEY = PROPERTYKEY {
    fmtid: GUID::from_u128(0x1da5d803_d492_4edd_8c23_e0c0ffee7f0e),
    pid: 4,
};

/// COM initialization guard that uninitializes COM on drop.
pub struct ComGuard {
    initialized: bool,
}

impl ComGuard {
    /// Initialize COM for the current thread.
    pub fn new() -> Result<Self, AudioError> {
        unsafe {
            CoInitializeEx(None, COINIT_APARTMENTTHREADED)
                .ok()
                .map_err(AudioError::init)?;
        }
        Ok(Self { initialized: true })
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        if self.initialized {
            unsafe {
                CoUninitialize();
            }
        }
    }
}

/// String allocated by COM, freed with CoTaskMemFree on drop.
struct CoTaskString(PWSTR);

impl CoTaskString {
    fn read(&self) -> Result<String, AudioError> {
        unsafe { self.0.to_string() }.map_err(|e| AudioError::native("GetId", e))
    }
}

impl Drop for CoTaskString {
    fn drop(&mut self) {
        unsafe {
            CoTaskMemFree(Some(self.0.as_ptr() as *const _));
        }
    }
}

/// Device enumerator using Windows MMDevice API.
pub struct DeviceEnumerator {
    enumerator: IMMDeviceEnumerator,
    // Declared last so COM outlives the enumerator.
    _com: ComGuard,
}

impl DeviceEnumerator {
    /// Initialize COM and create the MMDevice enumerator.
    pub fn new() -> Result<Self, AudioError> {
        let com = ComGuard::new()?;
        let enumerator: IMMDeviceEnumerator =
            unsafe { CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL) }
                .map_err(AudioError::init)?;

        Ok(Self {
            enumerator,
            _com: com,
        })
    }

    /// Convert an IMMDevice to an AudioDevice.
    fn describe(&self, device: &IMMDevice) -> Result<AudioDevice, AudioError> {
        unsafe {
            let id = device.GetId().map_err(|e| AudioError::native("GetId", e))?;
            let id = CoTaskString(id).read()?;

            let state = device
                .GetState()
                .map_err(|e| AudioError::native("GetState", e))?;

            let flow = device
                .cast::<IMMEndpoint>()
                .and_then(|endpoint| endpoint.GetDataFlow())
                .map_err(|e| AudioError::native("GetDataFlow", e))?;

            let props: IPropertyStore = device
                .OpenPropertyStore(STGM(0)) // STGM_READ
                .map_err(|e| AudioError::native("OpenPropertyStore", e))?;

            let name = read_string(&props, &PKEY_DEVICE_FRIENDLY_NAME);
            let endpoint_id =
                read_string(&props, &PKEY_AUDIO_ENDPOINT_GUID).unwrap_or_else(|| id.clone());

            Ok(AudioDevice {
                id,
                name,
                endpoint_id,
                state: device_state(state),
                flow: data_flow(flow),
            })
        }
    }
}

impl AudioBackend for DeviceEnumerator {
    type Control = EndpointVolume;

    fn enumerate_endpoints(
        &self,
        flow: DataFlow,
        include_inactive: bool,
    ) -> Result<Vec<AudioDevice>, AudioError> {
        unsafe {
            let collection = self
                .enumerator
                .EnumAudioEndpoints(edataflow(flow), state_mask(include_inactive))
                .map_err(|e| AudioError::native("EnumAudioEndpoints", e))?;

            let count = collection
                .GetCount()
                .map_err(|e| AudioError::native("GetCount", e))?;
            debug!(count, ?flow, include_inactive, "enumerated endpoints");

            let mut devices = Vec::with_capacity(count as usize);

            for i in 0..count {
                let device = match collection.Item(i) {
                    Ok(d) => d,
                    Err(e) => {
                        warn!(index = i, error = %e, "skipping unreadable endpoint");
                        continue;
                    }
                };

                match self.describe(&device) {
                    Ok(d) => devices.push(d),
                    Err(e) => warn!(index = i, error = %e, "skipping endpoint"),
                }
            }

            Ok(devices)
        }
    }

    fn open_volume_control(&self, device: &AudioDevice) -> Result<EndpointVolume, AudioError> {
        let device_id_wide: Vec<u16> =
            device.id.encode_utf16().chain(std::iter::once(0)).collect();

        let mm_device = unsafe {
            self.enumerator
                .GetDevice(PCWSTR::from_raw(device_id_wide.as_ptr()))
        }
        .map_err(|e| AudioError::native("GetDevice", e))?;

        EndpointVolume::new(&mm_device)
    }
}

/// Read a string property, `None` when missing or empty.
fn read_string(props: &IPropertyStore, key: &PROPERTYKEY) -> Option<String> {
    let value = unsafe { props.GetValue(key) }.ok()?;
    let s = value.to_string();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn state_mask(include_inactive: bool) -> DEVICE_STATE {
    if include_inactive {
        DEVICE_STATE(DEVICE_STATEMASK_ALL)
    } else {
        DEVICE_STATE_ACTIVE
    }
}

fn edataflow(flow: DataFlow) -> EDataFlow {
    match flow {
        DataFlow::Render => eRender,
        DataFlow::Capture => eCapture,
        DataFlow::All => eAll,
    }
}

fn data_flow(flow: EDataFlow) -> DataFlow {
    if flow == eCapture {
        DataFlow::Capture
    } else {
        DataFlow::Render
    }
}

fn device_state(state: DEVICE_STATE) -> DeviceState {
    if state == DEVICE_STATE_ACTIVE {
        DeviceState::Active
    } else if state == DEVICE_STATE_DISABLED {
        DeviceState::Disabled
    } else if state == DEVICE_STATE_NOTPRESENT {
        DeviceState::NotPresent
    } else if state == DEVICE_STATE_UNPLUGGED {
        DeviceState::Unplugged
    } else {
        DeviceState::NotPresent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_mask() {
        assert_eq!(state_mask(false), DEVICE_STATE_ACTIVE);
        assert_eq!(state_mask(true).0, DEVICE_STATEMASK_ALL);
        assert_eq!(state_mask(true).0 & DEVICE_STATE_UNPLUGGED.0, DEVICE_STATE_UNPLUGGED.0);
    }

    #[test]
    fn test_device_state_mapping() {
        assert_eq!(device_state(DEVICE_STATE_ACTIVE), DeviceState::Active);
        assert_eq!(device_state(DEVICE_STATE_DISABLED), DeviceState::Disabled);
        assert_eq!(device_state(DEVICE_STATE_UNPLUGGED), DeviceState::Unplugged);
    }
}

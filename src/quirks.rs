//! Model quirk detection for touchpads and pointing sticks.
//!
//! Each detector looks at one kind of device and reports a [`Detection`]. [`record`] is the one
//! place that turns detections into emitted [`Quirk`]s; everything that isn't a finding is logged
//! and otherwise ignored, so a broken property on one device never stops the other detectors.

use std::{error::Error, fmt};

use crate::{
    Bus, InputId,
    bits::BitSet,
    event::{Abs, InputProp},
    scan,
    udev::DeviceInfo,
};

/// Name prefix of ALPS touchpads and pointing sticks driven by `psmouse`.
const ALPS_NAME: &str = "AlpsPS/2 ALPS";
/// Substring of Synaptics touchpad names. The trailing space keeps out near-matches.
const SYNAPTICS_NAME: &str = "Synaptics ";

/// A model quirk, printed as a udev property assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quirk {
    /// The touchpad firmware version, taken from the version field of the device ID.
    FirmwareVersion(u16),
    /// The touchpad has the jumping-cursor bug of semi-multitouch Synaptics PS/2 devices.
    JumpingSemiMt,
    /// The kernel applied `fuzz` to `axis`; it has since been reset to 0.
    Fuzz { axis: Abs, fuzz: i32 },
}

impl fmt::Display for Quirk {
    /// Formats the quirk as a `KEY=VALUE` line (without the newline).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quirk::FirmwareVersion(version) => {
                write!(f, "LIBINPUT_MODEL_FIRMWARE_VERSION={version:x}")
            }
            Quirk::JumpingSemiMt => f.write_str("LIBINPUT_MODEL_JUMPING_SEMI_MT=1"),
            Quirk::Fuzz { axis, fuzz } => write!(f, "LIBINPUT_FUZZ_{:02x}={fuzz}", axis.raw()),
        }
    }
}

/// The outcome of running one detector on a device.
#[derive(Debug)]
pub enum Detection {
    /// The device has the quirk.
    Found(Quirk),
    /// The device is fine, or the detector doesn't apply to it.
    NotApplicable,
    /// A property the detector needs is missing or unparsable.
    Malformed(Malformed),
}

/// A device property that a detector could not use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformed {
    property: &'static str,
    value: Option<String>,
}

impl Malformed {
    fn missing(property: &'static str) -> Self {
        Self {
            property,
            value: None,
        }
    }

    fn invalid(property: &'static str, value: &str) -> Self {
        Self {
            property,
            value: Some(value.to_string()),
        }
    }

    /// Returns the name of the offending property.
    pub fn property(&self) -> &'static str {
        self.property
    }
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "property {} has invalid value '{value}'", self.property),
            None => write!(f, "property {} is missing", self.property),
        }
    }
}

impl Error for Malformed {}

/// Adds the quirk found by `detector` to `out`, or logs why there is none.
pub fn record(detector: &str, detection: Detection, out: &mut Vec<Quirk>) {
    match detection {
        Detection::Found(quirk) => {
            log::debug!("{detector}: {quirk}");
            out.push(quirk);
        }
        Detection::NotApplicable => log::trace!("{detector}: not applicable"),
        Detection::Malformed(e) => log::debug!("{detector}: ignoring device: {e}"),
    }
}

fn product_id<D: DeviceInfo>(device: &D) -> Result<InputId, Malformed> {
    let product = device
        .resolve("PRODUCT")
        .ok_or_else(|| Malformed::missing("PRODUCT"))?;
    product
        .parse()
        .map_err(|_| Malformed::invalid("PRODUCT", &product))
}

/// Reports the firmware version of an ALPS device.
///
/// A version of 0 means the device didn't report one.
pub fn alps_firmware_version<D: DeviceInfo>(device: &D) -> Detection {
    let id = match product_id(device) {
        Ok(id) => id,
        Err(e) => return Detection::Malformed(e),
    };

    match id.version() {
        0 => Detection::NotApplicable,
        version => Detection::Found(Quirk::FirmwareVersion(version)),
    }
}

/// Detects the semi-multitouch Synaptics PS/2 touchpad whose reported position jumps.
///
/// Only the PS/2 Synaptics ID `0002:0007` is affected. `PROP` is only looked at for that ID.
pub fn synaptics_jumping_semi_mt<D: DeviceInfo>(device: &D) -> Detection {
    let id = match product_id(device) {
        Ok(id) => id,
        Err(e) => return Detection::Malformed(e),
    };
    if id.bus() != Bus::I8042 || id.vendor() != 0x2 || id.product() != 0x7 {
        return Detection::NotApplicable;
    }

    let props = match input_props(device) {
        Ok(props) => props,
        Err(e) => return Detection::Malformed(e),
    };
    if props.contains(InputProp::SEMI_MT) {
        Detection::Found(Quirk::JumpingSemiMt)
    } else {
        Detection::NotApplicable
    }
}

/// Parses the `PROP` property, the device's [`InputProp`] bitmap in hex.
///
/// The kernel prints bitmaps as space-separated words, but there are only 32 property bits, so
/// `PROP` is a single word.
fn input_props<D: DeviceInfo>(device: &D) -> Result<BitSet<InputProp>, Malformed> {
    let value = device.resolve("PROP").ok_or_else(|| Malformed::missing("PROP"))?;
    let word = scan::hex(&value)
        .and_then(|(word, _)| word.try_into().ok())
        .ok_or_else(|| Malformed::invalid("PROP", &value))?;
    Ok(BitSet::from_first_word(word))
}

/// Runs the detectors for touchpads.
pub fn touchpad<D: DeviceInfo>(device: &D, out: &mut Vec<Quirk>) {
    let Some(name) = device.resolve("NAME") else {
        log::debug!("touchpad has no NAME");
        return;
    };

    if name.contains(ALPS_NAME) {
        record("alps", alps_firmware_version(device), out);
    }
    if name.contains(SYNAPTICS_NAME) {
        record("synaptics", synaptics_jumping_semi_mt(device), out);
    }
}

/// Runs the detectors for pointing sticks.
pub fn pointing_stick<D: DeviceInfo>(device: &D, out: &mut Vec<Quirk>) {
    let Some(name) = device.resolve("NAME") else {
        log::debug!("pointing stick has no NAME");
        return;
    };

    if name.contains(ALPS_NAME) {
        record("alps", alps_firmware_version(device), out);
    }
}

/// Returns whether a udev class property like `ID_INPUT_TOUCHPAD` is set.
pub fn is_truthy(value: Option<&str>) -> bool {
    matches!(value, Some(value) if !value.is_empty() && value != "0")
}

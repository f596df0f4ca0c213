//! Axis fuzz normalization.
//!
//! Some touchpad firmware asks the kernel for a fuzz value on the position axes. The kernel then
//! drops every motion smaller than the fuzz, which makes slow finger movement stall. The fuzz is
//! moved out of the kernel: it is reported as a `LIBINPUT_FUZZ_*` property for userspace to apply
//! its own (smarter) filtering, and reset to 0 in the kernel.

use std::{io, path::Path};

use crate::{
    AbsInfo, Evdev,
    bits::BitSet,
    event::{Abs, EventType},
    quirks::Quirk,
    udev::DeviceInfo,
};

/// The axes whose fuzz is moved to userspace.
pub const AXES: [Abs; 4] = [Abs::X, Abs::Y, Abs::MT_POSITION_X, Abs::MT_POSITION_Y];

/// Absolute axis calibration access, as provided by an evdev node.
pub trait AxisDevice {
    fn supported_events(&self) -> io::Result<BitSet<EventType>>;
    fn abs_info(&self, abs: Abs) -> io::Result<AbsInfo>;
    fn set_abs_info(&self, abs: Abs, info: AbsInfo) -> io::Result<()>;
}

impl AxisDevice for Evdev {
    fn supported_events(&self) -> io::Result<BitSet<EventType>> {
        Evdev::supported_events(self)
    }

    fn abs_info(&self, abs: Abs) -> io::Result<AbsInfo> {
        Evdev::abs_info(self, abs)
    }

    fn set_abs_info(&self, abs: Abs, info: AbsInfo) -> io::Result<()> {
        Evdev::set_abs_info(self, abs, info)
    }
}

/// Opens the device node of `device` with `open` and moves the fuzz of its position axes to
/// userspace.
///
/// `open` is normally [`Evdev::open`]. The node is released before this returns.
///
/// Returns a [`Quirk::Fuzz`] for every axis that had a non-zero fuzz. Devices without a node,
/// nodes that can't be opened or aren't evdev nodes, and devices without absolute axes produce
/// nothing. If the node could only be opened read-only, the fuzz is reported but stays in place.
pub fn normalize<D, N, F>(device: &D, open: F) -> Vec<Quirk>
where
    D: DeviceInfo,
    N: AxisDevice,
    F: FnOnce(&Path) -> io::Result<N>,
{
    let Some(devnode) = device.devnode() else {
        log::trace!("{} has no device node", device.syspath().display());
        return Vec::new();
    };

    let node = match open(devnode) {
        Ok(node) => node,
        Err(e) => {
            log::debug!("skipping fuzz normalization: {e}");
            return Vec::new();
        }
    };

    reset_fuzz(&node)
}

/// Resets the fuzz of [`AXES`] on `node` and returns the previous values.
pub fn reset_fuzz<N: AxisDevice>(node: &N) -> Vec<Quirk> {
    match node.supported_events() {
        Ok(events) if events.contains(EventType::ABS) => {}
        Ok(_) => {
            log::trace!("device has no absolute axes");
            return Vec::new();
        }
        Err(e) => {
            log::debug!("skipping fuzz normalization: {e}");
            return Vec::new();
        }
    }

    let mut out = Vec::new();
    for axis in AXES {
        let info = match node.abs_info(axis) {
            Ok(info) => info,
            Err(e) => {
                log::debug!("{axis:?}: {e}");
                continue;
            }
        };
        let fuzz = info.fuzz();
        if fuzz == 0 {
            continue;
        }

        // Fails on read-only nodes. The fuzz is reported either way.
        if let Err(e) = node.set_abs_info(axis, info.with_fuzz(0)) {
            log::debug!("failed to reset fuzz of {axis:?}: {e}");
        }
        out.push(Quirk::Fuzz { axis, fuzz });
    }
    out
}

//! Device database access.
//!
//! Devices are looked up through libudev (the [`udev`] crate). The quirk detectors only see the
//! [`DeviceInfo`] trait, so they can be run against an in-memory device tree as well.

use std::{ffi::OsStr, fmt, io, path::Path};

/// A device in the device database, as seen by the quirk detectors.
pub trait DeviceInfo: Sized {
    /// Returns the absolute sysfs path of the device.
    fn syspath(&self) -> &Path;

    /// Returns the path of the device node in `/dev`, if the device has one.
    fn devnode(&self) -> Option<&Path>;

    /// Returns the value of property `name` of this device, without looking at its parents.
    fn property(&self, name: &str) -> Option<&str>;

    /// Looks up the parent device.
    fn parent(&self) -> Option<Self>;

    /// Returns the first non-empty value of property `name`, starting at this device and walking
    /// up its chain of parents.
    fn resolve(&self, name: &str) -> Option<String> {
        if let Some(value) = non_empty(self.property(name)) {
            return Some(value.to_string());
        }

        let mut current = self.parent();
        while let Some(device) = current {
            if let Some(value) = non_empty(device.property(name)) {
                return Some(value.to_string());
            }
            current = device.parent();
        }
        None
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Looks up devices by their sysfs path.
pub trait Database {
    type Device: DeviceInfo;

    fn device_from_syspath(&self, syspath: &Path) -> io::Result<Self::Device>;
}

/// A libudev context.
///
/// Devices looked up through it hold their own reference to the context.
pub struct Udev {
    context: udev::Udev,
}

impl fmt::Debug for Udev {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Udev").finish_non_exhaustive()
    }
}

impl Udev {
    /// Creates a new libudev context.
    pub fn new() -> io::Result<Self> {
        let context = udev::Udev::new()
            .map_err(|e| io::Error::new(e.kind(), format!("failed to create udev context: {e}")))?;
        Ok(Self { context })
    }
}

impl Database for Udev {
    type Device = udev::Device;

    /// Looks up the device at `syspath`.
    ///
    /// # Errors
    ///
    /// Fails if `syspath` does not name a device in sysfs.
    fn device_from_syspath(&self, syspath: &Path) -> io::Result<udev::Device> {
        udev::Device::from_syspath_with_context(self.context.clone(), syspath).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("no device at '{}': {e}", syspath.display()),
            )
        })
    }
}

impl DeviceInfo for udev::Device {
    fn syspath(&self) -> &Path {
        udev::Device::syspath(self)
    }

    fn devnode(&self) -> Option<&Path> {
        udev::Device::devnode(self)
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.property_value(name).and_then(OsStr::to_str)
    }

    fn parent(&self) -> Option<Self> {
        udev::Device::parent(self)
    }
}

use std::{
    error::Error,
    fmt::{self, LowerHex},
    str::FromStr,
};

use crate::{raw::input::input_id, scan};

/// Input device ID.
///
/// udev publishes it as the `PRODUCT` property of the input device, formatted as
/// `bus/vendor/product/version` in hexadecimal.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct InputId(pub(crate) input_id);

impl InputId {
    /// Creates an [`InputId`] from its components.
    #[inline]
    pub const fn new(bus: Bus, vendor: u16, product: u16, version: u16) -> Self {
        Self(input_id {
            bustype: bus.0,
            vendor,
            product,
            version,
        })
    }

    /// Returns the bus type this device is attached to the system with.
    #[inline]
    pub fn bus(&self) -> Bus {
        Bus(self.0.bustype)
    }

    #[inline]
    pub fn vendor(&self) -> u16 {
        self.0.vendor
    }

    #[inline]
    pub fn product(&self) -> u16 {
        self.0.product
    }

    /// The device or transport version.
    ///
    /// ALPS devices report their firmware version here.
    #[inline]
    pub fn version(&self) -> u16 {
        self.0.version
    }
}

impl FromStr for InputId {
    type Err = ParseProductError;

    /// Parses the value of a `PRODUCT` property.
    ///
    /// Trailing text after the version field is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [bus, vendor, product, version] =
            scan::hex_fields::<4>(s, '/').ok_or(ParseProductError { _p: () })?;
        let field = |v: u64| u16::try_from(v).map_err(|_| ParseProductError { _p: () });
        Ok(Self::new(
            Bus(field(bus)?),
            field(vendor)?,
            field(product)?,
            field(version)?,
        ))
    }
}

impl fmt::Debug for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Hex<T: LowerHex>(T);
        impl<T: LowerHex> fmt::Debug for Hex<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:#06x}", self.0)
            }
        }

        f.debug_struct("InputId")
            .field("bustype", &self.bus())
            .field("vendor", &Hex(self.vendor()))
            .field("product", &Hex(self.product()))
            .field("version", &Hex(self.version()))
            .finish()
    }
}

/// Error returned when a `PRODUCT` value is not of the form `bus/vendor/product/version`.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseProductError {
    _p: (),
}

impl fmt::Display for ParseProductError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected four 16-bit hex fields `bus/vendor/product/version`")
    }
}
impl Error for ParseProductError {}

ffi_enum! {
    /// Bus types that devices can be attached to the system with.
    pub enum Bus: u16 {
        PCI         = 0x01,
        ISAPNP      = 0x02,
        USB         = 0x03,
        HIL         = 0x04,
        BLUETOOTH   = 0x05,
        VIRTUAL     = 0x06,
        ISA         = 0x10,
        /// The PS/2 controller. Legacy laptop touchpads and pointing sticks live here.
        I8042       = 0x11,
        XTKBD       = 0x12,
        RS232       = 0x13,
        GAMEPORT    = 0x14,
        PARPORT     = 0x15,
        AMIGA       = 0x16,
        ADB         = 0x17,
        I2C         = 0x18,
        HOST        = 0x19,
        GSC         = 0x1A,
        ATARI       = 0x1B,
        SPI         = 0x1C,
        RMI         = 0x1D,
        CEC         = 0x1E,
        INTEL_ISHTP = 0x1F,
        AMD_SFH     = 0x20,
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_name() {
            Some(name) => write!(f, "BUS_{name}"),
            None => write!(f, "Bus({:#x})", self.0),
        }
    }
}

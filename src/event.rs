//! Event types, absolute axis codes and device properties.
//!
//! The subset of `linux/input-event-codes.h` that the quirk detectors look at.

use std::fmt;

ffi_enum! {
    /// Input device properties, as reported in the `PROP` uevent variable.
    pub enum InputProp: u8 {
        /// Indicates that the input position on screen should be indicated via a pointer.
        POINTER = 0x00,
        /// Indicates that the device's [`Abs`] axes should be mapped to the screen directly.
        DIRECT = 0x01,
        /// Indicates that the device's touchpad registers button clicks by pressing down on the
        /// surface (rather than having separate physical buttons beneath the touchpad).
        BUTTONPAD = 0x02,
        /// The touchpad only reports the bounding box of all contacts, not each contact.
        ///
        /// Some PS/2 Synaptics touchpads with this property make the reported position jump.
        SEMI_MT = 0x03,
        TOPBUTTONPAD = 0x04,
        POINTING_STICK = 0x05,
        ACCELEROMETER = 0x06,
    }
}
impl InputProp {
    pub(crate) const MAX: Self = Self(0x1f);
}
bitvalue!(InputProp);

impl fmt::Debug for InputProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_name() {
            Some(name) => write!(f, "INPUT_PROP_{name}"),
            None => write!(f, "InputProp({:#x})", self.0),
        }
    }
}

ffi_enum! {
    /// Types of input events a device can emit.
    pub enum EventType: u16 {
        SYN = 0x00,
        KEY = 0x01,
        REL = 0x02,
        /// Absolute axis changes. Only devices with this type have [`AbsInfo`][crate::AbsInfo].
        ABS = 0x03,
        MSC = 0x04,
        SW  = 0x05,
        LED = 0x11,
        SND = 0x12,
        REP = 0x14,
        FF  = 0x15,
        PWR = 0x16,
        FF_STATUS = 0x17,
    }
}
impl EventType {
    pub(crate) const MAX: Self = Self(0x1f);
}
bitvalue!(EventType);

impl fmt::Debug for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_name() {
            Some(name) => write!(f, "EV_{name}"),
            None => write!(f, "EventType({:#x})", self.0),
        }
    }
}

ffi_enum! {
    /// `ABS_*`: An absolute axis identifier.
    pub enum Abs: u16 {
        X              = 0x00,
        Y              = 0x01,
        Z              = 0x02,
        PRESSURE       = 0x18,
        TOOL_WIDTH     = 0x1c,
        /// Changes the active multitouch slot.
        MT_SLOT        = 0x2f,
        MT_TOUCH_MAJOR = 0x30,
        MT_TOUCH_MINOR = 0x31,
        MT_POSITION_X  = 0x35,
        MT_POSITION_Y  = 0x36,
        MT_TRACKING_ID = 0x39,
        MT_PRESSURE    = 0x3a,
    }
}
impl Abs {
    pub(crate) const MAX: Self = Self(0x3f);
}
bitvalue!(Abs);

impl Abs {
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for Abs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_name() {
            Some(name) => write!(f, "ABS_{name}"),
            None => write!(f, "Abs({:#x})", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_repr() {
        assert_eq!(format!("{:?}", InputProp::SEMI_MT), "INPUT_PROP_SEMI_MT");
        assert_eq!(format!("{:?}", InputProp(0xff)), "InputProp(0xff)");

        assert_eq!(format!("{:?}", EventType::ABS), "EV_ABS");
        assert_eq!(format!("{:?}", EventType(0xffff)), "EventType(0xffff)");

        assert_eq!(format!("{:?}", Abs::MT_POSITION_X), "ABS_MT_POSITION_X");
        assert_eq!(format!("{:?}", Abs(0xffff)), "Abs(0xffff)");
    }
}

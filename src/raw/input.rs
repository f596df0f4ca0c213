//! The parts of `linux/input.h` needed to inspect and recalibrate absolute axes.

use std::ffi::{c_int, c_void};

use uoctl::{_IOC, _IOC_READ, _IOR, _IOW, Ioctl};

#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct input_id {
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct input_absinfo {
    pub value: i32,
    pub minimum: i32,
    pub maximum: i32,
    pub fuzz: i32,
    pub flat: i32,
    pub resolution: i32,
}

/// Get driver version.
pub const EVIOCGVERSION: Ioctl<*mut c_int> = _IOR(b'E', 0x01);

pub const fn EVIOCGBIT(ev: u8, len: usize) -> Ioctl<*mut c_void> {
    _IOC(_IOC_READ, b'E', 0x20 + ev, len)
}
pub const fn EVIOCGABS(abs: u8) -> Ioctl<*mut input_absinfo> {
    _IOR(b'E', 0x40 + abs)
}
pub const fn EVIOCSABS(abs: u8) -> Ioctl<*const input_absinfo> {
    _IOW(b'E', 0xc0 + abs)
}

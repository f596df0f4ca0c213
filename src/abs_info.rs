use std::{fmt, mem};

use crate::raw::input::input_absinfo;

#[expect(unused_imports)] // docs only
use crate::event::Abs;

/// Calibration data of an absolute axis ([`Abs`]).
///
/// This is the snapshot read with `EVIOCGABS` and written back with `EVIOCSABS`.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct AbsInfo(pub(crate) input_absinfo);

impl AbsInfo {
    /// Creates a new [`AbsInfo`] with a minimum and maximum value.
    ///
    /// All other fields start out as zero.
    #[inline]
    pub const fn new(minimum: i32, maximum: i32) -> Self {
        Self(input_absinfo {
            minimum,
            maximum,
            ..unsafe { mem::zeroed() }
        })
    }

    /// Returns a copy of `self` with the given fuzz value.
    #[inline]
    pub const fn with_fuzz(mut self, fuzz: i32) -> Self {
        self.0.fuzz = fuzz;
        self
    }

    /// Returns the raw value of the axis, without clamping.
    #[inline]
    pub const fn raw_value(&self) -> i32 {
        self.0.value
    }

    #[inline]
    pub const fn minimum(&self) -> i32 {
        self.0.minimum
    }

    #[inline]
    pub const fn maximum(&self) -> i32 {
        self.0.maximum
    }

    /// Returns the *fuzz* value of the axis.
    ///
    /// The kernel drops axis changes smaller than the fuzz before they reach userspace.
    #[inline]
    pub const fn fuzz(&self) -> i32 {
        self.0.fuzz
    }

    /// Returns the *flat* value of the axis.
    ///
    /// The *flat* value configures the axis deadzone.
    #[inline]
    pub const fn flat(&self) -> i32 {
        self.0.flat
    }

    /// Returns the resolution of this axis, typically in units/mm for the position axes.
    #[inline]
    pub const fn resolution(&self) -> i32 {
        self.0.resolution
    }
}

impl fmt::Debug for AbsInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbsInfo")
            .field("value", &self.raw_value())
            .field("minimum", &self.minimum())
            .field("maximum", &self.maximum())
            .field("fuzz", &self.fuzz())
            .field("flat", &self.flat())
            .field("resolution", &self.resolution())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroing_fuzz_keeps_calibration() {
        let mut info = AbsInfo::new(-100, 3000).with_fuzz(8);
        info.0.flat = 2;
        info.0.resolution = 42;
        let reset = info.with_fuzz(0);
        assert_eq!(reset.fuzz(), 0);
        assert_eq!(reset.minimum(), -100);
        assert_eq!(reset.maximum(), 3000);
        assert_eq!(reset.flat(), 2);
        assert_eq!(reset.resolution(), 42);
    }
}

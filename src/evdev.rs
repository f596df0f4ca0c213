use std::{
    error::Error,
    ffi::{c_int, c_void},
    fmt,
    fs::File,
    io,
    mem::MaybeUninit,
    os::{
        fd::{AsFd, AsRawFd},
        unix::{
            fs::OpenOptionsExt,
            prelude::{BorrowedFd, RawFd},
        },
    },
    path::{Path, PathBuf},
    time::Instant,
};

use uoctl::Ioctl;

use crate::{
    AbsInfo,
    bits::{BitSet, BitValue, Word},
    event::{Abs, EventType},
    raw::input::{EVIOCGABS, EVIOCGBIT, EVIOCGVERSION, EVIOCSABS},
};

/// A handle to an *event device* node.
///
/// Only the capability and axis calibration ioctls are exposed; events are never read.
///
/// The file descriptor is closed when the [`Evdev`] is dropped.
#[derive(Debug)]
pub struct Evdev {
    file: File,
    path: PathBuf,
}

impl AsFd for Evdev {
    #[inline]
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }
}

impl AsRawFd for Evdev {
    #[inline]
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

impl Evdev {
    /// Opens a device node and checks that it speaks the evdev protocol.
    ///
    /// # Permissions
    ///
    /// The node is opened read-write if possible, so that [`Evdev::set_abs_info`] works. If that
    /// fails with [`io::ErrorKind::PermissionDenied`], it is opened read-only instead; the
    /// calibration can then be read, but [`Evdev::set_abs_info`] fails.
    ///
    /// # Errors
    ///
    /// Fails if the node cannot be opened at all, or if it is not an evdev node (for example a
    /// legacy `/dev/input/mouse*` or `/dev/input/js*` device).
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::open_impl(path.as_ref().to_path_buf())
    }

    fn open_impl(path: PathBuf) -> io::Result<Self> {
        let now = Instant::now();

        let (file, writable) = match Self::try_open(&path) {
            Ok(res) => res,
            Err(e) => {
                return Err(io::Error::new(
                    e.kind(),
                    format!("failed to open '{}': {e}", path.display()),
                ));
            }
        };
        let this = Self { file, path };
        let version = this.driver_version()?;
        log::debug!(
            "opened '{}' {} in {:?}; driver version {version:#x}",
            this.path().display(),
            if writable { "read-write" } else { "read-only" },
            now.elapsed(),
        );
        Ok(this)
    }

    fn try_open(path: &Path) -> io::Result<(File, bool)> {
        let mut options = File::options();
        options.read(true).custom_flags(libc::O_NONBLOCK);

        match options.clone().write(true).open(path) {
            Ok(file) => return Ok((file, true)),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                log::debug!(
                    "no permission to open '{}' in read-write mode, retrying in read-only",
                    path.display()
                );
            }
            Err(e) => return Err(e),
        }

        options.open(path).map(|file| (file, false))
    }

    /// Returns the file system path this [`Evdev`] has been opened from.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Executes `ioctl` and adds context to the error.
    unsafe fn ioctl<T>(&self, name: &'static str, ioctl: Ioctl<T>, arg: T) -> io::Result<c_int> {
        match unsafe { ioctl.ioctl(self, arg) } {
            Ok(ok) => Ok(ok),
            Err(e) => {
                #[derive(Debug)]
                struct WrappedError {
                    cause: io::Error,
                    msg: String,
                }

                impl fmt::Display for WrappedError {
                    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str(&self.msg)
                    }
                }
                impl Error for WrappedError {
                    fn source(&self) -> Option<&(dyn Error + 'static)> {
                        Some(&self.cause)
                    }
                }

                let msg = format!(
                    "ioctl {name} failed for device {} ({:?})",
                    self.path().display(),
                    e.kind()
                );
                Err(io::Error::new(e.kind(), WrappedError { cause: e, msg }))
            }
        }
    }

    unsafe fn fetch_bits<V: BitValue>(
        &self,
        ioctl_name: &'static str,
        ioctl: fn(usize) -> Ioctl<*mut c_void>,
    ) -> io::Result<BitSet<V>> {
        let mut set = BitSet::<V>::new();
        let words = set.words_mut();
        unsafe {
            self.ioctl(
                ioctl_name,
                ioctl(words.len() * size_of::<Word>()),
                words.as_mut_ptr().cast(),
            )?;
        };
        Ok(set)
    }

    /// Returns the evdev subsystem version.
    ///
    /// Only evdev nodes answer this, which makes it a cheap check for whether a node is one.
    #[doc(alias = "EVIOCGVERSION")]
    pub fn driver_version(&self) -> io::Result<c_int> {
        unsafe {
            let mut version = 0;
            self.ioctl("EVIOCGVERSION", EVIOCGVERSION, &mut version)?;
            Ok(version)
        }
    }

    /// Returns the set of supported [`EventType`]s.
    #[doc(alias = "EVIOCGBIT")]
    pub fn supported_events(&self) -> io::Result<BitSet<EventType>> {
        unsafe { self.fetch_bits("EVIOCGBIT", |len| EVIOCGBIT(0, len)) }
    }

    /// Returns the calibration of absolute axis `abs`.
    ///
    /// Calling this with an [`Abs`] axis that isn't supported by the device will either return an
    /// error or return a meaningless [`AbsInfo`] object with arbitrary values.
    #[doc(alias = "EVIOCGABS")]
    pub fn abs_info(&self, abs: Abs) -> io::Result<AbsInfo> {
        if abs.0 > Abs::MAX.0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("absolute axis {:?} exceeds maximum axis value", abs),
            ));
        }

        unsafe {
            let mut out = MaybeUninit::uninit();
            self.ioctl("EVIOCGABS", EVIOCGABS(abs.0 as u8), out.as_mut_ptr())?;
            Ok(AbsInfo(out.assume_init()))
        }
    }

    /// Replaces the calibration of absolute axis `abs` in the kernel.
    ///
    /// This changes globally visible device state: every other reader of the device sees the new
    /// values. It fails if the node was opened read-only.
    #[doc(alias = "EVIOCSABS")]
    pub fn set_abs_info(&self, abs: Abs, info: AbsInfo) -> io::Result<()> {
        if abs.0 > Abs::MAX.0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("absolute axis {:?} exceeds maximum axis value", abs),
            ));
        }

        unsafe {
            self.ioctl("EVIOCSABS", EVIOCSABS(abs.raw() as u8), &info.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn open_missing_node() {
        let path = env::temp_dir().join("-@-model-quirks-no-such-node-@-");
        let err = Evdev::open(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("no-such-node"), "{err}");
    }

    #[test]
    fn open_non_evdev() {
        // `/dev/null` opens fine but rejects evdev ioctls.
        let err = Evdev::open("/dev/null").unwrap_err();
        assert!(err.to_string().contains("EVIOCGVERSION"), "{err}");
    }
}

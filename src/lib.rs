#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations)]

#[macro_use]
mod macros;


mod abs_info;
pub mod bits;
mod evdev;
pub mod event;
pub mod fuzz;
mod input_id;
pub mod quirks;
mod raw;
mod scan;
pub mod udev;

pub use abs_info::AbsInfo;
pub use evdev::Evdev;
pub use input_id::{Bus, InputId, ParseProductError};
#[doc(inline)]
pub use quirks::Quirk;

use std::{io, path::Path};

use crate::{
    fuzz::AxisDevice,
    udev::{Database, DeviceInfo},
};

/// Runs every quirk detector that applies to `device`.
///
/// The fuzz of the device's position axes is always normalized, on the node opened with
/// `open_node` (see [`fuzz::normalize`]). The touchpad and pointing stick detectors only run if
/// udev classified the device as one, through the `ID_INPUT_TOUCHPAD` and
/// `ID_INPUT_POINTINGSTICK` properties.
///
/// Quirks are returned in the order they should be printed.
pub fn detect<D, N>(device: &D, open_node: impl FnOnce(&Path) -> io::Result<N>) -> Vec<Quirk>
where
    D: DeviceInfo,
    N: AxisDevice,
{
    let mut out = fuzz::normalize(device, open_node);

    if quirks::is_truthy(device.resolve("ID_INPUT_TOUCHPAD").as_deref()) {
        quirks::touchpad(device, &mut out);
    }
    if quirks::is_truthy(device.resolve("ID_INPUT_POINTINGSTICK").as_deref()) {
        quirks::pointing_stick(device, &mut out);
    }
    out
}

/// Looks up the device at `syspath` and runs [`detect`] on it.
///
/// The database is acquired with `open_database`. The device is released before the database,
/// on every path.
///
/// # Errors
///
/// Fails if the database can't be opened or has no device at `syspath`. Problems with the device
/// itself only mean that fewer quirks are found.
pub fn run<Db, N>(
    open_database: impl FnOnce() -> io::Result<Db>,
    syspath: &Path,
    open_node: impl FnOnce(&Path) -> io::Result<N>,
) -> io::Result<Vec<Quirk>>
where
    Db: Database,
    N: AxisDevice,
{
    let database = open_database()?;
    let device = database.device_from_syspath(syspath)?;
    let quirks = detect(&device, open_node);
    drop(device);
    drop(database);
    Ok(quirks)
}

#[cfg(test)]
mod tests {
    use crate::test::{FakeKernel, FakeNode, FakeTree, NodeFault, touchpad_axes};

    use super::*;

    const INPUT: &str = "/sys/devices/platform/i8042/serio1/input/input5";
    const EVENT: &str = "/sys/devices/platform/i8042/serio1/input/input5/event5";

    fn no_node(_: &Path) -> io::Result<FakeNode> {
        Err(io::Error::from(io::ErrorKind::NotFound))
    }

    fn detect_on(input: &[(&str, &str)], event: &[(&str, &str)]) -> Vec<Quirk> {
        let tree = FakeTree::new();
        tree.device(INPUT, input);
        tree.device(EVENT, event);
        run(|| tree.open(), Path::new(EVENT), no_node).unwrap()
    }

    #[test]
    fn class_gates_detectors() {
        let alps = [
            ("NAME", "\"AlpsPS/2 ALPS DualPoint Stick\""),
            ("PRODUCT", "0011/0002/0008/0800"),
        ];
        let version = [Quirk::FirmwareVersion(0x800)];

        assert_eq!(detect_on(&alps, &[("ID_INPUT", "1")]), Vec::<Quirk>::new());
        assert_eq!(
            detect_on(&alps, &[("ID_INPUT", "1"), ("ID_INPUT_TOUCHPAD", "0")]),
            Vec::<Quirk>::new()
        );
        assert_eq!(
            detect_on(&alps, &[("ID_INPUT", "1"), ("ID_INPUT_POINTINGSTICK", "1")]),
            version
        );
        assert_eq!(
            detect_on(&alps, &[("ID_INPUT", "1"), ("ID_INPUT_TOUCHPAD", "1")]),
            version
        );
    }

    #[test]
    fn synaptics_only_for_touchpads() {
        let synaptics = [
            ("NAME", "\"SynPS/2 Synaptics TouchPad\""),
            ("PRODUCT", "0011/0002/0007/01b1"),
            ("PROP", "9"),
        ];
        assert_eq!(
            detect_on(&synaptics, &[("ID_INPUT_TOUCHPAD", "1")]),
            [Quirk::JumpingSemiMt]
        );
        assert_eq!(
            detect_on(&synaptics, &[("ID_INPUT_POINTINGSTICK", "1")]),
            Vec::<Quirk>::new()
        );
    }

    #[test]
    fn fuzz_lines_come_first() -> io::Result<()> {
        let tree = FakeTree::new();
        tree.device(
            INPUT,
            &[
                ("NAME", "\"AlpsPS/2 ALPS DualPoint TouchPad\""),
                ("PRODUCT", "11/2/8/1f"),
            ],
        );
        tree.device(
            EVENT,
            &[("DEVNAME", "input/event5"), ("ID_INPUT_TOUCHPAD", "1")],
        );
        let kernel = FakeKernel::with_axes(&touchpad_axes(8));

        let quirks = run(
            || tree.open(),
            Path::new(EVENT),
            |_| kernel.open(NodeFault::None, true),
        )?;
        let lines: Vec<String> = quirks.iter().map(Quirk::to_string).collect();
        assert_eq!(
            lines,
            [
                "LIBINPUT_FUZZ_00=8",
                "LIBINPUT_FUZZ_35=8",
                "LIBINPUT_MODEL_FIRMWARE_VERSION=1f",
            ]
        );
        Ok(())
    }

    /// Where a simulated invocation fails.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Fault {
        Context,
        Device,
        Node(NodeFault),
    }

    const FAULTS: [Fault; 8] = [
        Fault::Context,
        Fault::Device,
        Fault::Node(NodeFault::None),
        Fault::Node(NodeFault::Open),
        Fault::Node(NodeFault::Capabilities),
        Fault::Node(NodeFault::NoAbs),
        Fault::Node(NodeFault::GetAbs),
        Fault::Node(NodeFault::SetAbs),
    ];

    #[test]
    fn release_exactly_once() {
        let tree = FakeTree::new();
        tree.device(
            INPUT,
            &[
                ("NAME", "\"SynPS/2 Synaptics TouchPad\""),
                ("PRODUCT", "0011/0002/0007/01b1"),
                ("PROP", "9"),
            ],
        );
        tree.device(
            EVENT,
            &[("DEVNAME", "input/event5"), ("ID_INPUT_TOUCHPAD", "1")],
        );
        let kernel = FakeKernel::with_axes(&[]);

        let mut expected_opens = 0;
        for i in 0..1000 {
            let fault = FAULTS[i % FAULTS.len()];
            let writable = i % 7 != 0;
            let fuzz = (i % 4) as i32;
            kernel.set_axes(&touchpad_axes(fuzz));

            let node_fault = match fault {
                Fault::Node(node_fault) => node_fault,
                Fault::Context | Fault::Device => NodeFault::None,
            };
            if matches!(fault, Fault::Node(f) if f != NodeFault::Open) {
                expected_opens += 1;
            }
            let syspath = match fault {
                Fault::Device => Path::new("/sys/devices/-@-model-quirks-missing-@-"),
                _ => Path::new(EVENT),
            };

            let result = run(
                || match fault {
                    Fault::Context => Err(io::Error::other("no context")),
                    _ => tree.open(),
                },
                syspath,
                |path| {
                    assert_eq!(path, Path::new("/dev/input/event5"));
                    kernel.open(node_fault, writable)
                },
            );

            assert_eq!(tree.live_contexts(), 0, "leaked context ({fault:?})");
            assert_eq!(tree.live_devices(), 0, "leaked device ({fault:?})");
            assert_eq!(kernel.live_handles(), 0, "leaked node ({fault:?})");
            assert_eq!(kernel.opened(), kernel.closed());
            assert_eq!(kernel.opened(), expected_opens, "iteration {i} ({fault:?})");

            let fuzz_lines = match fault {
                Fault::Node(NodeFault::None | NodeFault::SetAbs) if fuzz != 0 => 2,
                _ => 0,
            };
            match (fault, result) {
                (Fault::Context | Fault::Device, Err(_)) => {}
                (Fault::Node(_), Ok(quirks)) => {
                    assert_eq!(quirks.len(), fuzz_lines + 1, "iteration {i} ({fault:?})");
                    assert_eq!(quirks.last(), Some(&Quirk::JumpingSemiMt));
                }
                (fault, result) => panic!("iteration {i} ({fault:?}): unexpected {result:?}"),
            }
        }
    }
}

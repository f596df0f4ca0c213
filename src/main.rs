//! Prints the model quirks of one input device as udev properties.
//!
//! Meant to be run from a udev rule like
//!
//! ```text
//! KERNEL=="event*", IMPORT{program}="libinput-model-quirks %S%p"
//! ```
//!
//! Every line printed on stdout is a `KEY=VALUE` property assignment. Diagnostics go to stderr
//! and are off unless enabled with `RUST_LOG`.

use std::{
    env,
    io::{self, Write as _},
    path::Path,
    process::ExitCode,
};

use model_quirks::{Evdev, udev::Udev};

fn main() -> ExitCode {
    env_logger::init();

    let syspath = match &*env::args_os().skip(1).collect::<Vec<_>>() {
        [syspath] => syspath.clone(),
        args => {
            log::debug!(
                "usage: {} <syspath> (got {} arguments)",
                env!("CARGO_BIN_NAME"),
                args.len()
            );
            return ExitCode::FAILURE;
        }
    };

    match run(Path::new(&syspath)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(syspath: &Path) -> io::Result<()> {
    let quirks = model_quirks::run(Udev::new, syspath, |path| Evdev::open(path))?;

    let mut stdout = io::stdout().lock();
    for quirk in quirks {
        writeln!(stdout, "{quirk}")?;
    }
    stdout.flush()
}

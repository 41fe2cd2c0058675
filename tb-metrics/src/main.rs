//! Collect Thunderbird release-readiness metrics into a spreadsheet.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use camino::Utf8Path;
use std::io::{self, Write};
use std::io::{stderr, stdout};
use std::process::{Command, Stdio};
use tb_metrics_lib::{Host, run};

/// Default host that runs real OS commands.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn open(&mut self, path: &Utf8Path) -> io::Result<()> {
        let mut command = viewer_command(path);
        let _ = command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());

        let status = command.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!("viewer exited with {status}")))
        }
    }
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Utf8Path) -> Command {
    let mut command = Command::new("cmd");
    let _ = command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Utf8Path) -> Command {
    let mut command = Command::new("open");
    let _ = command.arg(path);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn viewer_command(path: &Utf8Path) -> Command {
    let mut command = Command::new("xdg-open");
    let _ = command.arg(path);
    command
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}

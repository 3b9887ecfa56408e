//! Network-interface discovery via the platform listing command.
//!
//! Parses the output of `ip -4 addr show` into a map from interface device
//! name to IPv4 address. The expected record shape is
//!
//! ```text
//! 2: eth0: <BROADCAST,UP> ...
//!     inet 192.168.1.5/24 scope global eth0
//! ```
//!
//! If the listing command cannot run at all (binary missing, unsupported OS,
//! permission failure), discovery fails soft: the cause is reported on the
//! diagnostic channel and an empty map is returned.

use std::collections::HashMap;
use std::process::Command;

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use log::{debug, error};
use regex::Regex;

lazy_static! {
    // A device record starts with "<id>: <name>:" where id is the numeric
    // interface index. Matching the full prefix grammar (rather than testing
    // whether the first ':'-segment parses as an integer) keeps continuation
    // lines that happen to start with digits from opening a phantom record.
    static ref DEVICE_LINE: Regex =
        Regex::new(r"^(\d+):\s*([^:]+):").expect("device-line pattern is valid");
}

/// Lists IPv4 interface devices by running `ip -4 addr show`.
///
/// Returns a map from interface name to IPv4 address, rebuilt fresh on every
/// call. If the command cannot be executed or exits unsuccessfully, the cause
/// is logged and an empty map is returned; callers never see an error.
pub fn interface_devices() -> HashMap<String, String> {
    devices_from_command(Command::new("ip").args(["-4", "addr", "show"]))
}

/// Parses the raw multi-line output of an interface listing command.
///
/// A line matching the device prefix grammar `<id>: <name>: ...` opens a
/// record; the address is the token before the `/` of the `addr/prefix` pair
/// on the following `inet` line. Records whose follow-up line is missing or
/// is not an `inet` line are skipped.
pub fn parse_interface_listing(listing: &str) -> HashMap<String, String> {
    let lines: Vec<&str> = listing.lines().collect();
    let mut devices = HashMap::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(caps) = DEVICE_LINE.captures(line) else {
            continue;
        };
        let name = caps[2].trim().to_string();

        let Some(next) = lines.get(idx + 1) else {
            debug!("device {name} has no address line; skipping");
            continue;
        };
        let next = next.trim_start();
        if !next.starts_with("inet ") {
            debug!("device {name} is not followed by an inet line; skipping");
            continue;
        }

        // "inet 192.168.1.5/24 scope ..." -> second whitespace token after
        // the '/' is spaced out
        let spaced = next.replace('/', " ");
        let Some(address) = spaced.split_whitespace().nth(1) else {
            debug!("device {name} has a malformed inet line; skipping");
            continue;
        };
        devices.insert(name, address.to_string());
    }

    devices
}

fn devices_from_command(command: &mut Command) -> HashMap<String, String> {
    match listing_output(command) {
        Ok(text) => parse_interface_listing(&text),
        Err(e) => {
            error!("interface listing unavailable: {:#}", e);
            HashMap::new()
        }
    }
}

fn listing_output(command: &mut Command) -> Result<String> {
    let output = command
        .output()
        .context("failed to run interface listing command")?;
    if !output.status.success() {
        bail!("interface listing command exited with {}", output.status);
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

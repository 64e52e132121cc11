//! Version command implementation

use std::process::ExitCode;

use crate::error::Result;
use crate::platform::registry;

/// Run version command
pub fn run() -> Result<ExitCode> {
    println!("d3gen {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", rustc_version());
    println!("  Profile: {}", build_profile());
    println!("  Built-in layouts: {}", builtin_ids().join(", "));

    Ok(ExitCode::SUCCESS)
}

fn rustc_version() -> &'static str {
    env!("CARGO_PKG_RUST_VERSION")
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn builtin_ids() -> Vec<&'static str> {
    registry::default_layouts()
        .into_iter()
        .map(|(id, _)| id)
        .collect()
}

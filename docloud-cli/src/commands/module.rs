//! Module command - Ansible binary-module entry point
//!
//! Reads the arguments file Ansible hands to binary modules and prints
//! exactly one JSON object on stdout.

use std::path::Path;

use anyhow::{Context, Result};
use docloud_core::{ModuleOutput, ModuleParams};

pub fn run(args_file: &Path) -> Result<bool> {
    let output = load_and_execute(args_file);
    println!("{}", serde_json::to_string(&output)?);
    Ok(!output.is_failed())
}

/// Never fails: unreadable or malformed arguments become a module failure
fn load_and_execute(args_file: &Path) -> ModuleOutput {
    match load_params(args_file) {
        Ok(params) => super::execute(&params),
        Err(e) => ModuleOutput::failure(format!("{:#}", e)),
    }
}

fn load_params(args_file: &Path) -> Result<ModuleParams> {
    ModuleParams::from_args_file(args_file)
        .with_context(|| format!("Invalid module arguments in {}", args_file.display()))
}

//! CLI command implementations

pub mod account;
pub mod module;

use anyhow::Result;
use dialoguer::Password;
use docloud_core::{AccountInfoModule, Capabilities, ModuleOutput, ModuleParams};

/// Fill in the token from a hidden prompt when neither the flag nor the
/// environment provide one and stdin is a terminal.
pub fn prompt_for_token(params: &mut ModuleParams) -> Result<()> {
    if params.resolve_token().is_some() || atty::isnt(atty::Stream::Stdin) {
        return Ok(());
    }

    let token = Password::new()
        .with_prompt("DigitalOcean API token")
        .interact()?;
    params.token = Some(token);
    Ok(())
}

/// Detect capabilities and run the account_info module
pub fn execute(params: &ModuleParams) -> ModuleOutput {
    AccountInfoModule::execute(params, &Capabilities::detect())
}

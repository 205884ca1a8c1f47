//! Account command - show the current DigitalOcean account

use anyhow::Result;
use docloud_core::ModuleParams;

use crate::output;

pub fn run(
    token: Option<String>,
    base_url: Option<String>,
    timeout: u64,
    retries: u32,
    json: bool,
) -> Result<bool> {
    let mut params = ModuleParams {
        token,
        base_url,
        timeout,
        retries,
        ..Default::default()
    };
    if !json {
        super::prompt_for_token(&mut params)?;
    }

    let result = super::execute(&params);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(!result.is_failed());
    }

    if result.is_failed() {
        output::error(&result.msg);
        if let Some(detail) = &result.error {
            eprintln!("{}", output::error_table(detail));
        }
        return Ok(false);
    }

    output::success(&result.msg);
    println!();
    if let Some(account) = &result.account {
        println!("{}", output::account_table(account));
        if account.email_verified() == Some(false) {
            println!();
            output::warning("Email address is not verified");
        }
        if let Some(status) = account.status().filter(|s| *s != "active") {
            println!();
            output::warning(&format!(
                "Account status is {}: {}",
                status,
                account.status_message().unwrap_or("")
            ));
        }
    }

    Ok(true)
}

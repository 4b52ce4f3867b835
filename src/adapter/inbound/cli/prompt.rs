//! Interactive prompts.

use std::io::IsTerminal;

use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::{ConfigError, Result};

/// Ask how many transfers each wallet should send.
///
/// Re-asks until the answer is a positive integer. Fails with a missing
/// `count` field when stdin is not a terminal, since nobody can answer.
pub fn transfer_count() -> Result<u32> {
    if !std::io::stdin().is_terminal() {
        return Err(ConfigError::MissingField { field: "count" }.into());
    }

    let count: u32 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("How many transactions, for example 100")
        .validate_with(|n: &u32| -> std::result::Result<(), &str> {
            if *n > 0 {
                Ok(())
            } else {
                Err("Please enter a positive integer.")
            }
        })
        .interact_text()?;
    Ok(count)
}

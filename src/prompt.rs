//! Interactive fallbacks for values that were not passed as options.

use dialoguer::{Confirm, Input, Select};
use error_stack::{Result, ResultExt};

use crate::{command::Options, error::ApplicationError};

/// Returns the value of `option`, asking for it on the terminal when it was
/// not passed. The answer is trimmed and may be empty.
///
/// # Errors
/// If the terminal cannot be read.
pub fn option_or_prompt(
    options: &Options,
    option: &str,
    prompt: &str,
) -> Result<String, ApplicationError> {
    if let Some(value) = options.get(option) {
        return Ok(value.trim().to_string());
    }

    let answer: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .change_context(ApplicationError::PromptError {})?;

    Ok(answer.trim().to_string())
}

/// Asks a yes/no question.
///
/// # Errors
/// If the terminal cannot be read.
pub fn confirm(prompt: &str, default: bool) -> Result<bool, ApplicationError> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .change_context(ApplicationError::PromptError {})
}

/// Lets the user pick one of `items`, returning its index.
///
/// # Errors
/// If the terminal cannot be read.
pub fn select(prompt: &str, items: &[&str]) -> Result<usize, ApplicationError> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .change_context(ApplicationError::PromptError {})
}

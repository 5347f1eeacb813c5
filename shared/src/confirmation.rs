use crate::types::Result;
use dialoguer::Confirm;

/// Yes/no prompt shared by every mode that needs a confirmation.
pub fn ask_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let choice = Confirm::new()
        .with_prompt(prompt)
        .default(default_yes)
        .show_default(true)
        .interact()?;
    Ok(choice)
}

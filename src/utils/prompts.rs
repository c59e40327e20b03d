use anyhow::{Result, bail};
use inquire::Confirm;
use tracing::error;

/// Asks the operator to confirm before continuing. `proceed_by_default`
/// controls what a bare Enter means: the phase barriers of the walkthrough
/// accept by default, destructive standalone commands do not.
pub fn user_confirmation(
    skip_confirmation: bool,
    action_description: &str,
    proceed_by_default: bool,
) -> Result<bool> {
    if skip_confirmation {
        println!("Automatic confirmation with -y flag. Proceeding...");
        return Ok(true);
    }

    let confirm = Confirm::new(action_description)
        .with_default(proceed_by_default)
        .prompt();

    match confirm {
        Ok(true) => Ok(true),
        Ok(false) => {
            println!("Operation cancelled by user");
            Ok(false)
        }
        Err(e) => {
            error!("{}", e.to_string());
            bail!("Failure processing user response")
        }
    }
}

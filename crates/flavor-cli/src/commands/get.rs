//! Get command implementation

use super::load_session;
use crate::cli::Inputs;
use crate::error::{CliError, Result};

/// Print the resolved value of `name`, failing if it was never declared.
pub fn run_get(name: &str, inputs: &Inputs) -> Result<()> {
    let (session, _) = load_session(inputs)?;

    if !session.contains(name) {
        return Err(CliError::user(format!(
            "Unknown variable '{}'. Use 'flavorcfg resolve' to list variables.",
            name
        )));
    }

    println!("{}", session.get(name));
    Ok(())
}

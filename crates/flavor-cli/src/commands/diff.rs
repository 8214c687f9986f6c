//! Diff command implementation
//!
//! Lists variables whose resolved value differs from what the flavor's
//! defaults alone produce.

use colored::Colorize;

use flavor_core::{ChangedVariables, Flavor, OverridesDocument};

use super::load_session;
use crate::cli::Inputs;
use crate::error::Result;

/// Run the diff command
pub fn run_diff(inputs: &Inputs, json: bool) -> Result<()> {
    let (session, flavor) = load_session(inputs)?;
    let changed = session.changed_variables(&flavor);

    if json {
        // Same shape as an overrides document, so the output can be fed back
        println!(
            "{}",
            OverridesDocument::from_changes(&changed).to_json_string_pretty()?
        );
    } else {
        let baseline = session.baseline(&flavor);
        print_diff(&changed, &flavor, |name| baseline.get(name).to_string());
    }

    Ok(())
}

fn print_diff(changed: &ChangedVariables, flavor: &Flavor, baseline: impl Fn(&str) -> String) {
    if changed.is_empty() {
        println!(
            "{} No changes relative to {} defaults.",
            "OK".green().bold(),
            flavor.as_str().cyan()
        );
        return;
    }

    println!(
        "{} {} ({} changed)",
        "Diff".blue().bold(),
        flavor.as_str().cyan(),
        changed.len()
    );
    println!();

    for (name, value) in changed.iter() {
        println!("  {} {}", "~".yellow(), name.bold());
        println!("    {} {}", "-".red(), baseline(name));
        println!("    {} {}", "+".green(), value);
    }
}

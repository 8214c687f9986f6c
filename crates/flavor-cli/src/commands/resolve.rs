//! Resolve command implementation

use colored::{ColoredString, Colorize};
use serde_json::{Value, json};

use flavor_core::{ConfigSession, Flavor, VariableOrigin};

use super::load_session;
use crate::cli::Inputs;
use crate::error::Result;

/// Run the resolve command
pub fn run_resolve(inputs: &Inputs, json: bool) -> Result<()> {
    let (session, flavor) = load_session(inputs)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved_json(&session, &flavor))?);
    } else {
        print_resolved(&session, &flavor);
    }

    Ok(())
}

/// JSON view of every variable, in declaration order
pub fn resolved_json(session: &ConfigSession, flavor: &Flavor) -> Value {
    let changed = session.changed_variables(flavor);
    let variables = session
        .registry()
        .iter()
        .map(|variable| {
            json!({
                "name": variable.name(),
                "type": variable.value().value_type().map(|ty| ty.as_str()),
                "value": variable.value().to_json(),
                "overridable": variable.is_overridable(),
                "changed": changed.contains(variable.name()),
            })
        })
        .collect::<Vec<_>>();

    json!({
        "flavor": flavor.as_str(),
        "variables": variables,
    })
}

fn print_resolved(session: &ConfigSession, flavor: &Flavor) {
    let registry = session.registry();
    println!(
        "{} {} ({} variables)",
        "Resolved".blue().bold(),
        flavor.as_str().cyan(),
        registry.len()
    );
    println!();

    if registry.is_empty() {
        println!("  {}", "(none)".dimmed());
        return;
    }

    let changed = session.changed_variables(flavor);
    let width = registry.iter().map(|v| v.name().len()).max().unwrap_or(0);

    for variable in registry.iter() {
        let marker = if changed.contains(variable.name()) {
            "*".yellow()
        } else {
            " ".normal()
        };
        let ty = variable
            .value()
            .value_type()
            .map(|ty| ty.as_str())
            .unwrap_or("-");
        let mut notes = Vec::new();
        if variable.is_overridable() {
            notes.push("overridable");
        }
        if variable.origin() == VariableOrigin::Document {
            notes.push("from defaults");
        }

        println!(
            "{} {:<width$}  {} {} {}",
            marker,
            variable.name(),
            type_column(ty),
            variable.value(),
            if notes.is_empty() {
                String::new()
            } else {
                format!("({})", notes.join(", ")).dimmed().to_string()
            },
            width = width
        );
    }
}

/// Pad before coloring, since escape codes defeat width specifiers.
fn type_column(ty: &str) -> ColoredString {
    format!("{:<12}", ty).dimmed()
}

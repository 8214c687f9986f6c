//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use flavor_core::UndeclaredPolicy;

/// flavorcfg - Resolve layered, flavor-aware configuration
#[derive(Parser, Debug)]
#[command(name = "flavorcfg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print every resolved variable in declaration order
    ///
    /// Examples:
    ///   flavorcfg resolve -d defaults.json -f Desktop
    ///   flavorcfg resolve -D decl.json -d defaults.json -o overrides.json --json
    Resolve {
        #[command(flatten)]
        inputs: Inputs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print variables that differ from the flavor's defaults
    Diff {
        #[command(flatten)]
        inputs: Inputs,

        /// Output as an overrides document
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved value of one variable
    Get {
        /// Variable name
        name: String,

        #[command(flatten)]
        inputs: Inputs,
    },
}

/// Documents and options shared by every command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    /// Declarations document standing in for compiled-in variables
    #[arg(short = 'D', long)]
    pub declarations: Option<String>,

    /// Defaults document(s), applied in the order given
    #[arg(short, long = "defaults", required = true)]
    pub defaults: Vec<String>,

    /// Overrides document(s), applied after all defaults
    #[arg(short, long = "overrides")]
    pub overrides: Vec<String>,

    /// Flavor to resolve for
    #[arg(short, long, default_value = "Universal", env = "FLAVORCFG_FLAVOR")]
    pub flavor: String,

    /// What defaults may do with undeclared names (overrides the options file)
    #[arg(long, value_enum)]
    pub undeclared: Option<UndeclaredArg>,

    /// Resolver options file (TOML)
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Directory that relative document names resolve against
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

/// Command-line form of [`UndeclaredPolicy`]
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndeclaredArg {
    Ignore,
    Declare,
}

impl From<UndeclaredArg> for UndeclaredPolicy {
    fn from(arg: UndeclaredArg) -> Self {
        match arg {
            UndeclaredArg::Ignore => UndeclaredPolicy::Ignore,
            UndeclaredArg::Declare => UndeclaredPolicy::Declare,
        }
    }
}

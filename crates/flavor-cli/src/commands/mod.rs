//! Command implementations for flavor-cli

pub mod diff;
pub mod get;
pub mod resolve;

pub use diff::run_diff;
pub use get::run_get;
pub use resolve::run_resolve;

use std::fs;

use flavor_core::{ConfigSession, DeclarationsDocument, Flavor, ResolveOptions};
use flavor_fs::{ByteSource, DirectorySource, MountTable, SourceId};

use crate::cli::Inputs;
use crate::error::Result;

/// Resolve options from the options file, then the command line.
pub fn resolve_options(inputs: &Inputs) -> Result<ResolveOptions> {
    let mut options = match &inputs.options {
        Some(path) => {
            tracing::debug!(?path, "Loading resolver options");
            ResolveOptions::from_toml(&fs::read_to_string(path)?)?
        }
        None => ResolveOptions::default(),
    };
    if let Some(policy) = inputs.undeclared {
        options.undeclared = policy.into();
    }
    Ok(options)
}

/// Build a session and run every load the inputs name.
///
/// Declarations come first, then each defaults document for the flavor,
/// then each overrides document.
pub fn load_session(inputs: &Inputs) -> Result<(ConfigSession, Flavor)> {
    let mut files = MountTable::new();
    files.mount(DirectorySource::new(&inputs.root));

    let flavor = Flavor::new(inputs.flavor.clone());
    let mut session = ConfigSession::with_options(resolve_options(inputs)?);

    if let Some(uri) = &inputs.declarations {
        let bytes = files.read(&SourceId::parse(uri))?;
        session.declare_all(&DeclarationsDocument::parse(&bytes)?);
    }
    for uri in &inputs.defaults {
        session.load_defaults(&files, uri, &flavor)?;
    }
    for uri in &inputs.overrides {
        session.load_overrides(&files, uri)?;
    }

    Ok((session, flavor))
}

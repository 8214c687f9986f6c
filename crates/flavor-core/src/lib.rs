//! Flavor-aware layered configuration resolution
//!
//! Configuration is resolved from three layers, each applied on top of the
//! previous one:
//!
//! 1. **Declarations** - variables declared in code with their default value
//! 2. **Defaults** - a document of flavor-tagged entries; entries matching the
//!    requested flavor are applied in document order (last match wins)
//! 3. **Overrides** - a flat document applied to overridable variables only
//!
//! A [`ConfigSession`] can also report which variables differ from what the
//! flavor's defaults alone would produce.
//!
//! # Example
//!
//! ```
//! use flavor_core::{ConfigSession, Flavor};
//! use flavor_fs::{MemorySource, MountTable};
//!
//! let mut memory = MemorySource::new();
//! memory.add_file("ConfigOverrides.json", r#"{"FullScreen": {"type": "Bool", "value": false}}"#);
//! let mut files = MountTable::new();
//! files.mount(memory);
//!
//! let mut session = ConfigSession::new();
//! session.declare("FullScreen", true).set_overridable(true);
//! session.load_overrides(&files, "memory://ConfigOverrides.json").unwrap();
//!
//! assert_eq!(session.changed_variables(&Flavor::universal()).len(), 1);
//! ```

pub mod changes;
pub mod document;
pub mod error;
pub mod flavor;
pub mod options;
pub mod registry;
pub mod resolve;
pub mod session;
pub mod value;

pub use changes::ChangedVariables;
pub use document::{
    Assignment, Declaration, DeclarationsDocument, DefaultsDocument, DefaultsEntry,
    OverridesDocument,
};
pub use error::{Error, Result};
pub use flavor::{Flavor, FlavorTagSet};
pub use options::{ResolveOptions, UndeclaredPolicy};
pub use registry::{Variable, VariableOrigin, VariableRegistry};
pub use resolve::LoadReport;
pub use session::ConfigSession;
pub use value::{TypedValue, ValueType};

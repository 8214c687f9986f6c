//! Configuration session
//!
//! [`ConfigSession`] owns the registry for one configuration session and is
//! the only way documents reach it. Loads run to completion synchronously
//! and are not transactional: a document that fails to fetch or parse
//! leaves the registry untouched, since parsing finishes before any
//! assignment is applied.

use flavor_fs::{ByteSource, SourceId};

use crate::changes::{self, ChangedVariables};
use crate::resolve::{self, LoadReport};
use crate::{
    DeclarationsDocument, DefaultsDocument, Flavor, OverridesDocument, ResolveOptions, Result,
    TypedValue, Variable, VariableRegistry,
};

/// Layered configuration for one application session.
///
/// ```
/// use flavor_core::{ConfigSession, Flavor, TypedValue};
///
/// let mut session = ConfigSession::new();
/// session.declare("FullScreen", true).set_overridable(true);
///
/// session.load_defaults_bytes(br#"{"Default": [{"Flavor": [], "Variables": [
///     {"key": "FullScreen", "type": "Bool", "value": true}
/// ]}]}"#, &Flavor::universal()).unwrap();
/// session.load_overrides_bytes(br#"{"FullScreen": {"type": "Bool", "value": false}}"#).unwrap();
///
/// assert_eq!(session.get("FullScreen"), TypedValue::Bool(false));
/// let changed = session.changed_variables(&Flavor::universal());
/// assert_eq!(changed.get("FullScreen"), Some(&TypedValue::Bool(false)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigSession {
    registry: VariableRegistry,
    options: ResolveOptions,
    /// Parsed defaults documents in load order, replayed by change tracking
    defaults: Vec<DefaultsDocument>,
}

impl ConfigSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ResolveOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    /// Declare a compiled-in variable. See [`VariableRegistry::declare`].
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        default_value: impl Into<TypedValue>,
    ) -> &mut Variable {
        self.registry.declare(name, default_value)
    }

    pub fn declare_all(&mut self, declarations: &DeclarationsDocument) {
        declarations.declare_into(&mut self.registry);
    }

    pub fn get(&self, name: &str) -> TypedValue {
        self.registry.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Assign a declared variable directly.
    pub fn set(&mut self, name: &str, value: impl Into<TypedValue>) -> Result<()> {
        self.registry.set(name, value)
    }

    /// Fetch and apply a defaults document for `flavor`.
    pub fn load_defaults(
        &mut self,
        source: &dyn ByteSource,
        uri: &str,
        flavor: &Flavor,
    ) -> Result<LoadReport> {
        let id = SourceId::parse(uri);
        let bytes = source.read(&id)?;
        let report = self.load_defaults_bytes(&bytes, flavor)?;
        tracing::info!(%id, %flavor, applied = report.applied, "Loaded defaults");
        Ok(report)
    }

    /// Parse and apply a defaults document for `flavor`.
    pub fn load_defaults_bytes(&mut self, bytes: &[u8], flavor: &Flavor) -> Result<LoadReport> {
        let doc = DefaultsDocument::parse(bytes)?;
        Ok(self.apply_defaults(doc, flavor))
    }

    /// Apply an already parsed defaults document for `flavor`.
    pub fn apply_defaults(&mut self, doc: DefaultsDocument, flavor: &Flavor) -> LoadReport {
        let report =
            resolve::apply_defaults(&mut self.registry, &doc, flavor, self.options.undeclared);
        if report.matched == 0 {
            tracing::debug!(%flavor, entries = doc.len(), "No defaults entry matched");
        }
        self.defaults.push(doc);
        report
    }

    /// Fetch and apply an overrides document.
    pub fn load_overrides(&mut self, source: &dyn ByteSource, uri: &str) -> Result<LoadReport> {
        let id = SourceId::parse(uri);
        let bytes = source.read(&id)?;
        let report = self.load_overrides_bytes(&bytes)?;
        tracing::info!(
            %id,
            applied = report.applied,
            skipped = report.skipped(),
            "Loaded overrides"
        );
        Ok(report)
    }

    /// Parse and apply an overrides document.
    pub fn load_overrides_bytes(&mut self, bytes: &[u8]) -> Result<LoadReport> {
        let doc = OverridesDocument::parse(bytes)?;
        Ok(self.apply_overrides(&doc))
    }

    pub fn apply_overrides(&mut self, doc: &OverridesDocument) -> LoadReport {
        resolve::apply_overrides(&mut self.registry, doc)
    }

    /// Variables whose live value differs from the defaults-only value for
    /// `flavor`, in declaration order.
    pub fn changed_variables(&self, flavor: &Flavor) -> ChangedVariables {
        changes::changed_variables(
            &self.registry,
            &self.defaults,
            flavor,
            self.options.undeclared,
        )
    }

    /// What the registry would hold for `flavor` with defaults alone.
    pub fn baseline(&self, flavor: &Flavor) -> VariableRegistry {
        changes::baseline(
            &self.registry,
            &self.defaults,
            flavor,
            self.options.undeclared,
        )
    }
}

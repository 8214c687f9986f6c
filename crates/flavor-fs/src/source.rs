//! Byte sources and the scheme-dispatching mount table

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::id::FILE_SCHEME;
use crate::{Error, Result, SourceId};

/// Scheme served by [`MemorySource`].
pub const MEMORY_SCHEME: &str = "memory";

/// Read access to documents addressed by [`SourceId`].
pub trait ByteSource {
    /// Whether this source serves identifiers with the given scheme.
    fn accepts_scheme(&self, scheme: &str) -> bool;

    /// Whether the identified document exists in this source.
    fn exists(&self, id: &SourceId) -> bool;

    /// Read the full contents of the identified document.
    fn read(&self, id: &SourceId) -> Result<Vec<u8>>;

    /// Reject identifiers this source can never serve, whether or not the
    /// document exists.
    fn validate(&self, _id: &SourceId) -> Result<()> {
        Ok(())
    }
}

/// Documents held in memory, served under `memory://`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document.
    pub fn add_file(&mut self, name: impl AsRef<str>, content: impl Into<Vec<u8>>) {
        let name = SourceId::new(MEMORY_SCHEME, name).name().to_string();
        self.files.insert(name, content.into());
    }

    /// Remove a document, returning its contents if it was present.
    pub fn remove_file(&mut self, name: impl AsRef<str>) -> Option<Vec<u8>> {
        self.files.remove(SourceId::new(MEMORY_SCHEME, name).name())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ByteSource for MemorySource {
    fn accepts_scheme(&self, scheme: &str) -> bool {
        scheme == MEMORY_SCHEME
    }

    fn exists(&self, id: &SourceId) -> bool {
        self.accepts_scheme(id.scheme()) && self.files.contains_key(id.name())
    }

    fn read(&self, id: &SourceId) -> Result<Vec<u8>> {
        if !self.accepts_scheme(id.scheme()) {
            return Err(Error::UnsupportedScheme {
                scheme: id.scheme().to_string(),
            });
        }
        self.files
            .get(id.name())
            .cloned()
            .ok_or_else(|| Error::not_found(id))
    }
}

/// Documents on disk, served under `file://` and bare paths.
///
/// Relative names resolve against the root and may not climb above it.
/// Absolute names are read as given.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a name onto a native path under the root.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let path = Path::new(name);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }

        let mut depth = 0usize;
        for component in path.components() {
            match component {
                Component::ParentDir => {
                    depth = depth.checked_sub(1).ok_or_else(|| Error::PathEscapesRoot {
                        name: name.to_string(),
                    })?;
                }
                Component::Normal(_) => depth += 1,
                _ => {}
            }
        }
        Ok(self.root.join(path))
    }
}

impl ByteSource for DirectorySource {
    fn accepts_scheme(&self, scheme: &str) -> bool {
        scheme == FILE_SCHEME
    }

    fn exists(&self, id: &SourceId) -> bool {
        self.accepts_scheme(id.scheme())
            && self
                .resolve(id.name())
                .map(|path| path.is_file())
                .unwrap_or(false)
    }

    fn read(&self, id: &SourceId) -> Result<Vec<u8>> {
        if !self.accepts_scheme(id.scheme()) {
            return Err(Error::UnsupportedScheme {
                scheme: id.scheme().to_string(),
            });
        }
        let path = self.resolve(id.name())?;
        fs::read(&path).map_err(|e| Error::io(path, e))
    }

    fn validate(&self, id: &SourceId) -> Result<()> {
        self.resolve(id.name()).map(|_| ())
    }
}

/// Handle returned by [`MountTable::mount`], used to unmount later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountHandle(u64);

/// Ordered set of mounted sources.
///
/// Reads go to the first mount, in mount order, that accepts the scheme
/// and holds the document.
#[derive(Default)]
pub struct MountTable {
    mounts: Vec<(MountHandle, Box<dyn ByteSource>)>,
    next_handle: u64,
}

impl MountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, source: impl ByteSource + 'static) -> MountHandle {
        let handle = MountHandle(self.next_handle);
        self.next_handle += 1;
        self.mounts.push((handle, Box::new(source)));
        tracing::debug!(?handle, mounts = self.mounts.len(), "Mounted byte source");
        handle
    }

    /// Remove a mount. Returns `false` if the handle was not mounted.
    pub fn unmount(&mut self, handle: MountHandle) -> bool {
        let before = self.mounts.len();
        self.mounts.retain(|(h, _)| *h != handle);
        before != self.mounts.len()
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }
}

impl std::fmt::Debug for MountTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountTable")
            .field("mounts", &self.mounts.len())
            .finish()
    }
}

impl ByteSource for MountTable {
    fn accepts_scheme(&self, scheme: &str) -> bool {
        self.mounts.iter().any(|(_, m)| m.accepts_scheme(scheme))
    }

    fn exists(&self, id: &SourceId) -> bool {
        self.mounts.iter().any(|(_, m)| m.exists(id))
    }

    fn read(&self, id: &SourceId) -> Result<Vec<u8>> {
        if !self.accepts_scheme(id.scheme()) {
            return Err(Error::UnsupportedScheme {
                scheme: id.scheme().to_string(),
            });
        }
        match self.mounts.iter().find(|(_, m)| m.exists(id)) {
            Some((handle, mount)) => {
                tracing::debug!(%id, ?handle, "Reading document");
                mount.read(id)
            }
            None => {
                let accepting = self
                    .mounts
                    .iter()
                    .filter(|(_, m)| m.accepts_scheme(id.scheme()));
                for (_, mount) in accepting {
                    mount.validate(id)?;
                }
                Err(Error::not_found(id))
            }
        }
    }
}

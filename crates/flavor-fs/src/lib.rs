//! Byte sources for flavor-config documents
//!
//! Documents are addressed by a [`SourceId`] of the form `scheme://name`.
//! A [`MountTable`] routes each read to the first mounted [`ByteSource`]
//! that accepts the scheme and holds the file.

pub mod error;
pub mod id;
pub mod source;

pub use error::{Error, Result};
pub use id::SourceId;
pub use source::{ByteSource, DirectorySource, MemorySource, MountHandle, MountTable};

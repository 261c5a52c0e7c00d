//! Storage capability interface
//!
//! A storage is any place files can be read from or written to by name.
//! Names are forward-slash separated and relative to the storage root.
//!
//! Two backends ship with the crate:
//! - [`FileSystemStorage`]: a local directory; can resolve names to real
//!   paths, which is what makes symlinking and metadata-preserving copies
//!   possible.
//! - [`MemoryStorage`]: an opaque blob store with no path concept.
//!
//! The collection engine depends only on the [`Storage`] trait, never on
//! which backend it is talking to.

use std::io::Read;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::error::StorageError;

mod filesystem;
mod memory;

pub use filesystem::{
	copy_with_metadata, create_symlink, ensure_dir, symlinks_supported, FileSystemStorage,
};
pub use memory::MemoryStorage;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Immediate children of a storage directory, each list sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirListing {
	pub dirs: Vec<String>,
	pub files: Vec<String>,
}

/// Core trait defining the operations a storage backend offers
///
/// `path` and `modified_time` are optional capabilities: backends that cannot
/// provide them keep the default implementation, which fails with
/// [`StorageError::NotSupported`].
pub trait Storage: Send + Sync {
	/// Check whether an entry exists under `name`
	fn exists(&self, name: &str) -> StorageResult<bool>;

	/// Open `name` for reading
	fn open(&self, name: &str) -> StorageResult<Box<dyn Read + '_>>;

	/// Write `content` under `name`, creating intermediate containers
	fn save(&self, name: &str, content: &mut dyn Read) -> StorageResult<()>;

	/// Remove `name`; a no-op if it does not exist
	fn delete(&self, name: &str) -> StorageResult<()>;

	/// List the immediate children of directory `name` ("" is the root)
	fn listdir(&self, name: &str) -> StorageResult<DirListing>;

	/// Resolve `name` to a local filesystem path
	fn path(&self, _name: &str) -> StorageResult<PathBuf> {
		Err(StorageError::NotSupported { operation: "path" })
	}

	/// Last modification time of `name`
	fn modified_time(&self, _name: &str) -> StorageResult<SystemTime> {
		Err(StorageError::NotSupported { operation: "modified_time" })
	}

	/// Human-readable location used in reports
	fn location(&self) -> String;

	/// Whether names can be resolved to local paths
	///
	/// Probes `path("")`; a missing capability becomes `false`, never an error.
	fn is_local(&self) -> bool {
		self.path("").is_ok()
	}
}


// vim: ts=4

//! Error types for collectstatic operations

use std::error::Error;
use std::fmt;
use std::io;

/// Main error type for a collection run
#[derive(Debug)]
pub enum CollectError {
	/// Symlinks requested on a platform that cannot create them
	UnsupportedPlatform { platform: String },

	/// Symlinks requested but the destination has no local filesystem path
	UnsupportedDestination,

	/// Operator declined the confirmation prompt
	UserCancelled,

	/// Failed to compile an ignore pattern
	InvalidPattern { pattern: String, message: String },

	/// Invalid configuration
	InvalidConfig { message: String },

	/// Storage error (nested)
	Storage(StorageError),

	/// I/O error outside of storage (prompt, console output)
	Io(io::Error),
}

impl fmt::Display for CollectError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CollectError::UnsupportedPlatform { platform } => {
				write!(f, "Symlinking is not supported by this platform ({})", platform)
			}
			CollectError::UnsupportedDestination => {
				write!(f, "Can't symlink to a remote destination")
			}
			CollectError::UserCancelled => write!(f, "Static files collection cancelled"),
			CollectError::InvalidPattern { pattern, message } => {
				write!(f, "Invalid ignore pattern '{}': {}", pattern, message)
			}
			CollectError::InvalidConfig { message } => {
				write!(f, "Invalid configuration: {}", message)
			}
			CollectError::Storage(e) => write!(f, "Storage error: {}", e),
			CollectError::Io(e) => write!(f, "I/O error: {}", e),
		}
	}
}

impl Error for CollectError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			CollectError::Storage(e) => Some(e),
			CollectError::Io(e) => Some(e),
			_ => None,
		}
	}
}

impl From<io::Error> for CollectError {
	fn from(e: io::Error) -> Self {
		CollectError::Io(e)
	}
}

impl From<StorageError> for CollectError {
	fn from(e: StorageError) -> Self {
		CollectError::Storage(e)
	}
}

/// Storage backend errors
#[derive(Debug)]
pub enum StorageError {
	/// The backend does not offer this capability (local path, timestamps)
	NotSupported { operation: &'static str },

	/// No entry with this name
	NotFound { name: String },

	/// Name would escape the storage root
	SuspiciousPath { name: String },

	/// Unexpected read/write/delete failure
	Io { name: String, source: io::Error },
}

impl StorageError {
	/// Wrap an I/O error with the storage name it concerns
	pub fn io(name: impl Into<String>, source: io::Error) -> Self {
		StorageError::Io { name: name.into(), source }
	}

	/// True for missing capabilities, which callers may fold into defaults
	pub fn is_not_supported(&self) -> bool {
		matches!(self, StorageError::NotSupported { .. })
	}
}

impl fmt::Display for StorageError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			StorageError::NotSupported { operation } => {
				write!(f, "Operation not supported by this storage: {}", operation)
			}
			StorageError::NotFound { name } => write!(f, "No such file: {}", name),
			StorageError::SuspiciousPath { name } => {
				write!(f, "Path is outside the storage root: {}", name)
			}
			StorageError::Io { name, source } => write!(f, "{}: {}", name, source),
		}
	}
}

impl Error for StorageError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			StorageError::Io { source, .. } => Some(source),
			_ => None,
		}
	}
}


// vim: ts=4

//! Consolidated strategy and mode enums
//!
//! Central location for the closed enumerations used by configuration and the
//! command line: how files reach the destination, which finders run, and
//! which storage backend receives the collected files.
//!
//! `FinderKind` and `StorageBackend` parse from the `--finder` and `--storage`
//! flags through FromStr, and their Display output round-trips through it.
//! The collect mode is chosen by `--link` and only needs Display.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// COLLECT MODE
// ============================================================================

/// How each resolved file is materialized in the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CollectMode {
	/// Copy file content (and, for local destinations, metadata)
	#[default]
	Copy,

	/// Create a symbolic link pointing at the source file
	Symlink,
}

impl std::fmt::Display for CollectMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Copy => write!(f, "copy"),
			Self::Symlink => write!(f, "symlink"),
		}
	}
}

impl CollectMode {
	/// Past-tense verb used in the run summary
	pub fn past_tense(self) -> &'static str {
		match self {
			Self::Copy => "copied",
			Self::Symlink => "symlinked",
		}
	}
}

// ============================================================================
// FINDER KIND
// ============================================================================

/// Discovery plugins that can be listed in the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinderKind {
	/// Configured extra directories (`dirs`)
	#[serde(alias = "filesystem")]
	FileSystem,

	/// Per-application static directories (`apps`)
	AppDirectories,
}

impl FromStr for FinderKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"file-system" | "filesystem" | "dirs" => Ok(Self::FileSystem),
			"app-directories" | "apps" => Ok(Self::AppDirectories),
			_ => Err(format!(
				"Unknown finder: {}. Valid options: file-system, app-directories",
				s
			)),
		}
	}
}

impl std::fmt::Display for FinderKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::FileSystem => write!(f, "file-system"),
			Self::AppDirectories => write!(f, "app-directories"),
		}
	}
}

// ============================================================================
// STORAGE BACKEND
// ============================================================================

/// Destination storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
	/// Local directory tree rooted at `root`
	#[default]
	#[serde(alias = "filesystem")]
	FileSystem,

	/// Process-local blob store (no filesystem paths; contents vanish at exit)
	Memory,
}

impl FromStr for StorageBackend {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"file-system" | "filesystem" | "fs" => Ok(Self::FileSystem),
			"memory" | "mem" => Ok(Self::Memory),
			_ => Err(format!("Unknown storage backend: {}. Valid options: file-system, memory", s)),
		}
	}
}

impl std::fmt::Display for StorageBackend {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::FileSystem => write!(f, "file-system"),
			Self::Memory => write!(f, "memory"),
		}
	}
}


// vim: ts=4

//! Static file discovery
//!
//! A [`Finder`] enumerates the files of one or more source locations. Each
//! discovered file carries the storage that owns it and an optional prefix
//! that namespaces it in the destination.
//!
//! Finders run in configuration order. That order is the override policy:
//! when two finders produce the same destination path, the earlier one wins.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::error::StorageError;
use crate::exclusion::IgnorePatterns;
use crate::storage::Storage;
use crate::strategies::FinderKind;
use crate::validation;

mod app_directories;
mod filesystem;
mod storage;

pub use app_directories::AppDirectoriesFinder;
pub use filesystem::FileSystemFinder;
pub use storage::StorageFinder;

/// Lazy, single-pass sequence of discovered files
pub type FileIter<'a> = Box<dyn Iterator<Item = Result<DiscoveredFile, StorageError>> + 'a>;

/// A file produced by a finder, consumed once by the collector
#[derive(Clone)]
pub struct DiscoveredFile {
	/// Path relative to `storage`, forward-slash separated
	pub relative_path: String,

	/// Namespace prepended to form the destination path
	pub prefix: Option<String>,

	/// Storage owning `relative_path`
	pub storage: Arc<dyn Storage>,
}

impl DiscoveredFile {
	pub fn new(
		relative_path: impl Into<String>,
		prefix: Option<String>,
		storage: Arc<dyn Storage>,
	) -> Self {
		Self { relative_path: relative_path.into(), prefix, storage }
	}

	/// Unique key of this file in the destination namespace
	pub fn destination_path(&self) -> String {
		match self.prefix.as_deref() {
			Some(prefix) if !prefix.is_empty() => validation::join_name(prefix, &self.relative_path),
			_ => self.relative_path.clone(),
		}
	}
}

impl fmt::Debug for DiscoveredFile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DiscoveredFile")
			.field("relative_path", &self.relative_path)
			.field("prefix", &self.prefix)
			.field("storage", &self.storage.location())
			.finish()
	}
}

/// A discovery plugin enumerating candidate files
pub trait Finder: Send + Sync {
	/// Short name used in logs
	fn name(&self) -> &str;

	/// Walk all sources, skipping anything matched by `ignore`
	///
	/// Every call re-walks from scratch.
	fn list<'a>(&'a self, ignore: &'a IgnorePatterns) -> FileIter<'a>;
}

/// Depth-first walk over a storage
///
/// Files of a directory are yielded (sorted) before descending into its
/// subdirectories (sorted). Ignored directories are not descended into.
/// A listing failure is yielded once and ends the walk.
pub struct StorageWalker<'a> {
	storage: Arc<dyn Storage>,
	prefix: Option<String>,
	ignore: &'a IgnorePatterns,
	pending_dirs: Vec<String>,
	pending_files: VecDeque<String>,
	failed: bool,
}

impl<'a> StorageWalker<'a> {
	pub fn new(storage: Arc<dyn Storage>, prefix: Option<String>, ignore: &'a IgnorePatterns) -> Self {
		Self {
			storage,
			prefix,
			ignore,
			pending_dirs: vec![String::new()],
			pending_files: VecDeque::new(),
			failed: false,
		}
	}

	fn expand(&mut self, dir: &str) -> Result<(), StorageError> {
		let listing = self.storage.listdir(dir)?;

		for file in listing.files {
			let path = validation::join_name(dir, &file);
			if !self.ignore.is_ignored(&path) {
				self.pending_files.push_back(path);
			}
		}

		// Reverse so the stack pops subdirectories in sorted order
		for sub in listing.dirs.into_iter().rev() {
			let path = validation::join_name(dir, &sub);
			if !self.ignore.is_ignored(&path) {
				self.pending_dirs.push(path);
			}
		}
		Ok(())
	}
}

impl Iterator for StorageWalker<'_> {
	type Item = Result<DiscoveredFile, StorageError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}
		loop {
			if let Some(path) = self.pending_files.pop_front() {
				return Some(Ok(DiscoveredFile::new(
					path,
					self.prefix.clone(),
					Arc::clone(&self.storage),
				)));
			}
			let dir = self.pending_dirs.pop()?;
			if let Err(e) = self.expand(&dir) {
				self.failed = true;
				return Some(Err(e));
			}
		}
	}
}

/// Instantiate the configured finders, in priority order
pub fn get_finders(config: &Config) -> Vec<Box<dyn Finder>> {
	config
		.finders
		.iter()
		.map(|kind| -> Box<dyn Finder> {
			match kind {
				FinderKind::FileSystem => Box::new(FileSystemFinder::new(&config.dirs)),
				FinderKind::AppDirectories => {
					Box::new(AppDirectoriesFinder::new(&config.apps, &config.app_static_dir))
				}
			}
		})
		.collect()
}


// vim: ts=4

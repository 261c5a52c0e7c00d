//! Finder over the configured extra source directories

use std::path::PathBuf;
use std::sync::Arc;

use super::{FileIter, Finder, StorageFinder};
use crate::config::StaticDir;
use crate::exclusion::IgnorePatterns;
use crate::logging::*;
use crate::storage::FileSystemStorage;

/// Walks each configured directory in order, applying its prefix
pub struct FileSystemFinder {
	locations: Vec<(PathBuf, StorageFinder)>,
}

impl FileSystemFinder {
	pub fn new(dirs: &[StaticDir]) -> Self {
		let locations = dirs
			.iter()
			.map(|dir| {
				let storage = Arc::new(FileSystemStorage::new(&dir.path));
				let prefix = dir.prefix.clone().filter(|p| !p.is_empty());
				(dir.path.clone(), StorageFinder::new(storage, prefix))
			})
			.collect();
		Self { locations }
	}
}

impl Finder for FileSystemFinder {
	fn name(&self) -> &str {
		"file-system"
	}

	fn list<'a>(&'a self, ignore: &'a IgnorePatterns) -> FileIter<'a> {
		Box::new(
			self.locations
				.iter()
				.filter(|(path, _)| {
					if path.is_dir() {
						true
					} else {
						warn!("Static directory {} does not exist, skipping", path.display());
						false
					}
				})
				.flat_map(move |(_, finder)| finder.list(ignore)),
		)
	}
}


// vim: ts=4

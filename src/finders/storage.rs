//! Finder over an arbitrary storage

use std::sync::Arc;

use super::{FileIter, Finder, StorageWalker};
use crate::exclusion::IgnorePatterns;
use crate::storage::Storage;

/// Lists every file of a single storage, optionally under a prefix
pub struct StorageFinder {
	storage: Arc<dyn Storage>,
	prefix: Option<String>,
}

impl StorageFinder {
	pub fn new(storage: Arc<dyn Storage>, prefix: Option<String>) -> Self {
		Self { storage, prefix }
	}
}

impl Finder for StorageFinder {
	fn name(&self) -> &str {
		"storage"
	}

	fn list<'a>(&'a self, ignore: &'a IgnorePatterns) -> FileIter<'a> {
		Box::new(StorageWalker::new(Arc::clone(&self.storage), self.prefix.clone(), ignore))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::storage::MemoryStorage;

	#[test]
	fn test_prefix_applied() {
		let storage = MemoryStorage::new();
		storage.insert("img/logo.png", "png");
		let finder = StorageFinder::new(Arc::new(storage), Some("admin".to_string()));

		let files: Vec<_> = finder.list(&IgnorePatterns::none()).map(|f| f.unwrap()).collect();
		assert_eq!(files.len(), 1);
		assert_eq!(files[0].relative_path, "img/logo.png");
		assert_eq!(files[0].destination_path(), "admin/img/logo.png");
	}
}

// vim: ts=4

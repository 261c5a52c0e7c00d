//! Finder over per-application static directories

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{FileIter, Finder, StorageFinder};
use crate::exclusion::IgnorePatterns;
use crate::storage::FileSystemStorage;

/// Walks `<app>/<static_dir>` for every app that has one, in app order
///
/// App files are not prefixed; apps namespace their files inside their own
/// static directory, and earlier apps win collisions.
pub struct AppDirectoriesFinder {
	locations: Vec<(PathBuf, StorageFinder)>,
}

impl AppDirectoriesFinder {
	pub fn new(apps: &[PathBuf], static_dir: &str) -> Self {
		let locations = apps
			.iter()
			.map(|app| {
				let root = app.join(static_dir);
				let storage = Arc::new(FileSystemStorage::new(&root));
				(root, StorageFinder::new(storage, None))
			})
			.collect();
		Self { locations }
	}

	/// Static directories that exist right now
	pub fn roots(&self) -> impl Iterator<Item = &Path> {
		self.locations.iter().map(|(root, _)| root.as_path()).filter(|root| root.is_dir())
	}
}

impl Finder for AppDirectoriesFinder {
	fn name(&self) -> &str {
		"app-directories"
	}

	fn list<'a>(&'a self, ignore: &'a IgnorePatterns) -> FileIter<'a> {
		// Apps without a static directory are normal, not worth a warning
		Box::new(
			self.locations
				.iter()
				.filter(|(root, _)| root.is_dir())
				.flat_map(move |(_, finder)| finder.list(ignore)),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use tempfile::TempDir;

	#[test]
	fn test_only_apps_with_static_dir() {
		let base = TempDir::new().unwrap();
		let blog = base.path().join("blog");
		let shop = base.path().join("shop");
		fs::create_dir_all(blog.join("static/blog")).unwrap();
		fs::write(blog.join("static/blog/post.css"), "p").unwrap();
		fs::create_dir_all(&shop).unwrap();

		let finder = AppDirectoriesFinder::new(&[blog.clone(), shop], "static");
		assert_eq!(finder.roots().count(), 1);

		let found: Vec<String> = finder
			.list(&IgnorePatterns::none())
			.map(|f| f.unwrap().destination_path())
			.collect();
		assert_eq!(found, vec!["blog/post.css"]);
	}
}

// vim: ts=4

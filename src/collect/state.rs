//! Bookkeeping for a single collection run

use std::collections::BTreeSet;

use super::Summary;
use crate::strategies::CollectMode;

/// Destination paths handled so far in this run
///
/// `copied` and `symlinked` hold claimed paths: the first finder to write a
/// path owns it for the rest of the run. `unmodified` holds paths left alone
/// because the destination was up to date. The three sets are disjoint.
#[derive(Debug, Default)]
pub struct RunState {
	copied: BTreeSet<String>,
	symlinked: BTreeSet<String>,
	unmodified: BTreeSet<String>,
}

impl RunState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_copied(&self, path: &str) -> bool {
		self.copied.contains(path)
	}

	pub fn is_symlinked(&self, path: &str) -> bool {
		self.symlinked.contains(path)
	}

	pub fn is_unmodified(&self, path: &str) -> bool {
		self.unmodified.contains(path)
	}

	pub fn mark_copied(&mut self, path: String) {
		debug_assert!(!self.is_symlinked(&path) && !self.is_unmodified(&path));
		self.copied.insert(path);
	}

	pub fn mark_symlinked(&mut self, path: String) {
		debug_assert!(!self.is_copied(&path) && !self.is_unmodified(&path));
		self.symlinked.insert(path);
	}

	pub fn mark_unmodified(&mut self, path: String) {
		debug_assert!(!self.is_copied(&path) && !self.is_symlinked(&path));
		self.unmodified.insert(path);
	}

	/// Counts for the run summary
	pub fn summary(&self, mode: CollectMode) -> Summary {
		Summary {
			mode,
			copied: self.copied.len(),
			symlinked: self.symlinked.len(),
			unmodified: self.unmodified.len(),
		}
	}
}


// vim: ts=4

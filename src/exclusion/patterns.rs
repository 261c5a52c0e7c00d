//! Glob-based ignore patterns for finder walks

use std::collections::BTreeSet;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::CollectError;

/// Patterns ignored unless explicitly disabled: VCS metadata, dotfiles, editor backups
pub const DEFAULT_IGNORE_PATTERNS: [&str; 3] = ["CVS", ".*", "*~"];

/// Compiled set of shell-style ignore patterns
///
/// Patterns use `*`, `?` and `[...]` wildcards. A path is ignored when any of
/// its components matches a pattern, or when the whole relative path does.
/// Wildcards never match across `/`.
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
	/// Original pattern strings, deduplicated
	patterns: BTreeSet<String>,

	/// Compiled patterns
	set: GlobSet,
}

impl IgnorePatterns {
	/// Compile `patterns`
	pub fn new<I, S>(patterns: I) -> Result<Self, CollectError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let patterns: BTreeSet<String> = patterns.into_iter().map(Into::into).collect();
		let set = Self::build_glob_set(&patterns)?;
		Ok(Self { patterns, set })
	}

	/// Compile `patterns`, unioned with [`DEFAULT_IGNORE_PATTERNS`] when `use_defaults` is set
	pub fn with_defaults<I, S>(patterns: I, use_defaults: bool) -> Result<Self, CollectError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut all: Vec<String> = patterns.into_iter().map(Into::into).collect();
		if use_defaults {
			all.extend(DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()));
		}
		Self::new(all)
	}

	/// An empty set that ignores nothing
	pub fn none() -> Self {
		Self { patterns: BTreeSet::new(), set: GlobSet::empty() }
	}

	fn build_glob_set(patterns: &BTreeSet<String>) -> Result<GlobSet, CollectError> {
		let mut builder = GlobSetBuilder::new();

		for pattern in patterns {
			let glob = GlobBuilder::new(pattern).literal_separator(true).build().map_err(|e| {
				CollectError::InvalidPattern { pattern: pattern.clone(), message: e.to_string() }
			})?;
			builder.add(glob);
		}

		builder.build().map_err(|e| CollectError::InvalidPattern {
			pattern: patterns.iter().cloned().collect::<Vec<_>>().join(", "),
			message: e.to_string(),
		})
	}

	/// Check a forward-slash separated relative path
	pub fn is_ignored(&self, relative_path: &str) -> bool {
		if self.set.is_empty() {
			return false;
		}
		self.set.is_match(relative_path)
			|| relative_path.split('/').any(|component| self.set.is_match(component))
	}

	/// The pattern strings in this set, sorted
	pub fn patterns(&self) -> impl Iterator<Item = &str> {
		self.patterns.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.patterns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.patterns.is_empty()
	}
}

impl Default for IgnorePatterns {
	fn default() -> Self {
		Self::none()
	}
}


// vim: ts=4

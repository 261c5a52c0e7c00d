//! Per-file decision made by the collector

use std::fmt;

/// Why a discovered file was not written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	/// An earlier finder already copied a file to this destination
	AlreadyCopied,

	/// An earlier finder already symlinked a file to this destination
	AlreadyLinked,

	/// The destination is at least as new as the source
	NotModified,
}

impl SkipReason {
	pub fn description(self) -> &'static str {
		match self {
			SkipReason::AlreadyCopied => "already copied earlier",
			SkipReason::AlreadyLinked => "already linked earlier",
			SkipReason::NotModified => "not modified",
		}
	}
}

impl fmt::Display for SkipReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.description())
	}
}

/// Outcome of status resolution for one destination path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
	/// Write the file; `exists` tells whether an entry must be removed first
	Collect { exists: bool },

	/// Leave the destination alone
	Skip(SkipReason),
}


// vim: ts=4

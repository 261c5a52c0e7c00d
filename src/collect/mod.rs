//! Collection engine
//!
//! Drives the finders in priority order and synchronizes every discovered
//! file into the destination storage, either by copying or by symlinking.
//!
//! The per-run bookkeeping lives in [`state::RunState`]: the first finder to
//! claim a destination path owns it, and every later file mapping to the same
//! path is skipped. Staleness is decided by [`change::has_changed`] from the
//! timestamps the storages report; nothing is cached between runs.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use crate::error::{CollectError, StorageError};
use crate::exclusion::IgnorePatterns;
use crate::finders::{DiscoveredFile, Finder};
use crate::logging::*;
use crate::report::{Action, Reporter};
use crate::storage::{self, Storage};
use crate::strategies::CollectMode;
use crate::validation;

mod change;
mod state;
mod status;

pub use change::has_changed;
pub use state::RunState;
pub use status::{FileStatus, SkipReason};

/// Per-run switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
	pub mode: CollectMode,
	pub dry_run: bool,
	pub verbosity: u8,
}

impl Default for RunOptions {
	fn default() -> Self {
		Self { mode: CollectMode::Copy, dry_run: false, verbosity: 1 }
	}
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
	pub mode: CollectMode,
	pub copied: usize,
	pub symlinked: usize,
	pub unmodified: usize,
}

impl Summary {
	/// Files written in the run's mode
	pub fn collected(&self) -> usize {
		match self.mode {
			CollectMode::Copy => self.copied,
			CollectMode::Symlink => self.symlinked,
		}
	}
}

/// Synchronizes discovered files into one destination storage
pub struct Collector {
	destination: Arc<dyn Storage>,
	destination_local: bool,
	root: String,
}

impl Collector {
	pub fn new(destination: Arc<dyn Storage>) -> Self {
		let destination_local = destination.is_local();
		let root = destination.location();
		Self { destination, destination_local, root }
	}

	pub fn root(&self) -> &str {
		&self.root
	}

	/// Check the platform and destination can carry out `mode`
	pub fn check_mode(&self, mode: CollectMode) -> Result<(), CollectError> {
		if mode != CollectMode::Symlink {
			return Ok(());
		}
		if !storage::symlinks_supported() {
			return Err(CollectError::UnsupportedPlatform {
				platform: std::env::consts::OS.to_string(),
			});
		}
		if !self.destination_local {
			return Err(CollectError::UnsupportedDestination);
		}
		Ok(())
	}

	/// Collect every file the finders produce
	///
	/// Any storage failure aborts the run; files handled before the failure
	/// stay where they were written.
	pub fn run<W: Write>(
		&self,
		finders: &[Box<dyn Finder>],
		ignore: &IgnorePatterns,
		options: &RunOptions,
		out: W,
	) -> Result<Summary, CollectError> {
		self.check_mode(options.mode)?;

		let mut state = RunState::new();
		let mut reporter = Reporter::new(out, options.verbosity, options.dry_run);

		info!(
			"Collecting into {} (mode: {}, dry run: {}, {} finder(s))",
			self.root,
			options.mode,
			options.dry_run,
			finders.len()
		);

		for finder in finders {
			debug!("Running finder {}", finder.name());
			for file in finder.list(ignore) {
				let file = file?;
				self.collect_file(&file, options, &mut state, &mut reporter)?;
			}
		}

		let summary = state.summary(options.mode);
		reporter.summary(&summary, &self.root)?;
		info!(
			"Done: {} collected, {} unmodified",
			summary.collected(),
			summary.unmodified
		);
		Ok(summary)
	}

	/// Decide what to do with the destination entry for `file`
	pub fn status(
		&self,
		file: &DiscoveredFile,
		destination_path: &str,
		mode: CollectMode,
		state: &RunState,
	) -> Result<FileStatus, StorageError> {
		if state.is_copied(destination_path) {
			return Ok(FileStatus::Skip(SkipReason::AlreadyCopied));
		}
		if state.is_symlinked(destination_path) {
			return Ok(FileStatus::Skip(SkipReason::AlreadyLinked));
		}
		if state.is_unmodified(destination_path) {
			// An earlier finder's file already matched this entry
			return Ok(FileStatus::Skip(SkipReason::NotModified));
		}

		let exists = self.destination.exists(destination_path)?;
		if exists
			&& mode != CollectMode::Symlink
			&& !has_changed(
				file.storage.as_ref(),
				&file.relative_path,
				self.destination.as_ref(),
				destination_path,
			) && !self.is_symlink(destination_path)?
		{
			return Ok(FileStatus::Skip(SkipReason::NotModified));
		}
		Ok(FileStatus::Collect { exists })
	}

	fn collect_file<W: Write>(
		&self,
		file: &DiscoveredFile,
		options: &RunOptions,
		state: &mut RunState,
		reporter: &mut Reporter<W>,
	) -> Result<(), CollectError> {
		let destination_path = file.destination_path();

		let exists = match self.status(file, &destination_path, options.mode, state)? {
			FileStatus::Skip(reason) => {
				debug!("Skipping {} ({})", destination_path, reason);
				if reason == SkipReason::NotModified {
					state.mark_unmodified(destination_path.clone());
				}
				reporter.skip(&destination_path, reason)?;
				return Ok(());
			}
			FileStatus::Collect { exists } => exists,
		};

		if exists {
			reporter.delete(&destination_path)?;
			if !options.dry_run {
				self.destination.delete(&destination_path)?;
			}
		}

		let source_label = source_label(file);
		match options.mode {
			CollectMode::Symlink => {
				reporter.transfer(Action::Symlink, &source_label, &destination_path)?;
				if !options.dry_run {
					self.link_file(file, &destination_path)?;
				}
				state.mark_symlinked(destination_path);
			}
			CollectMode::Copy => {
				reporter.transfer(Action::Copy, &source_label, &destination_path)?;
				if !options.dry_run {
					self.copy_file(file, &destination_path)?;
				}
				state.mark_copied(destination_path);
			}
		}
		Ok(())
	}

	fn link_file(&self, file: &DiscoveredFile, destination_path: &str) -> Result<(), StorageError> {
		let source = file.storage.path(&file.relative_path)?;
		// A relative target would resolve against the link's own directory
		let source = std::path::absolute(&source)
			.map_err(|e| StorageError::io(file.relative_path.as_str(), e))?;
		let target = self.destination.path(destination_path)?;
		debug!("Linking {} -> {}", target.display(), source.display());
		storage::create_symlink(&source, &target)
			.map_err(|e| StorageError::io(destination_path, e))
	}

	fn copy_file(&self, file: &DiscoveredFile, destination_path: &str) -> Result<(), StorageError> {
		if self.destination_local {
			match file.storage.path(&file.relative_path) {
				Ok(source) => {
					let target = self.destination.path(destination_path)?;
					debug!("Copying {} -> {}", source.display(), target.display());
					return storage::copy_with_metadata(&source, &target)
						.map_err(|e| StorageError::io(destination_path, e));
				}
				Err(e) if e.is_not_supported() => {}
				Err(e) => return Err(e),
			}
		}

		debug!("Streaming {} into {}", file.relative_path, destination_path);
		let mut reader = file.storage.open(&file.relative_path)?;
		self.destination.save(destination_path, &mut reader)
	}

	/// Whether the destination entry is itself a symbolic link
	fn is_symlink(&self, destination_path: &str) -> Result<bool, StorageError> {
		if !self.destination_local {
			return Ok(false);
		}
		let path = self.destination.path(destination_path)?;
		is_symlink_path(&path).map_err(|e| StorageError::io(destination_path, e))
	}
}

/// A missing entry is not a symlink; any other lookup failure is an error
fn is_symlink_path(path: &Path) -> io::Result<bool> {
	match fs::symlink_metadata(path) {
		Ok(meta) => Ok(meta.file_type().is_symlink()),
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
		Err(e) => Err(e),
	}
}

/// Source shown in progress lines: the real path when there is one
fn source_label(file: &DiscoveredFile) -> String {
	match file.storage.path(&file.relative_path) {
		Ok(path) => path.display().to_string(),
		Err(_) => validation::join_name(&file.storage.location(), &file.relative_path),
	}
}


// vim: ts=4

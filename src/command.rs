//! The `collectstatic` command
//!
//! Wraps the collection engine with the operator-facing contract: option
//! defaults, default ignore patterns, the confirmation prompt, and the
//! symlink preconditions that must fail before anything is asked.

use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::collect::{Collector, RunOptions, Summary};
use crate::config::Config;
use crate::error::CollectError;
use crate::exclusion::IgnorePatterns;
use crate::finders::{self, Finder};
use crate::logging::*;
use crate::storage::{FileSystemStorage, MemoryStorage, Storage};
use crate::strategies::{CollectMode, StorageBackend};

/// Options for one invocation
#[derive(Debug, Clone)]
pub struct CollectOptions {
	/// Ask for confirmation before touching the destination
	pub interactive: bool,

	/// Extra glob patterns to ignore
	pub ignore_patterns: Vec<String>,

	/// Add `CVS`, `.*` and `*~` to the ignore patterns
	pub use_default_ignore_patterns: bool,

	pub dry_run: bool,

	/// Symlink instead of copying
	pub link: bool,

	/// 0 = silent, 1 = actions and summary, 2 = also skips and deletions
	pub verbosity: u8,
}

impl Default for CollectOptions {
	fn default() -> Self {
		Self {
			interactive: true,
			ignore_patterns: Vec::new(),
			use_default_ignore_patterns: true,
			dry_run: false,
			link: false,
			verbosity: 1,
		}
	}
}

impl CollectOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn interactive(mut self, interactive: bool) -> Self {
		self.interactive = interactive;
		self
	}

	pub fn ignore(mut self, pattern: impl Into<String>) -> Self {
		self.ignore_patterns.push(pattern.into());
		self
	}

	pub fn use_default_ignore_patterns(mut self, enabled: bool) -> Self {
		self.use_default_ignore_patterns = enabled;
		self
	}

	pub fn dry_run(mut self, dry_run: bool) -> Self {
		self.dry_run = dry_run;
		self
	}

	pub fn link(mut self, link: bool) -> Self {
		self.link = link;
		self
	}

	pub fn verbosity(mut self, verbosity: u8) -> Self {
		self.verbosity = verbosity.min(2);
		self
	}

	pub fn mode(&self) -> CollectMode {
		if self.link {
			CollectMode::Symlink
		} else {
			CollectMode::Copy
		}
	}

	/// Compile the effective ignore pattern set
	pub fn ignore_set(&self) -> Result<IgnorePatterns, CollectError> {
		IgnorePatterns::with_defaults(
			self.ignore_patterns.iter().cloned(),
			self.use_default_ignore_patterns,
		)
	}
}

/// A configured collection: destination plus finders in priority order
pub struct CollectStatic {
	collector: Collector,
	finders: Vec<Box<dyn Finder>>,
}

impl CollectStatic {
	pub fn new(destination: Arc<dyn Storage>, finders: Vec<Box<dyn Finder>>) -> Self {
		Self { collector: Collector::new(destination), finders }
	}

	/// Build the destination storage and finders described by `config`
	pub fn from_config(config: &Config) -> Result<Self, CollectError> {
		config.validate()?;
		let destination: Arc<dyn Storage> = match config.storage {
			StorageBackend::FileSystem => Arc::new(FileSystemStorage::new(&config.root)),
			StorageBackend::Memory => Arc::new(MemoryStorage::new()),
		};
		Ok(Self::new(destination, finders::get_finders(config)))
	}

	pub fn collector(&self) -> &Collector {
		&self.collector
	}

	pub fn finders(&self) -> &[Box<dyn Finder>] {
		&self.finders
	}

	/// Run the command
	///
	/// `input` is only read when confirmation is required; the prompt, progress
	/// lines and summary go to `output`.
	pub fn handle<R, W>(
		&self,
		options: &CollectOptions,
		mut input: R,
		mut output: W,
	) -> Result<Summary, CollectError>
	where
		R: BufRead,
		W: Write,
	{
		let ignore = options.ignore_set()?;
		let mode = options.mode();
		self.collector.check_mode(mode)?;

		if options.interactive && !confirm(self.collector.root(), &mut input, &mut output)? {
			info!("Collection cancelled by operator");
			return Err(CollectError::UserCancelled);
		}

		let run = RunOptions { mode, dry_run: options.dry_run, verbosity: options.verbosity };
		self.collector.run(&self.finders, &ignore, &run, output)
	}
}

/// Ask the operator to type `yes`
fn confirm<R: BufRead, W: Write>(
	root: &str,
	input: &mut R,
	output: &mut W,
) -> Result<bool, CollectError> {
	write!(
		output,
		"\nYou have requested to collect static files at the destination\n\
		 location as specified in your settings:\n\n    {}\n\n\
		 This will overwrite existing files!\n\
		 Are you sure you want to do this?\n\n\
		 Type 'yes' to continue, or 'no' to cancel: ",
		root
	)?;
	output.flush()?;

	let mut answer = String::new();
	input.read_line(&mut answer)?;
	let answer = answer.strip_suffix('\n').unwrap_or(&answer);
	let answer = answer.strip_suffix('\r').unwrap_or(answer);
	Ok(answer == "yes")
}


// vim: ts=4

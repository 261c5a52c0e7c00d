//! Console reporting for collection runs
//!
//! Verbosity levels:
//! - 0: silent
//! - 1: one line per copy/symlink, plus the final summary
//! - 2: also deletions and skip reasons
//!
//! Under dry-run every action line is prefixed with "Pretending to".

use std::io::{self, Write};

use crate::collect::{SkipReason, Summary};

/// Actions announced on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	Copy,
	Symlink,
	Delete,
}

impl Action {
	fn verb(self) -> &'static str {
		match self {
			Action::Copy => "copy",
			Action::Symlink => "symlink",
			Action::Delete => "delete",
		}
	}

	fn participle(self) -> &'static str {
		match self {
			Action::Copy => "Copying",
			Action::Symlink => "Symlinking",
			Action::Delete => "Deleting",
		}
	}

	fn min_verbosity(self) -> u8 {
		match self {
			Action::Copy | Action::Symlink => 1,
			Action::Delete => 2,
		}
	}
}

/// Writes verbosity-gated progress lines to an output stream
pub struct Reporter<W: Write> {
	out: W,
	verbosity: u8,
	dry_run: bool,
}

impl<W: Write> Reporter<W> {
	pub fn new(out: W, verbosity: u8, dry_run: bool) -> Self {
		Self { out, verbosity, dry_run }
	}

	/// Announce a copy or symlink from `src` to `dst`
	pub fn transfer(&mut self, action: Action, src: &str, dst: &str) -> io::Result<()> {
		if self.verbosity < action.min_verbosity() {
			return Ok(());
		}
		let line = format!("'{}' to '{}'", src, dst);
		self.action_line(action, &line)
	}

	/// Announce removal of an existing destination entry
	pub fn delete(&mut self, dst: &str) -> io::Result<()> {
		if self.verbosity < Action::Delete.min_verbosity() {
			return Ok(());
		}
		let line = format!("'{}'", dst);
		self.action_line(Action::Delete, &line)
	}

	/// Explain why a file was left alone
	pub fn skip(&mut self, dst: &str, reason: SkipReason) -> io::Result<()> {
		if self.verbosity >= 2 {
			writeln!(self.out, "Skipping '{}' ({})", dst, reason)?;
		}
		Ok(())
	}

	/// Print the final summary line
	pub fn summary(&mut self, summary: &Summary, root: &str) -> io::Result<()> {
		if self.verbosity >= 1 {
			writeln!(self.out)?;
			writeln!(self.out, "{}", summary_line(summary, root))?;
		}
		self.out.flush()
	}

	pub fn into_inner(self) -> W {
		self.out
	}

	fn action_line(&mut self, action: Action, rest: &str) -> io::Result<()> {
		if self.dry_run {
			writeln!(self.out, "Pretending to {} {}", action.verb(), rest)
		} else {
			writeln!(self.out, "{} {}", action.participle(), rest)
		}
	}
}

/// `"<N> static file(s) <copied|symlinked> to '<root>'[ (<M> unmodified)]"`
pub fn summary_line(summary: &Summary, root: &str) -> String {
	let count = summary.collected();
	let mut line = format!(
		"{} static file{} {} to '{}'",
		count,
		if count == 1 { "" } else { "s" },
		summary.mode.past_tense(),
		root
	);
	if summary.unmodified > 0 {
		line.push_str(&format!(" ({} unmodified)", summary.unmodified));
	}
	line
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::strategies::CollectMode;

	fn output(reporter: Reporter<Vec<u8>>) -> String {
		String::from_utf8(reporter.into_inner()).unwrap()
	}

	#[test]
	fn test_summary_pluralization() {
		let mut summary = Summary { mode: CollectMode::Copy, copied: 1, ..Summary::default() };
		assert_eq!(summary_line(&summary, "/srv/static"), "1 static file copied to '/srv/static'");

		summary.copied = 0;
		assert_eq!(summary_line(&summary, "/srv/static"), "0 static files copied to '/srv/static'");

		summary.copied = 3;
		summary.unmodified = 2;
		assert_eq!(
			summary_line(&summary, "/srv/static"),
			"3 static files copied to '/srv/static' (2 unmodified)"
		);
	}

	#[test]
	fn test_summary_symlinked() {
		let summary = Summary { mode: CollectMode::Symlink, symlinked: 2, ..Summary::default() };
		assert_eq!(summary_line(&summary, "out"), "2 static files symlinked to 'out'");
	}

	#[test]
	fn test_verbosity_one() {
		let mut reporter = Reporter::new(Vec::new(), 1, false);
		reporter.transfer(Action::Copy, "/src/a.css", "/dst/a.css").unwrap();
		reporter.delete("a.css").unwrap();
		reporter.skip("b.css", SkipReason::NotModified).unwrap();

		assert_eq!(output(reporter), "Copying '/src/a.css' to '/dst/a.css'\n");
	}

	#[test]
	fn test_verbosity_two_dry_run() {
		let mut reporter = Reporter::new(Vec::new(), 2, true);
		reporter.delete("a.css").unwrap();
		reporter.transfer(Action::Symlink, "/src/a.css", "/dst/a.css").unwrap();
		reporter.skip("a.css", SkipReason::AlreadyLinked).unwrap();

		assert_eq!(
			output(reporter),
			"Pretending to delete 'a.css'\n\
			 Pretending to symlink '/src/a.css' to '/dst/a.css'\n\
			 Skipping 'a.css' (already linked earlier)\n"
		);
	}

	#[test]
	fn test_silent() {
		let mut reporter = Reporter::new(Vec::new(), 0, false);
		reporter.transfer(Action::Copy, "a", "b").unwrap();
		reporter.summary(&Summary::default(), "out").unwrap();
		assert!(output(reporter).is_empty());
	}
}

// vim: ts=4

//! In-memory blob storage
//!
//! An opaque backend: names map to byte blobs, there is no filesystem path
//! behind them, and timestamp reporting can be switched off to model remote
//! stores that do not expose one.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::sync::{Mutex, MutexGuard};
use std::time::SystemTime;

use super::{DirListing, Storage, StorageResult};
use crate::error::StorageError;
use crate::validation;

#[derive(Debug, Clone)]
struct Blob {
	content: Vec<u8>,
	modified: SystemTime,
}

/// Storage keeping every file in a process-local map
#[derive(Debug)]
pub struct MemoryStorage {
	blobs: Mutex<BTreeMap<String, Blob>>,
	reports_modified_time: bool,
}

impl MemoryStorage {
	/// Create an empty storage that reports modification times
	pub fn new() -> Self {
		Self { blobs: Mutex::new(BTreeMap::new()), reports_modified_time: true }
	}

	/// Disable the `modified_time` capability
	pub fn without_modified_time(mut self) -> Self {
		self.reports_modified_time = false;
		self
	}

	/// Store `content` under `name`, stamped with the current time
	pub fn insert(&self, name: &str, content: impl Into<Vec<u8>>) {
		self.insert_with_time(name, content, SystemTime::now());
	}

	/// Store `content` under `name` with an explicit modification time
	pub fn insert_with_time(&self, name: &str, content: impl Into<Vec<u8>>, modified: SystemTime) {
		self.lock()
			.insert(validation::normalize_name(name), Blob { content: content.into(), modified });
	}

	/// Content stored under `name`
	pub fn read(&self, name: &str) -> Option<Vec<u8>> {
		self.lock().get(&validation::normalize_name(name)).map(|b| b.content.clone())
	}

	/// All stored names, sorted
	pub fn names(&self) -> Vec<String> {
		self.lock().keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Blob>> {
		// A poisoned map is still consistent: every mutation is a single insert/remove
		self.blobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	fn key(name: &str) -> StorageResult<String> {
		validation::validate_name(name)?;
		Ok(validation::normalize_name(name))
	}
}

impl Default for MemoryStorage {
	fn default() -> Self {
		Self::new()
	}
}

impl Storage for MemoryStorage {
	fn exists(&self, name: &str) -> StorageResult<bool> {
		Ok(self.lock().contains_key(&Self::key(name)?))
	}

	fn open(&self, name: &str) -> StorageResult<Box<dyn Read + '_>> {
		let key = Self::key(name)?;
		match self.lock().get(&key) {
			Some(blob) => Ok(Box::new(Cursor::new(blob.content.clone()))),
			None => Err(StorageError::NotFound { name: name.to_string() }),
		}
	}

	fn save(&self, name: &str, content: &mut dyn Read) -> StorageResult<()> {
		let key = Self::key(name)?;
		let mut buf = Vec::new();
		content.read_to_end(&mut buf).map_err(|e| StorageError::io(name, e))?;
		self.lock().insert(key, Blob { content: buf, modified: SystemTime::now() });
		Ok(())
	}

	fn delete(&self, name: &str) -> StorageResult<()> {
		let key = Self::key(name)?;
		self.lock().remove(&key);
		Ok(())
	}

	fn listdir(&self, name: &str) -> StorageResult<DirListing> {
		let dir = Self::key(name)?;
		let prefix = if dir.is_empty() { String::new() } else { format!("{}/", dir) };

		let mut listing = DirListing::default();
		for key in self.lock().keys() {
			let rest = match key.strip_prefix(&prefix) {
				Some(rest) => rest,
				None => continue,
			};
			match rest.split_once('/') {
				Some((child, _)) => {
					if listing.dirs.last().map(String::as_str) != Some(child) {
						listing.dirs.push(child.to_string());
					}
				}
				None => listing.files.push(rest.to_string()),
			}
		}
		// Byte order puts "css.d/" before "css/"
		listing.dirs.sort();
		Ok(listing)
	}

	fn modified_time(&self, name: &str) -> StorageResult<SystemTime> {
		if !self.reports_modified_time {
			return Err(StorageError::NotSupported { operation: "modified_time" });
		}
		let key = Self::key(name)?;
		self.lock()
			.get(&key)
			.map(|blob| blob.modified)
			.ok_or_else(|| StorageError::NotFound { name: name.to_string() })
	}

	fn location(&self) -> String {
		"memory".to_string()
	}
}


// vim: ts=4

//! Local filesystem storage
//!
//! Also hosts the path-level helpers the collection engine needs once a
//! destination has been resolved to a real path: container creation,
//! metadata-preserving copy, and symlink creation.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use filetime::FileTime;

use super::{DirListing, Storage, StorageResult};
use crate::error::StorageError;
use crate::logging::*;
use crate::validation;

/// Suffix for files being written; renamed into place once complete
const TMP_SUFFIX: &str = ".collectstatic-tmp";

/// Storage rooted at a local directory
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
	base_path: PathBuf,
}

impl FileSystemStorage {
	/// Create a storage rooted at `base_path` (which need not exist yet)
	pub fn new(base_path: impl Into<PathBuf>) -> Self {
		Self { base_path: base_path.into() }
	}

	/// Root directory of this storage
	pub fn base_path(&self) -> &Path {
		&self.base_path
	}

	fn resolve(&self, name: &str) -> StorageResult<PathBuf> {
		validation::validate_name(name)?;
		let name = validation::normalize_name(name);
		if name.is_empty() {
			Ok(self.base_path.clone())
		} else {
			Ok(self.base_path.join(name))
		}
	}
}

impl Storage for FileSystemStorage {
	fn exists(&self, name: &str) -> StorageResult<bool> {
		let path = self.resolve(name)?;
		// symlink_metadata: a dangling link still occupies the name
		match fs::symlink_metadata(&path) {
			Ok(_) => Ok(true),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
			Err(e) => Err(StorageError::io(name, e)),
		}
	}

	fn open(&self, name: &str) -> StorageResult<Box<dyn Read + '_>> {
		let path = self.resolve(name)?;
		match fs::File::open(&path) {
			Ok(file) => Ok(Box::new(file)),
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				Err(StorageError::NotFound { name: name.to_string() })
			}
			Err(e) => Err(StorageError::io(name, e)),
		}
	}

	fn save(&self, name: &str, content: &mut dyn Read) -> StorageResult<()> {
		let path = self.resolve(name)?;
		if let Some(parent) = path.parent() {
			ensure_dir(parent).map_err(|e| StorageError::io(name, e))?;
		}

		let mut tmp_name = path.as_os_str().to_os_string();
		tmp_name.push(TMP_SUFFIX);
		let tmp_path = PathBuf::from(tmp_name);

		let written = fs::File::create(&tmp_path)
			.and_then(|mut file| io::copy(content, &mut file).and_then(|_| file.sync_all()))
			.and_then(|_| fs::rename(&tmp_path, &path));
		if let Err(e) = written {
			let _ = fs::remove_file(&tmp_path);
			return Err(StorageError::io(name, e));
		}
		Ok(())
	}

	fn delete(&self, name: &str) -> StorageResult<()> {
		let path = self.resolve(name)?;
		let meta = match fs::symlink_metadata(&path) {
			Ok(meta) => meta,
			Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
			Err(e) => return Err(StorageError::io(name, e)),
		};
		let removed = if meta.is_dir() { fs::remove_dir(&path) } else { fs::remove_file(&path) };
		match removed {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(StorageError::io(name, e)),
		}
	}

	fn listdir(&self, name: &str) -> StorageResult<DirListing> {
		let path = self.resolve(name)?;
		let entries = match fs::read_dir(&path) {
			Ok(entries) => entries,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				return Err(StorageError::NotFound { name: name.to_string() })
			}
			Err(e) => return Err(StorageError::io(name, e)),
		};

		let mut listing = DirListing::default();
		for entry in entries {
			let entry = entry.map_err(|e| StorageError::io(name, e))?;
			let entry_name = match entry.file_name().into_string() {
				Ok(s) => s,
				Err(raw) => {
					warn!("Skipping non UTF-8 name {:?} in {}", raw, path.display());
					continue;
				}
			};

			// Follow links so a linked directory is walked like a real one
			match fs::metadata(entry.path()) {
				Ok(meta) if meta.is_dir() => listing.dirs.push(entry_name),
				Ok(_) => listing.files.push(entry_name),
				Err(e) => {
					warn!("Cannot access {}: {}", entry.path().display(), e);
				}
			}
		}
		listing.dirs.sort();
		listing.files.sort();
		Ok(listing)
	}

	fn path(&self, name: &str) -> StorageResult<PathBuf> {
		self.resolve(name)
	}

	fn modified_time(&self, name: &str) -> StorageResult<SystemTime> {
		let path = self.resolve(name)?;
		fs::metadata(&path).and_then(|m| m.modified()).map_err(|e| StorageError::io(name, e))
	}

	fn location(&self) -> String {
		self.base_path.display().to_string()
	}
}

/// Make sure directory `path` exists
///
/// Idempotent: an existing directory is success. Any other failure, including
/// a non-directory already occupying the path, is returned.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
	match fs::create_dir_all(path) {
		Ok(()) => Ok(()),
		Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
		Err(e) => Err(e),
	}
}

/// Copy file content, permissions and timestamps from `src` to `dst`
pub fn copy_with_metadata(src: &Path, dst: &Path) -> io::Result<()> {
	if let Some(parent) = dst.parent() {
		ensure_dir(parent)?;
	}
	fs::copy(src, dst)?;
	let meta = fs::metadata(src)?;
	filetime::set_file_times(
		dst,
		FileTime::from_last_access_time(&meta),
		FileTime::from_last_modification_time(&meta),
	)
}

/// Create a symbolic link at `dst` pointing to `src`
pub fn create_symlink(src: &Path, dst: &Path) -> io::Result<()> {
	if let Some(parent) = dst.parent() {
		ensure_dir(parent)?;
	}
	symlink(src, dst)
}

/// Whether this platform can create symbolic links
pub fn symlinks_supported() -> bool {
	cfg!(unix)
}

#[cfg(unix)]
fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
	std::os::unix::fs::symlink(src, dst)
}

#[cfg(not(unix))]
fn symlink(_src: &Path, _dst: &Path) -> io::Result<()> {
	Err(io::Error::new(io::ErrorKind::Other, "symbolic links are not supported on this platform"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;
	use tempfile::TempDir;

	fn read_all(storage: &FileSystemStorage, name: &str) -> String {
		let mut s = String::new();
		storage.open(name).unwrap().read_to_string(&mut s).unwrap();
		s
	}

	#[test]
	fn test_save_creates_parents() {
		let dir = TempDir::new().unwrap();
		let storage = FileSystemStorage::new(dir.path());

		storage.save("css/deep/site.css", &mut Cursor::new(b"body{}".to_vec())).unwrap();

		assert!(storage.exists("css/deep/site.css").unwrap());
		assert_eq!(read_all(&storage, "css/deep/site.css"), "body{}");
		assert!(!dir.path().join("css/deep/site.css.collectstatic-tmp").exists());
	}

	#[test]
	fn test_save_overwrites() {
		let dir = TempDir::new().unwrap();
		let storage = FileSystemStorage::new(dir.path());

		storage.save("a.txt", &mut Cursor::new(b"one".to_vec())).unwrap();
		storage.save("a.txt", &mut Cursor::new(b"two".to_vec())).unwrap();

		assert_eq!(read_all(&storage, "a.txt"), "two");
	}

	#[test]
	fn test_delete_missing_is_noop() {
		let dir = TempDir::new().unwrap();
		let storage = FileSystemStorage::new(dir.path());
		assert!(storage.delete("nothing/here.txt").is_ok());
	}

	#[cfg(unix)]
	#[test]
	fn test_dangling_symlink_exists_and_deletes() {
		let dir = TempDir::new().unwrap();
		let storage = FileSystemStorage::new(dir.path());
		std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("link")).unwrap();

		assert!(storage.exists("link").unwrap());
		storage.delete("link").unwrap();
		assert!(!storage.exists("link").unwrap());
	}

	#[test]
	fn test_listdir_sorted() {
		let dir = TempDir::new().unwrap();
		fs::create_dir_all(dir.path().join("js")).unwrap();
		fs::create_dir_all(dir.path().join("css")).unwrap();
		fs::write(dir.path().join("b.txt"), "b").unwrap();
		fs::write(dir.path().join("a.txt"), "a").unwrap();

		let listing = FileSystemStorage::new(dir.path()).listdir("").unwrap();
		assert_eq!(listing.dirs, vec!["css", "js"]);
		assert_eq!(listing.files, vec!["a.txt", "b.txt"]);
	}

	#[test]
	fn test_listdir_missing_dir() {
		let dir = TempDir::new().unwrap();
		let storage = FileSystemStorage::new(dir.path().join("absent"));
		assert!(matches!(storage.listdir(""), Err(StorageError::NotFound { .. })));
	}

	#[test]
	fn test_path_rejects_escape() {
		let dir = TempDir::new().unwrap();
		let storage = FileSystemStorage::new(dir.path());
		assert!(matches!(storage.path("../x"), Err(StorageError::SuspiciousPath { .. })));
		assert_eq!(storage.path("a/b.txt").unwrap(), dir.path().join("a/b.txt"));
	}

	#[test]
	fn test_copy_with_metadata_preserves_mtime() {
		let dir = TempDir::new().unwrap();
		let src = dir.path().join("src.txt");
		let dst = dir.path().join("out/dst.txt");
		fs::write(&src, "data").unwrap();
		let mtime = FileTime::from_unix_time(1_500_000_000, 0);
		filetime::set_file_mtime(&src, mtime).unwrap();

		copy_with_metadata(&src, &dst).unwrap();

		let meta = fs::metadata(&dst).unwrap();
		assert_eq!(FileTime::from_last_modification_time(&meta), mtime);
		assert_eq!(fs::read_to_string(&dst).unwrap(), "data");
	}

	#[test]
	fn test_ensure_dir_rejects_file() {
		let dir = TempDir::new().unwrap();
		let file = dir.path().join("occupied");
		fs::write(&file, "x").unwrap();

		assert!(ensure_dir(dir.path()).is_ok());
		assert!(ensure_dir(&file).is_err());
	}
}

// vim: ts=4

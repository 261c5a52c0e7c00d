//! Storage name validation
//!
//! Storage names are forward-slash separated and relative to the storage
//! root. These checks keep a name from escaping that root when it is turned
//! into a filesystem path.

use std::path::{Component, Path};

use crate::error::StorageError;

/// Check if a name is safe (relative, no parent directory references)
pub fn is_name_safe(name: &str) -> bool {
	let path = Path::new(name);
	!path.is_absolute()
		&& !path.components().any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
}

/// Validate a storage name
///
/// # Returns
/// `Ok(())` if the name stays within the storage root,
/// `Err(StorageError::SuspiciousPath)` otherwise
pub fn validate_name(name: &str) -> Result<(), StorageError> {
	if !is_name_safe(name) {
		return Err(StorageError::SuspiciousPath { name: name.to_string() });
	}
	Ok(())
}

/// Normalize a name to forward slashes without leading `./` or `/` noise
pub fn normalize_name(name: &str) -> String {
	name.replace('\\', "/")
		.split('/')
		.filter(|part| !part.is_empty() && *part != ".")
		.collect::<Vec<_>>()
		.join("/")
}

/// Join a storage directory name and an entry name
pub fn join_name(dir: &str, name: &str) -> String {
	if dir.is_empty() {
		name.to_string()
	} else {
		format!("{}/{}", dir, name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_is_name_safe_normal() {
		assert!(is_name_safe("file.txt"));
		assert!(is_name_safe("css/site.css"));
		assert!(is_name_safe(""));
	}

	#[test]
	fn test_is_name_safe_escapes() {
		assert!(!is_name_safe("../file.txt"));
		assert!(!is_name_safe("css/../../file.txt"));
		assert!(!is_name_safe("/etc/passwd"));
	}

	#[test]
	fn test_validate_name_err() {
		let result = validate_name("../secret");
		assert!(matches!(result, Err(StorageError::SuspiciousPath { .. })));
	}

	#[test]
	fn test_normalize_name() {
		assert_eq!(normalize_name("./css//site.css"), "css/site.css");
		assert_eq!(normalize_name("js\\app.js"), "js/app.js");
		assert_eq!(normalize_name("/admin/"), "admin");
	}

	#[test]
	fn test_join_name() {
		assert_eq!(join_name("", "a.txt"), "a.txt");
		assert_eq!(join_name("css", "a.css"), "css/a.css");
	}
}

// vim: ts=4

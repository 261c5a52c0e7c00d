//! Configuration for collectstatic
//!
//! A single `Config` struct is built once at startup and passed explicitly to
//! everything that needs it. It follows a priority chain:
//! 1. Built-in defaults (Config::default())
//! 2. Config file (`.toml`, or `.json`/`.json5`)
//! 3. Environment variables (`STATICFILES_ROOT`)
//! 4. CLI flags (highest priority, applied by the binary)

use crate::error::CollectError;
use crate::strategies::{FinderKind, StorageBackend};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the destination root
pub const ROOT_ENV: &str = "STATICFILES_ROOT";

// ============================================================================
// MAIN CONFIGURATION STRUCT
// ============================================================================

/// Configuration for a collection run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
	// ========================================================================
	// DESTINATION
	// ========================================================================
	/// Directory the static files are collected into
	pub root: PathBuf,

	/// Destination storage backend
	pub storage: StorageBackend,

	// ========================================================================
	// SOURCES
	// ========================================================================
	/// Additional directories holding static files, optionally prefixed
	pub dirs: Vec<StaticDir>,

	/// Application directories searched by the app-directories finder
	pub apps: Vec<PathBuf>,

	/// Name of the static subdirectory inside each app
	pub app_static_dir: String,

	/// Finders to run, in priority order
	pub finders: Vec<FinderKind>,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			// Destination
			root: PathBuf::new(),
			storage: StorageBackend::FileSystem,

			// Sources
			dirs: vec![],
			apps: vec![],
			app_static_dir: "static".to_string(),
			finders: vec![FinderKind::FileSystem, FinderKind::AppDirectories],
		}
	}
}

impl Config {
	/// Load a config file, picking the format from its extension
	pub fn load(path: &Path) -> Result<Self, CollectError> {
		let contents = fs::read_to_string(path).map_err(|e| CollectError::InvalidConfig {
			message: format!("Cannot read {}: {}", path.display(), e),
		})?;

		let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
		let config: Result<Config, String> = match extension {
			"toml" => toml::from_str(&contents).map_err(|e| e.to_string()),
			"json" | "json5" => json5::from_str(&contents).map_err(|e| e.to_string()),
			other => Err(format!("unsupported config format '{}'", other)),
		};
		config.map_err(|message| CollectError::InvalidConfig {
			message: format!("{}: {}", path.display(), message),
		})
	}

	/// Apply overrides from the process environment
	pub fn apply_env(&mut self) {
		self.apply_env_from(|key| std::env::var(key).ok());
	}

	/// Apply overrides from an arbitrary variable lookup
	pub fn apply_env_from<F>(&mut self, lookup: F)
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(root) = lookup(ROOT_ENV).filter(|v| !v.is_empty()) {
			self.root = PathBuf::from(root);
		}
	}

	/// Check the configuration is usable for a collection run
	pub fn validate(&self) -> Result<(), CollectError> {
		if self.storage == StorageBackend::FileSystem && self.root.as_os_str().is_empty() {
			return Err(CollectError::InvalidConfig {
				message: "no destination root configured (set `root` or STATICFILES_ROOT)"
					.to_string(),
			});
		}

		for dir in &self.dirs {
			if let Some(prefix) = &dir.prefix {
				if prefix.starts_with('/') || prefix.ends_with('/') {
					return Err(CollectError::InvalidConfig {
						message: format!(
							"prefix '{}' must not start or end with a slash",
							prefix
						),
					});
				}
			}
			if !self.root.as_os_str().is_empty() && same_dir(&dir.path, &self.root) {
				return Err(CollectError::InvalidConfig {
					message: format!(
						"static directory {} is also the destination root",
						dir.path.display()
					),
				});
			}
		}

		if self.app_static_dir.is_empty() || self.app_static_dir.contains('/') {
			return Err(CollectError::InvalidConfig {
				message: format!("invalid app static directory '{}'", self.app_static_dir),
			});
		}

		Ok(())
	}
}

/// Compare directories, resolving symlinks and `..` where they exist
fn same_dir(a: &Path, b: &Path) -> bool {
	match (a.canonicalize(), b.canonicalize()) {
		(Ok(a), Ok(b)) => a == b,
		_ => a == b,
	}
}

// ============================================================================
// NESTED CONFIGURATION STRUCTS
// ============================================================================

/// An extra source directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticDir {
	/// Namespace for this directory's files in the destination
	#[serde(default)]
	pub prefix: Option<String>,

	/// Directory to collect from
	pub path: PathBuf,
}

impl StaticDir {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		StaticDir { prefix: None, path: path.into() }
	}

	pub fn with_prefix(prefix: impl Into<String>, path: impl Into<PathBuf>) -> Self {
		StaticDir { prefix: Some(prefix.into()), path: path.into() }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[test]
	fn test_config_default() {
		let config = Config::default();
		assert!(config.root.as_os_str().is_empty());
		assert_eq!(config.app_static_dir, "static");
		assert_eq!(config.finders, vec![FinderKind::FileSystem, FinderKind::AppDirectories]);
		assert_eq!(config.storage, StorageBackend::FileSystem);
	}

	#[test]
	fn test_load_toml() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("static.toml");
		fs::write(
			&path,
			r#"
root = "/srv/static"
appStaticDir = "assets"
finders = ["app-directories"]

[[dirs]]
path = "/opt/shared"

[[dirs]]
prefix = "vendor"
path = "/opt/vendor"
"#,
		)
		.unwrap();

		let config = Config::load(&path).unwrap();
		assert_eq!(config.root, PathBuf::from("/srv/static"));
		assert_eq!(config.app_static_dir, "assets");
		assert_eq!(config.finders, vec![FinderKind::AppDirectories]);
		assert_eq!(
			config.dirs,
			vec![StaticDir::new("/opt/shared"), StaticDir::with_prefix("vendor", "/opt/vendor")]
		);
	}

	#[test]
	fn test_load_json5() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("static.json");
		fs::write(
			&path,
			r#"{
				// destination
				root: "/srv/static",
				storage: "memory",
				apps: ["/srv/app/blog"],
			}"#,
		)
		.unwrap();

		let config = Config::load(&path).unwrap();
		assert_eq!(config.storage, StorageBackend::Memory);
		assert_eq!(config.apps, vec![PathBuf::from("/srv/app/blog")]);
	}

	#[test]
	fn test_load_unknown_extension() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("static.ini");
		fs::write(&path, "root=/x").unwrap();
		assert!(matches!(Config::load(&path), Err(CollectError::InvalidConfig { .. })));
	}

	#[test]
	fn test_env_override() {
		let mut config = Config { root: PathBuf::from("/from/file"), ..Config::default() };
		config.apply_env_from(|key| {
			if key == ROOT_ENV {
				Some("/from/env".to_string())
			} else {
				None
			}
		});
		assert_eq!(config.root, PathBuf::from("/from/env"));

		config.apply_env_from(|_| Some(String::new()));
		assert_eq!(config.root, PathBuf::from("/from/env"));
	}

	#[test]
	fn test_validate_requires_root() {
		assert!(Config::default().validate().is_err());

		let memory = Config { storage: StorageBackend::Memory, ..Config::default() };
		assert!(memory.validate().is_ok());
	}

	#[test]
	fn test_validate_prefix_slashes() {
		let config = Config {
			root: PathBuf::from("/srv/static"),
			dirs: vec![StaticDir::with_prefix("/vendor", "/opt/vendor")],
			..Config::default()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_validate_root_inside_dirs() {
		let dir = TempDir::new().unwrap();
		let config = Config {
			root: dir.path().to_path_buf(),
			dirs: vec![StaticDir::new(dir.path().join("."))],
			..Config::default()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_config_serialization() {
		let config = Config {
			root: PathBuf::from("/srv/static"),
			dirs: vec![StaticDir::with_prefix("vendor", "/opt/vendor")],
			..Config::default()
		};
		let json = serde_json::to_string(&config).expect("Failed to serialize");
		assert!(json.contains("\"appStaticDir\""));
		let deserialized: Config = serde_json::from_str(&json).expect("Failed to deserialize");
		assert_eq!(config.root, deserialized.root);
		assert_eq!(config.dirs, deserialized.dirs);
		assert_eq!(config.finders, deserialized.finders);
	}
}

// vim: ts=4

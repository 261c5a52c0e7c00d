//! # collectstatic - Static Asset Collector
//!
//! Gathers static files scattered across several source locations into a
//! single destination tree, by copying or by symlinking. Sources are walked
//! by finders in priority order: when two sources provide the same
//! destination path, the first one wins. Files whose destination copy is
//! already up to date are left alone.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use collectstatic::{CollectOptions, CollectStatic, Config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("static.toml".as_ref())?;
//!     let command = CollectStatic::from_config(&config)?;
//!     let options = CollectOptions::new().interactive(false);
//!     let summary = command.handle(&options, std::io::empty(), std::io::stdout())?;
//!     println!("{} files collected", summary.collected());
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Sources
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use collectstatic::finders::{Finder, StorageFinder};
//! use collectstatic::storage::{FileSystemStorage, MemoryStorage};
//!
//! let source = Arc::new(FileSystemStorage::new("assets"));
//! let finders: Vec<Box<dyn Finder>> = vec![Box::new(StorageFinder::new(source, None))];
//! let command = collectstatic::CollectStatic::new(Arc::new(MemoryStorage::new()), finders);
//! ```

pub mod collect;
pub mod command;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod finders;
pub mod logging;
pub mod report;
pub mod storage;
pub mod strategies;
pub mod validation;

// Re-export commonly used types
pub use collect::{Collector, RunOptions, SkipReason, Summary};
pub use command::{CollectOptions, CollectStatic};
pub use config::{Config, StaticDir};
pub use error::{CollectError, StorageError};
pub use exclusion::IgnorePatterns;
pub use finders::{DiscoveredFile, Finder};
pub use storage::Storage;
pub use strategies::CollectMode;

// vim: ts=4

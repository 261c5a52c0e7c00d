//! Exclusion of discovered files by ignore pattern

mod patterns;

pub use patterns::{IgnorePatterns, DEFAULT_IGNORE_PATTERNS};

// vim: ts=4

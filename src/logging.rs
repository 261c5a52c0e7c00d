//! Logging prelude module for convenient access to tracing macros.
//!
//! Diagnostics go to stderr through `tracing`. The operator-facing console
//! report is written separately (see [`crate::report`]) so the two never mix
//! unless `RUST_LOG` asks for it.
//!
//! # Usage
//!
//! ```ignore
//! use crate::logging::*;
//!
//! info!("Collecting from {} finders", count);
//! debug!(path = %destination, "skipping");
//! ```

pub use tracing::{debug, info, warn};

/// Initialize the tracing subscriber with environment filter support.
///
/// By default only warnings and errors are displayed. Control the log level
/// with the `RUST_LOG` environment variable:
///
/// ```bash
/// RUST_LOG=debug collectstatic --noinput
/// RUST_LOG=collectstatic::collect=trace collectstatic --noinput
/// ```
pub fn init_tracing() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
		)
		.with_writer(std::io::stderr)
		.init();
}

//! Modification-time staleness policy

use std::time::SystemTime;

use crate::logging::*;
use crate::storage::Storage;

/// Whether the source file is newer than the destination entry
///
/// - Source time unavailable: treated as the epoch, so never newer.
/// - Destination time unavailable: reported as changed; an unreadable
///   destination timestamp must never cause a silent skip.
/// - Otherwise changed iff source is strictly newer.
pub fn has_changed(
	source: &dyn Storage,
	source_name: &str,
	destination: &dyn Storage,
	destination_name: &str,
) -> bool {
	let source_modified = match source.modified_time(source_name) {
		Ok(time) => time,
		Err(e) => {
			debug!("No modification time for source {}: {}", source_name, e);
			SystemTime::UNIX_EPOCH
		}
	};

	let destination_modified = match destination.modified_time(destination_name) {
		Ok(time) => time,
		Err(e) => {
			debug!("No modification time for destination {}: {}", destination_name, e);
			return true;
		}
	};

	source_modified > destination_modified
}


// vim: ts=4

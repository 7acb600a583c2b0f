//! Record selection.
//!
//! Scans raw STEP text for records of the shape
//!
//! ```text
//! #<id> = <IFCTYPE>(<args>);
//! ```
//!
//! and yields only those whose (upper-cased) type is of interest to the
//! registry. The scan is permissive: anything that does not match the shape
//! (headers, comments, unterminated records) is skipped without error.

use std::sync::LazyLock;

use regex::{CaptureMatches, Regex};

use crate::model::{RawRecord, UNRESOLVED_ID};
use crate::registry::TypeRegistry;

/// `#id = TYPE ( args ) ;`, args non-greedy and allowed to span lines.
static RECORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)#([0-9]+)\s*=\s*(\w+)\s*\((.*?)\);").expect("Invalid regex")
});

/// Lazy iterator over the records of interest, in source order.
pub struct SelectedRecords<'t, 'r> {
    matches: CaptureMatches<'static, 't>,
    registry: &'r TypeRegistry,
}

impl Iterator for SelectedRecords<'_, '_> {
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        for caps in self.matches.by_ref() {
            let source_type = caps[2].to_ascii_uppercase();
            if !self.registry.is_of_interest(&source_type) {
                continue;
            }

            let id = match caps[1].parse::<u64>() {
                Ok(id) if id != UNRESOLVED_ID => id,
                _ => {
                    tracing::trace!(raw_id = &caps[1], "skipping record with out-of-range id");
                    continue;
                }
            };

            return Some(RawRecord {
                id,
                source_type,
                args: caps[3].to_string(),
            });
        }
        None
    }
}

/// Select records of interest from `text`.
pub fn select_records<'t, 'r>(text: &'t str, registry: &'r TypeRegistry) -> SelectedRecords<'t, 'r> {
    SelectedRecords {
        matches: RECORD_PATTERN.captures_iter(text),
        registry,
    }
}

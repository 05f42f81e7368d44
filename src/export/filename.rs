//! Download filename computation
//!
//! Single-date exports get today's date appended before the extension.
//! Multi-date-range exports already carry an explicit `start_to_end` suffix
//! and are left alone.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn range_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\d{4}-\d{2}-\d{2}_to_\d{4}-\d{2}-\d{2}$").expect("valid range-suffix regex")
    })
}

/// True when the base name ends in an explicit `YYYY-MM-DD_to_YYYY-MM-DD`
/// date-range suffix
pub fn has_range_suffix(base: &str) -> bool {
    range_suffix().is_match(base)
}

/// Compute the final download filename for a base name and extension
pub fn stamped(base: &str, extension: &str, today: NaiveDate) -> String {
    if has_range_suffix(base) {
        format!("{base}.{extension}")
    } else {
        format!("{}_{}.{}", base, today.format("%Y-%m-%d"), extension)
    }
}

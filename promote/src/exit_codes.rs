//! Stable exit codes for promote CLI commands.

/// Command succeeded. Unmatched targets and skipped files do not change this.
pub const OK: i32 = 0;
/// Command failed: bad config, unreadable or unsupported ledger, or a
/// filesystem error while promoting.
pub const FAILED: i32 = 1;

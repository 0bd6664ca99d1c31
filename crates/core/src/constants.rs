/// Shares delivered per option contract
pub const SHARES_PER_CONTRACT: i64 = 100;

/// Seconds allowed for a live quote lookup before falling back to cache
pub const QUOTE_FETCH_TIMEOUT_SECS: u64 = 5;

/// Month key format used by portfolio breakdowns
pub const MONTH_KEY_FORMAT: &str = "%Y-%m";

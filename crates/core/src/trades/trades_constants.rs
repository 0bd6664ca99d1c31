/// Trade lifecycle statuses
///
/// Each constant is the canonical storage string for one lifecycle state.
/// Status moves one way in normal use: OPEN into exactly one of the
/// four terminal-or-handoff states.

/// Contract is live; premium collected, obligation outstanding.
pub const TRADE_STATUS_OPEN: &str = "OPEN";

/// Contract lapsed worthless. Full premium kept, no shares moved.
pub const TRADE_STATUS_EXPIRED: &str = "EXPIRED";

/// Contract exercised against us. Shares were put to us (CSP) or called
/// away (CC); the position book changes alongside.
pub const TRADE_STATUS_ASSIGNED: &str = "ASSIGNED";

/// Contract bought back early for a debit.
pub const TRADE_STATUS_CLOSED: &str = "CLOSED";

/// Contract bought back and replaced by a child trade in the same chain.
pub const TRADE_STATUS_ROLLED: &str = "ROLLED";

/// Trade types
///
/// The wheel alternates between the two.

/// Cash-secured put: collateral held, assignment acquires shares.
pub const TRADE_TYPE_CSP: &str = "CSP";

/// Covered call: written against held shares, assignment releases them.
pub const TRADE_TYPE_CC: &str = "CC";

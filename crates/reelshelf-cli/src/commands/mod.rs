pub mod browse;
pub mod config;
pub mod context;
pub mod progress;
pub mod shared;
pub mod watchlist;

pub use context::AppContext;

/// Page-level message when the watchlist cannot be shown
pub const WATCHLIST_LOAD_FAILED: &str = "Failed to load watchlist. Please try again later.";
/// Page-level message for a link that does not decode
pub const SHARED_LINK_INVALID: &str = "This shared watchlist link is invalid or has expired.";

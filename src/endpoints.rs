//! SideShift REST API endpoint path constants.

/// List supported coins.
pub const COINS: &str = "/coins";
/// Coin icon lookup; append `/{coin}`.
pub const COIN_ICON: &str = "/coins/icon";
/// Account permissions for the caller's region.
pub const PERMISSIONS: &str = "/permissions";
/// Single pair quote; append `/{from}/{to}`.
pub const PAIR: &str = "/pair";
/// Bulk pair quotes.
pub const PAIRS: &str = "/pairs";
/// Shift lookup (append `/{shiftId}`) and bulk lookup via `?ids=`.
pub const SHIFTS: &str = "/shifts";
/// Recently completed shifts.
pub const RECENT_SHIFTS: &str = "/recent-shifts";
/// XAI token statistics.
pub const XAI_STATS: &str = "/xai/stats";
/// The caller's affiliate account.
pub const ACCOUNT: &str = "/account";
/// Checkout creation (POST) and lookup (append `/{checkoutId}`).
pub const CHECKOUT: &str = "/checkout";
/// Request a fixed-rate quote.
pub const QUOTES: &str = "/quotes";
/// Create a fixed shift from a quote.
pub const SHIFTS_FIXED: &str = "/shifts/fixed";
/// Create a variable shift.
pub const SHIFTS_VARIABLE: &str = "/shifts/variable";
/// Suffix for setting a refund address; prepend `/shifts/{shiftId}`.
pub const SET_REFUND_ADDRESS: &str = "/set-refund-address";
/// Cancel an order; may acknowledge with a bodiless 204.
pub const CANCEL_ORDER: &str = "/cancel-order";

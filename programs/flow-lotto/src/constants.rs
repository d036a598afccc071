use std::time::Duration;

// Amounts
// =======

/// Number of fraction digits in the ledger's UFix64 amounts.
pub const FLOW_DECIMALS: u32 = 8;

/// Base units per 1.0 FLOW.
pub const UFIX64_SCALE: u64 = 100_000_000;

/// Smallest ticket price the create form accepts (0.1 FLOW).
pub const MIN_TICKET_PRICE: u64 = UFIX64_SCALE / 10;

// Tickets
// =======

/// Per-wallet ticket cap enforced by the contract.
pub const MAX_TICKETS_PER_WALLET: u64 = 3;

// Prize policy
// ============

pub const BPS_DENOMINATOR: u16 = 10_000;

/// 85% of the pool.
pub const DEFAULT_WINNER_BPS: u16 = 8_500;
/// 10% of the pool.
pub const DEFAULT_CREATOR_BPS: u16 = 1_000;
/// 2.5% of the pool.
pub const DEFAULT_PLATFORM_BPS: u16 = 250;
/// 2.5% of the pool, paid to whoever submits the close.
pub const DEFAULT_CLOSER_BPS: u16 = 250;

// Time
// ====

pub const MILLIS_PER_SECOND: i64 = 1_000;

/// Default session length offered by the create form.
pub const DEFAULT_SESSION_DURATION_SECS: i64 = 24 * 60 * 60;

/// Countdown refresh cadence.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

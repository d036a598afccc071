//! Session lifecycle and prize accounting for the Flow lotto front end.
//!
//! Every function here is pure over a session snapshot and an explicit `now`.
//! Fetching snapshots and submitting transactions stay with the caller.

pub mod aggregate;
pub mod amount;
pub mod config;
pub mod constants;
pub mod countdown;
pub mod eligibility;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod lifecycle;
pub mod prize;
pub mod state;

pub use aggregate::*;
pub use amount::*;
pub use config::*;
pub use constants::*;
pub use countdown::*;
pub use eligibility::*;
pub use error::*;
pub use instructions::*;
pub use ledger::*;
pub use lifecycle::*;
pub use prize::*;
pub use state::*;

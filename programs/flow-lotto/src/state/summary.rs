use anchor_lang::prelude::*;

/// Everything one wallet has done across a set of sessions.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UserSessionsSummary {
    /// Sessions the wallet created, bought into, or won, in input order.
    pub session_ids: Vec<u64>,
    pub sessions_created: u64,
    pub total_tickets: u64,
    /// UFix64 units.
    pub total_spent: u64,
    pub active: u64,
    pub expired: u64,
    pub closed: u64,
    pub winner_picked: u64,
    pub completed: u64,
    pub unknown: u64,
    pub sessions_won: u64,
    /// Winner shares of the won sessions, UFix64 units.
    pub total_won: u64,
}

use anchor_lang::prelude::*;

/// Per-wallet purchase standing in one session. Derived, never persisted.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserTicketStatus {
    pub current_tickets: u64,
    pub max_tickets: u64,
    pub remaining_tickets: u64,
    pub can_buy_more: bool,
}

impl UserTicketStatus {
    /// How many tickets a purchase form should offer by default.
    pub fn purchasable(&self) -> u64 {
        if self.can_buy_more {
            self.remaining_tickets
        } else {
            0
        }
    }
}

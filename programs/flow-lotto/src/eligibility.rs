use anchor_lang::prelude::*;
use tracing::debug;

use crate::{
    constants::MAX_TICKETS_PER_WALLET,
    error::LottoError,
    lifecycle::derive_state,
    state::{Session, SessionState, UserTicketStatus, WalletAddress},
};

/// What a purchase that passed the pre-flight checks will do.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PurchaseQuote {
    pub ticket_count: u64,
    /// UFix64 units the buyer pays.
    pub cost: u64,
    pub tickets_after: u64,
}

/// Ticket standing of `wallet` under the contract's per-wallet cap.
/// Defined for any wallet, including ones that never bought.
pub fn ticket_status(session: &Session, wallet: &WalletAddress, now_secs: i64) -> UserTicketStatus {
    ticket_status_with_cap(session, wallet, now_secs, MAX_TICKETS_PER_WALLET)
}

pub fn ticket_status_with_cap(
    session: &Session,
    wallet: &WalletAddress,
    now_secs: i64,
    max_tickets: u64,
) -> UserTicketStatus {
    let current_tickets = session.tickets_of(wallet);
    let remaining_tickets = max_tickets.saturating_sub(current_tickets);
    UserTicketStatus {
        current_tickets,
        max_tickets,
        remaining_tickets,
        can_buy_more: remaining_tickets > 0 && derive_state(session, now_secs).is_purchasable(),
    }
}

/// Local rejection of purchases the ledger would refuse anyway.
///
/// Passing this does not mean the transaction will land; the contract remains
/// the authority. It only saves a round trip for requests that cannot succeed.
pub fn check_purchase(
    session: &Session,
    wallet: &WalletAddress,
    ticket_count: u64,
    now_secs: i64,
) -> Result<PurchaseQuote> {
    require!(ticket_count > 0, LottoError::InvalidTicketCount);

    let status = derive_state(session, now_secs);
    if status.state != SessionState::Active {
        debug!(session_id = session.session_id, state = %status.state, "purchase rejected");
        return err!(LottoError::SessionNotActive);
    }
    if status.visually_expired {
        debug!(session_id = session.session_id, now_secs, "purchase rejected after end time");
        return err!(LottoError::SessionEnded);
    }

    let standing = ticket_status(session, wallet, now_secs);
    require!(
        ticket_count <= standing.remaining_tickets,
        LottoError::PurchaseExceedsCap
    );

    let cost = ticket_count
        .checked_mul(session.ticket_price)
        .ok_or(LottoError::Overflow)?;

    Ok(PurchaseQuote {
        ticket_count,
        cost,
        tickets_after: standing.current_tickets + ticket_count,
    })
}

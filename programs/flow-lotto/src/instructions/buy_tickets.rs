use anchor_lang::prelude::*;
use tracing::info;

use crate::{
    eligibility::check_purchase,
    error::LottoError,
    state::{Session, WalletAddress},
};

/// Record of a purchase applied to a local snapshot.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TicketsPurchased {
    /// The session the tickets were bought in
    pub session_id: u64,
    /// The buyer's address
    pub buyer: WalletAddress,
    /// Number of tickets purchased
    pub ticket_count: u64,
    /// Total amount paid in UFix64 units
    pub payment_amount: u64,
    /// Buyer's holding after the purchase
    pub tickets_after: u64,
}

/// Applies a ticket purchase to a session snapshot, the way the contract will
/// once the transaction lands.
///
/// # Checks
/// Everything in [`check_purchase`]: positive count, session Active and before
/// its end time, buyer stays within the per-wallet cap.
///
/// # State Changes
/// - `participant_tickets[buyer]` grows by `ticket_count`
/// - `total_pool` grows by `ticket_count * ticket_price`
///
/// The snapshot is left untouched when any check fails.
pub fn buy_tickets(
    session: &mut Session,
    buyer: &WalletAddress,
    ticket_count: u64,
    now_secs: i64,
) -> Result<TicketsPurchased> {
    let quote = check_purchase(session, buyer, ticket_count, now_secs)?;

    let total_pool = session
        .total_pool
        .checked_add(quote.cost)
        .ok_or(LottoError::Overflow)?;

    session
        .participant_tickets
        .insert(buyer.clone(), quote.tickets_after);
    session.total_pool = total_pool;

    info!(
        session_id = session.session_id,
        buyer = %buyer,
        ticket_count,
        payment_amount = quote.cost,
        "tickets purchased"
    );

    Ok(TicketsPurchased {
        session_id: session.session_id,
        buyer: buyer.clone(),
        ticket_count,
        payment_amount: quote.cost,
        tickets_after: quote.tickets_after,
    })
}

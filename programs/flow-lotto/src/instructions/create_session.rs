use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use tracing::info;

use crate::{
    constants::{DEFAULT_SESSION_DURATION_SECS, MIN_TICKET_PRICE},
    error::LottoError,
    state::{LifecycleTag, Session, SessionState, TagEncoding, WalletAddress},
};

/// Inputs of the create transaction.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct CreateSessionParams {
    /// Next id in the creator's session manager
    pub session_id: u64,
    /// The wallet signing the create transaction
    pub creator: WalletAddress,
    /// Price per ticket in UFix64 units
    pub ticket_price: u64,
    /// When ticket sales stop, Unix seconds
    pub end_time: i64,
}

/// End time the create form starts with: one day from `now_secs`.
pub fn default_end_time(now_secs: i64) -> i64 {
    now_secs.saturating_add(DEFAULT_SESSION_DURATION_SECS)
}

/// Checks create parameters the same way the form does and builds the session the
/// contract will store.
///
/// # Validation
/// 1. Ticket price is at least 0.1 FLOW
/// 2. End time lies in the future
///
/// # State
/// - Active, empty participant map, zero pool
/// - `created_at` is `now_secs`
pub fn create_session(
    params: CreateSessionParams,
    encoding: TagEncoding,
    now_secs: i64,
) -> Result<Session> {
    require!(params.ticket_price > 0, LottoError::InvalidTicketPrice);
    require!(
        params.ticket_price >= MIN_TICKET_PRICE,
        LottoError::TicketPriceTooLow
    );
    require!(params.end_time > now_secs, LottoError::EndTimeInPast);

    let session = Session {
        session_id: params.session_id,
        creator: params.creator,
        ticket_price: params.ticket_price,
        created_at: now_secs,
        end_time: params.end_time,
        participant_tickets: BTreeMap::new(),
        total_pool: 0,
        lifecycle_tag: LifecycleTag::for_state(SessionState::Active, encoding)?,
        winner: None,
        closer: None,
        prizes_distributed: false,
    };
    session.validate()?;

    info!(
        session_id = session.session_id,
        creator = %session.creator,
        ticket_price = session.ticket_price,
        end_time = session.end_time,
        "session created"
    );
    Ok(session)
}

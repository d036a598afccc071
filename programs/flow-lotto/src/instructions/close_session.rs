use anchor_lang::prelude::*;
use tracing::info;

use crate::{
    error::LottoError,
    lifecycle::{derive_state, ledger_state},
    prize::{PrizeShares, PrizeSplit},
    state::{LifecycleTag, Session, SessionState, WalletAddress},
};

/// Record of a close applied to a local snapshot.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SessionClosed {
    pub session_id: u64,
    /// Wallet that submitted the close
    pub closer: WalletAddress,
    /// Wallet drawn by the contract
    pub winner: WalletAddress,
    /// What the closer is owed once prizes go out, UFix64 units
    pub closer_reward: u64,
}

/// Record of the payout that finishes a session.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PrizesDistributed {
    pub session_id: u64,
    pub winner: WalletAddress,
    pub creator: WalletAddress,
    pub closer: WalletAddress,
    pub split: PrizeSplit,
}

/// Reward shown on the close button before anyone has closed the session.
pub fn closer_reward(session: &Session, shares: &PrizeShares) -> u64 {
    shares.split(session.total_pool).closer
}

/// Applies a close to a session snapshot. The winner comes from the contract's
/// randomness; this only records it.
///
/// # Checks
/// 1. Ledger tag is readable and the session has not been closed already
/// 2. Session is expired, either by tag or because its end time has passed
/// 3. Somebody bought a ticket, and the winner is one of the buyers
///
/// # State Changes
/// - `closer` and `winner` are set
/// - Lifecycle advances to WinnerPicked
pub fn close_session(
    session: &mut Session,
    closer: &WalletAddress,
    winner: &WalletAddress,
    shares: &PrizeShares,
    now_secs: i64,
) -> Result<SessionClosed> {
    let status = derive_state(session, now_secs);
    if let SessionState::Unknown(_) = status.state {
        return err!(LottoError::UnknownLifecycleTag);
    }
    require!(!status.state.is_closed(), LottoError::AlreadyClosed);
    require!(
        status.effective_state() == SessionState::Expired,
        LottoError::SessionNotExpired
    );
    require!(session.participant_count() > 0, LottoError::NoParticipants);
    require!(
        session.tickets_of(winner) > 0,
        LottoError::WinnerNotParticipant
    );

    let tag =
        LifecycleTag::for_state(SessionState::WinnerPicked, session.lifecycle_tag.encoding)?;
    session.closer = Some(closer.clone());
    session.winner = Some(winner.clone());
    session.lifecycle_tag = tag;

    let reward = closer_reward(session, shares);
    info!(
        session_id = session.session_id,
        closer = %closer,
        winner = %winner,
        closer_reward = reward,
        "session closed"
    );

    Ok(SessionClosed {
        session_id: session.session_id,
        closer: closer.clone(),
        winner: winner.clone(),
        closer_reward: reward,
    })
}

/// Pays out a session whose winner has been picked.
///
/// # State Changes
/// - Lifecycle advances to Completed
/// - `prizes_distributed` is set
pub fn distribute_prizes(session: &mut Session, shares: &PrizeShares) -> Result<PrizesDistributed> {
    match ledger_state(session) {
        SessionState::WinnerPicked => {}
        SessionState::Completed => return err!(LottoError::AlreadyClosed),
        SessionState::Unknown(_) => return err!(LottoError::UnknownLifecycleTag),
        _ => return err!(LottoError::WinnerNotPicked),
    }

    // WinnerPicked passed the integrity checks, so both are present.
    let winner = session.winner.clone().ok_or(LottoError::WinnerNotPicked)?;
    let closer = session.closer.clone().ok_or(LottoError::WinnerNotPicked)?;

    session.lifecycle_tag =
        LifecycleTag::for_state(SessionState::Completed, session.lifecycle_tag.encoding)?;
    session.prizes_distributed = true;

    let split = shares.split(session.total_pool);
    info!(
        session_id = session.session_id,
        winner = %winner,
        winner_amount = split.winner,
        creator_amount = split.creator,
        platform_amount = split.platform,
        closer_amount = split.closer,
        "prizes distributed"
    );

    Ok(PrizesDistributed {
        session_id: session.session_id,
        winner,
        creator: session.creator.clone(),
        closer,
        split,
    })
}

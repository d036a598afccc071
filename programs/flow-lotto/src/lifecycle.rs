use anchor_lang::prelude::*;
use tracing::warn;

use crate::{
    constants::MILLIS_PER_SECOND,
    state::{Session, SessionState},
};

/// Ledger state next to what the wall clock says.
///
/// `state` is only ever what the ledger reports. Time passing can set
/// `visually_expired` but never moves `state`; that takes a close on chain.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionStatus {
    pub state: SessionState,
    /// Ledger still says Active but `end_time` has passed.
    pub visually_expired: bool,
}

impl SessionStatus {
    /// State the UI should render: a lagging Active tag past its deadline shows as Expired.
    pub fn effective_state(&self) -> SessionState {
        if self.visually_expired {
            SessionState::Expired
        } else {
            self.state
        }
    }

    pub fn is_purchasable(&self) -> bool {
        self.effective_state() == SessionState::Active
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.state, SessionState::Unknown(_))
    }
}

/// Decodes the ledger tag and checks the rest of the record agrees with it.
///
/// Anything contradictory comes back as `Unknown` carrying the raw tag, so the
/// caller can show an integrity warning instead of a wrong badge.
pub fn ledger_state(session: &Session) -> SessionState {
    let tag = session.lifecycle_tag.value;
    let state = session.lifecycle_tag.decode();

    if let SessionState::Unknown(_) = state {
        warn!(session_id = session.session_id, tag, "lifecycle tag out of range");
        return state;
    }

    if session.winner.is_some() && !state.is_at_least(SessionState::WinnerPicked) {
        warn!(session_id = session.session_id, %state, "winner set before a winner was picked");
        return SessionState::Unknown(tag);
    }

    // The four-state ledger has no separate Closed step.
    if session.closer.is_some() && !state.is_closed() {
        warn!(session_id = session.session_id, %state, "closer set on an open session");
        return SessionState::Unknown(tag);
    }

    if session.prizes_distributed && state != SessionState::Completed {
        warn!(session_id = session.session_id, %state, "prizes distributed before completion");
        return SessionState::Unknown(tag);
    }

    if state == SessionState::Completed && session.winner.is_none() {
        warn!(session_id = session.session_id, "completed session has no winner");
        return SessionState::Unknown(tag);
    }

    state
}

/// Ledger state cross-checked against `now_secs`.
pub fn derive_state(session: &Session, now_secs: i64) -> SessionStatus {
    let state = ledger_state(session);
    SessionStatus {
        state,
        visually_expired: state == SessionState::Active && now_secs >= session.end_time,
    }
}

/// Battery level for the status badge: 3 above two thirds of the window left,
/// 2 above one third, 1 below that, 0 once purchases are closed.
pub fn energy_level(session: &Session, now_ms: i64) -> u8 {
    if !derive_state(session, now_ms.div_euclid(MILLIS_PER_SECOND)).is_purchasable() {
        return 0;
    }

    let end_ms = session.end_time.saturating_mul(MILLIS_PER_SECOND);
    let total = end_ms.saturating_sub(session.created_at.saturating_mul(MILLIS_PER_SECOND));
    if total <= 0 {
        return 1;
    }
    let left = end_ms.saturating_sub(now_ms);

    // left / total > 2/3  <=>  3 * left > 2 * total
    let (left, total) = (left as i128, total as i128);
    if 3 * left > 2 * total {
        3
    } else if 3 * left > total {
        2
    } else {
        1
    }
}

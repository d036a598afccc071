use std::{collections::BTreeMap, fmt};

use anchor_lang::prelude::*;

use crate::{constants::MAX_TICKETS_PER_WALLET, error::LottoError, state::WalletAddress};

/// How the ledger numbers its lifecycle states.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TagEncoding {
    /// 0 Active, 1 Expired, 2 Closed, 3 WinnerPicked, 4 Completed.
    #[default]
    FiveState,
    /// 0 Active, 1 Expired, 2 WinnerPicked, 3 Completed.
    FourState,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    Active,
    Expired,
    /// Closed but no winner drawn yet. Only the five-state ledger reports it.
    Closed,
    WinnerPicked,
    Completed,
    /// Tag out of range, or fields that contradict the tag.
    Unknown(u8),
}

impl SessionState {
    /// Position in the forward-only lifecycle; `None` for `Unknown`.
    pub fn rank(&self) -> Option<u8> {
        match self {
            SessionState::Active => Some(0),
            SessionState::Expired => Some(1),
            SessionState::Closed => Some(2),
            SessionState::WinnerPicked => Some(3),
            SessionState::Completed => Some(4),
            SessionState::Unknown(_) => None,
        }
    }

    pub fn is_at_least(&self, other: SessionState) -> bool {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => a >= b,
            _ => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.is_at_least(SessionState::Closed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Active => "Active",
            SessionState::Expired => "Waiting to Close",
            SessionState::Closed => "Ready for Winner Selection",
            SessionState::WinnerPicked => "Winner Picked",
            SessionState::Completed => "Prizes Distributed",
            SessionState::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw lifecycle tag as reported by the ledger.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifecycleTag {
    pub value: u8,
    pub encoding: TagEncoding,
}

impl LifecycleTag {
    pub fn new(value: u8, encoding: TagEncoding) -> Self {
        Self { value, encoding }
    }

    /// Builds the tag the given encoding uses for `state`.
    pub fn for_state(state: SessionState, encoding: TagEncoding) -> Result<Self> {
        let value = match (encoding, state) {
            (_, SessionState::Active) => 0,
            (_, SessionState::Expired) => 1,
            (TagEncoding::FiveState, SessionState::Closed) => 2,
            (TagEncoding::FiveState, SessionState::WinnerPicked) => 3,
            (TagEncoding::FiveState, SessionState::Completed) => 4,
            (TagEncoding::FourState, SessionState::WinnerPicked) => 2,
            (TagEncoding::FourState, SessionState::Completed) => 3,
            _ => return err!(LottoError::UnknownLifecycleTag),
        };
        Ok(Self { value, encoding })
    }

    /// Plain decode. Integrity cross-checks against the rest of the record live in
    /// [`crate::lifecycle::ledger_state`].
    pub fn decode(&self) -> SessionState {
        match (self.encoding, self.value) {
            (_, 0) => SessionState::Active,
            (_, 1) => SessionState::Expired,
            (TagEncoding::FiveState, 2) => SessionState::Closed,
            (TagEncoding::FiveState, 3) => SessionState::WinnerPicked,
            (TagEncoding::FiveState, 4) => SessionState::Completed,
            (TagEncoding::FourState, 2) => SessionState::WinnerPicked,
            (TagEncoding::FourState, 3) => SessionState::Completed,
            (_, other) => SessionState::Unknown(other),
        }
    }
}

/// Read-only mirror of one lotto session as stored by the contract.
///
/// Amounts are UFix64 base units, timestamps are Unix seconds.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct Session {
    pub session_id: u64,
    pub creator: WalletAddress,
    pub ticket_price: u64,
    pub created_at: i64,
    pub end_time: i64,
    pub participant_tickets: BTreeMap<WalletAddress, u64>,
    pub total_pool: u64,
    pub lifecycle_tag: LifecycleTag,
    pub winner: Option<WalletAddress>,
    pub closer: Option<WalletAddress>,
    pub prizes_distributed: bool,
}

impl Session {
    /// Tickets held by `wallet`, 0 if it never bought any.
    pub fn tickets_of(&self, wallet: &WalletAddress) -> u64 {
        self.participant_tickets.get(wallet).copied().unwrap_or(0)
    }

    /// Saturates instead of overflowing on records that have not been validated.
    pub fn total_tickets(&self) -> u64 {
        self.participant_tickets
            .values()
            .fold(0u64, |total, count| total.saturating_add(*count))
    }

    pub fn participant_count(&self) -> usize {
        self.participant_tickets.len()
    }

    pub fn expected_pool(&self) -> Result<u64> {
        Ok(self
            .ticket_price
            .checked_mul(self.total_tickets())
            .ok_or(LottoError::Overflow)?)
    }

    pub fn is_creator(&self, wallet: &WalletAddress) -> bool {
        &self.creator == wallet
    }

    /// Rejects records that break the ledger's own invariants.
    pub fn validate(&self) -> Result<()> {
        require!(self.ticket_price > 0, LottoError::InvalidTicketPrice);
        require!(
            self.end_time > self.created_at,
            LottoError::InvalidSessionWindow
        );
        require!(
            self.participant_tickets
                .values()
                .all(|count| (1..=MAX_TICKETS_PER_WALLET).contains(count)),
            LottoError::TicketCountOutOfRange
        );
        require!(
            self.total_pool == self.expected_pool()?,
            LottoError::PoolMismatch
        );
        Ok(())
    }
}

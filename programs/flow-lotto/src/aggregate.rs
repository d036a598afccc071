use tracing::warn;

use crate::{
    lifecycle::ledger_state,
    prize::PrizeShares,
    state::{Session, SessionState, UserSessionsSummary, WalletAddress},
};

/// A wallet has won only once the prize has actually been paid out to it.
/// Records that fail the ledger integrity checks never count.
pub fn did_user_win(session: &Session, wallet: &WalletAddress) -> bool {
    session.prizes_distributed
        && session.winner.as_ref() == Some(wallet)
        && ledger_state(session) == SessionState::Completed
}

/// Folds every session `wallet` created, bought into, or won. An empty input
/// gives the all-zero summary.
pub fn summarize<'a, I>(sessions: I, wallet: &WalletAddress) -> UserSessionsSummary
where
    I: IntoIterator<Item = &'a Session>,
{
    summarize_with_shares(sessions, wallet, &PrizeShares::default())
}

/// [`summarize`] with winnings computed under a configured payout policy.
pub fn summarize_with_shares<'a, I>(
    sessions: I,
    wallet: &WalletAddress,
    shares: &PrizeShares,
) -> UserSessionsSummary
where
    I: IntoIterator<Item = &'a Session>,
{
    let mut summary = UserSessionsSummary::default();

    for session in sessions {
        let tickets = session.tickets_of(wallet);
        let created = session.is_creator(wallet);
        let won = did_user_win(session, wallet);
        if tickets == 0 && !created && session.winner.as_ref() != Some(wallet) {
            continue;
        }

        summary.session_ids.push(session.session_id);
        if created {
            summary.sessions_created += 1;
        }

        summary.total_tickets = summary.total_tickets.saturating_add(tickets);
        let spent = tickets.checked_mul(session.ticket_price).unwrap_or_else(|| {
            warn!(session_id = session.session_id, "ticket spend overflows, capping");
            u64::MAX
        });
        summary.total_spent = summary.total_spent.saturating_add(spent);

        match ledger_state(session) {
            SessionState::Active => summary.active += 1,
            SessionState::Expired => summary.expired += 1,
            SessionState::Closed => summary.closed += 1,
            SessionState::WinnerPicked => summary.winner_picked += 1,
            SessionState::Completed => summary.completed += 1,
            SessionState::Unknown(_) => summary.unknown += 1,
        }

        if won {
            summary.sessions_won += 1;
            summary.total_won = summary
                .total_won
                .saturating_add(shares.split(session.total_pool).winner);
        }
    }

    summary
}

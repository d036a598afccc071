use std::collections::BTreeMap;

use flow_lotto::{
    buy_tickets, check_purchase, close_session, derive_state, did_user_win, distribute_prizes,
    format_flow, parse_ufix64, split, summarize, ticket_status, time_remaining, LifecycleTag,
    PrizeShares, Session, SessionState, TagEncoding, TimeRemaining, UserSessionsSummary,
    WalletAddress, MAX_TICKETS_PER_WALLET,
};

const NOW: i64 = 1_700_000_000;

fn session(tag: u8, end_time: i64) -> Session {
    Session {
        session_id: 1,
        creator: WalletAddress::new("0xf8d6e0586b0a20c7"),
        ticket_price: parse_ufix64("1.0").unwrap(),
        created_at: NOW - 3_600,
        end_time,
        participant_tickets: BTreeMap::new(),
        total_pool: 0,
        lifecycle_tag: LifecycleTag::new(tag, TagEncoding::FiveState),
        winner: None,
        closer: None,
        prizes_distributed: false,
    }
}

#[test]
fn scenario_a_three_tickets_split() {
    let mut s = session(0, NOW + 600);
    let buyer = WalletAddress::new("0x01cf0e2f2f715450");
    buy_tickets(&mut s, &buyer, 3, NOW).unwrap();
    assert_eq!(format_flow(s.total_pool, 1), "3.0");

    let shares = split(s.total_pool);
    assert_eq!(format_flow(shares.winner, 2), "2.55");
    assert_eq!(format_flow(shares.creator, 2), "0.30");
    assert_eq!(format_flow(shares.platform, 3), "0.075");
    assert_eq!(format_flow(shares.closer, 3), "0.075");
    assert_eq!(shares.total(), s.total_pool);
}

#[test]
fn scenario_b_ledger_and_clock_disagree() {
    let s = session(0, NOW - 1);
    let status = derive_state(&s, NOW);
    assert_eq!(status.state, SessionState::Active);
    assert!(status.visually_expired);
    assert_eq!(time_remaining(s.end_time, NOW * 1_000), TimeRemaining::Ended);
}

#[test]
fn scenario_c_full_wallet_cannot_buy() {
    let wallet = WalletAddress::new("0xa1");
    for tag in [0, 1, 2, 3] {
        let mut s = session(tag, NOW + 600);
        s.participant_tickets.insert(wallet.clone(), MAX_TICKETS_PER_WALLET);
        s.total_pool = MAX_TICKETS_PER_WALLET * s.ticket_price;

        let status = ticket_status(&s, &wallet, NOW);
        assert!(!status.can_buy_more);
        assert_eq!(status.remaining_tickets, 0);
    }
}

#[test]
fn scenario_d_empty_summary() {
    let summary = summarize(Vec::<Session>::new().iter(), &WalletAddress::new("0xa1"));
    assert_eq!(summary, UserSessionsSummary::default());
    assert!(summary.session_ids.is_empty());
}

#[test]
fn scenario_e_drawn_but_unpaid_is_not_a_win() {
    let wallet = WalletAddress::new("0xa1");
    let mut s = session(3, NOW - 10);
    s.participant_tickets.insert(wallet.clone(), 1);
    s.total_pool = s.ticket_price;
    s.winner = Some(WalletAddress::new("0xA1"));
    s.closer = Some(WalletAddress::new("0xb2"));

    assert!(!did_user_win(&s, &wallet));
    assert_eq!(summarize([&s], &wallet).sessions_won, 0);
}

#[test]
fn split_reconciles_for_every_pool() {
    let mut pool = 0u64;
    while pool < 10_000_000_000_000 {
        let shares = split(pool);
        assert_eq!(
            shares.winner + shares.creator + shares.platform + shares.closer,
            pool
        );
        assert_eq!(split(pool), shares);
        pool = pool * 7 + 13;
    }
}

#[test]
fn state_never_moves_backwards_as_time_passes() {
    for tag in 0..=5u8 {
        let s = session(tag, NOW);
        let mut previous: Option<u8> = None;
        for now in NOW - 5..NOW + 5 {
            let rank = derive_state(&s, now).effective_state().rank();
            if let (Some(before), Some(after)) = (previous, rank) {
                assert!(after >= before, "tag {tag} regressed at {now}");
            }
            previous = rank.or(previous);
        }
    }
}

#[test]
fn unseen_wallet_has_full_allowance_and_is_pure() {
    let s = session(0, NOW + 600);
    let stranger = WalletAddress::new("0x9999");
    let first = ticket_status(&s, &stranger, NOW);
    assert_eq!(first.current_tickets, 0);
    assert_eq!(first.remaining_tickets, MAX_TICKETS_PER_WALLET);
    assert_eq!(ticket_status(&s, &stranger, NOW), first);
}

#[test]
fn oversized_purchase_is_rejected_before_submission() {
    let s = session(0, NOW + 600);
    let wallet = WalletAddress::new("0xa1");
    assert!(check_purchase(&s, &wallet, MAX_TICKETS_PER_WALLET + 1, NOW).is_err());
    assert!(check_purchase(&s, &wallet, MAX_TICKETS_PER_WALLET, NOW).is_ok());
}

#[test]
fn session_runs_from_purchase_to_payout() {
    let shares = PrizeShares::default();
    let alice = WalletAddress::new("0xA1");
    let bob = WalletAddress::new("0xB2");
    let closer = WalletAddress::new("0xD4");
    let mut s = session(0, NOW + 60);

    buy_tickets(&mut s, &alice, 2, NOW).unwrap();
    buy_tickets(&mut s, &bob, 1, NOW + 1).unwrap();
    assert!(close_session(&mut s, &closer, &alice, &shares, NOW + 59).is_err());

    close_session(&mut s, &closer, &alice, &shares, NOW + 60).unwrap();
    assert_eq!(derive_state(&s, NOW + 61).state, SessionState::WinnerPicked);
    distribute_prizes(&mut s, &shares).unwrap();

    let summary = summarize([&s], &alice);
    assert_eq!(summary.total_tickets, 2);
    assert_eq!(summary.total_spent, 200_000_000);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.sessions_won, 1);
    assert_eq!(summary.total_won, 255_000_000);

    let bob_summary = summarize([&s], &bob);
    assert_eq!(bob_summary.sessions_won, 0);
    assert_eq!(bob_summary.total_won, 0);
}

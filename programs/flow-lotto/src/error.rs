use anchor_lang::error_code;

#[error_code]
pub enum LottoError {
    Overflow,
    InvalidAmount,
    InvalidTicketCount,
    SessionNotActive,
    SessionNotExpired,
    NoParticipants,
    #[msg("Ticket price must be greater than zero")]
    InvalidTicketPrice,
    #[msg("Ticket price is below the minimum of 0.1 FLOW")]
    TicketPriceTooLow,
    #[msg("End time must be after the creation time")]
    InvalidSessionWindow,
    #[msg("End time must be in the future")]
    EndTimeInPast,
    #[msg("Session has ended")]
    SessionEnded,
    #[msg("Executing this purchase would exceed the per-wallet ticket limit. Please buy fewer tickets.")]
    PurchaseExceedsCap,
    #[msg("Participant ticket count is outside the allowed range")]
    TicketCountOutOfRange,
    #[msg("Total pool does not match ticket price times tickets sold")]
    PoolMismatch,
    #[msg("Session has already been closed")]
    AlreadyClosed,
    #[msg("Winner does not hold any tickets in this session")]
    WinnerNotParticipant,
    #[msg("Winner has not been picked yet")]
    WinnerNotPicked,
    #[msg("Prize shares must add up to 10000 basis points")]
    InvalidPrizeShares,
    #[msg("Lifecycle tag is not recognized")]
    UnknownLifecycleTag,
    #[msg("Ledger returned data that could not be decoded")]
    MalformedLedgerData,
    #[msg("Unrecognized network name")]
    UnknownNetwork,
}

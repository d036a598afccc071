use anchor_lang::prelude::*;

use crate::{
    amount::truncate_units,
    constants::{
        BPS_DENOMINATOR, DEFAULT_CLOSER_BPS, DEFAULT_CREATOR_BPS, DEFAULT_PLATFORM_BPS,
        DEFAULT_WINNER_BPS,
    },
    error::LottoError,
};

/// Percentages paid out on close, in basis points. Only [`PrizeShares::new`] and
/// `Default` build one in code.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrizeShares {
    winner_bps: u16,
    creator_bps: u16,
    platform_bps: u16,
    closer_bps: u16,
}

impl Default for PrizeShares {
    fn default() -> Self {
        Self {
            winner_bps: DEFAULT_WINNER_BPS,
            creator_bps: DEFAULT_CREATOR_BPS,
            platform_bps: DEFAULT_PLATFORM_BPS,
            closer_bps: DEFAULT_CLOSER_BPS,
        }
    }
}

impl PrizeShares {
    pub fn new(winner_bps: u16, creator_bps: u16, platform_bps: u16, closer_bps: u16) -> Result<Self> {
        let total = [winner_bps, creator_bps, platform_bps, closer_bps]
            .iter()
            .map(|bps| u32::from(*bps))
            .sum::<u32>();
        require!(
            total == u32::from(BPS_DENOMINATOR),
            LottoError::InvalidPrizeShares
        );
        Ok(Self {
            winner_bps,
            creator_bps,
            platform_bps,
            closer_bps,
        })
    }

    pub fn winner_bps(&self) -> u16 {
        self.winner_bps
    }

    pub fn creator_bps(&self) -> u16 {
        self.creator_bps
    }

    pub fn platform_bps(&self) -> u16 {
        self.platform_bps
    }

    pub fn closer_bps(&self) -> u16 {
        self.closer_bps
    }

    /// Floors every non-winner share; whatever is left over goes to the winner,
    /// so the four amounts always add up to `total_pool`.
    ///
    /// Shares decoded from bytes skip `new`, so each fee is capped at what is
    /// still unassigned.
    pub fn split(&self, total_pool: u64) -> PrizeSplit {
        let mut left = total_pool;
        let mut take = |bps: u16| {
            let share = share_of(total_pool, bps).min(left);
            left -= share;
            share
        };
        let creator = take(self.creator_bps);
        let platform = take(self.platform_bps);
        let closer = take(self.closer_bps);
        PrizeSplit {
            winner: left,
            creator,
            platform,
            closer,
        }
    }
}

fn share_of(amount: u64, bps: u16) -> u64 {
    let share = u128::from(amount) * u128::from(bps) / u128::from(BPS_DENOMINATOR);
    u64::try_from(share).unwrap_or(u64::MAX)
}

/// Payout of one pool, UFix64 units.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrizeSplit {
    pub winner: u64,
    pub creator: u64,
    pub platform: u64,
    pub closer: u64,
}

impl PrizeSplit {
    pub fn total(&self) -> u64 {
        self.winner
            .saturating_add(self.creator)
            .saturating_add(self.platform)
            .saturating_add(self.closer)
    }

    /// Display split at `decimals` fraction digits that still reconciles: the
    /// pool and the fee shares are truncated, the winner takes the difference.
    pub fn rounded_to(&self, decimals: u32) -> PrizeSplit {
        let pool = truncate_units(self.total(), decimals);
        let creator = truncate_units(self.creator, decimals);
        let platform = truncate_units(self.platform, decimals);
        let closer = truncate_units(self.closer, decimals);
        PrizeSplit {
            winner: pool
                .saturating_sub(creator)
                .saturating_sub(platform)
                .saturating_sub(closer),
            creator,
            platform,
            closer,
        }
    }
}

/// Split with the contract's standing 85 / 10 / 2.5 / 2.5 policy.
pub fn split(total_pool: u64) -> PrizeSplit {
    PrizeShares::default().split(total_pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_on_three_flow() {
        let s = split(300_000_000);
        assert_eq!(s.winner, 255_000_000);
        assert_eq!(s.creator, 30_000_000);
        assert_eq!(s.platform, 7_500_000);
        assert_eq!(s.closer, 7_500_000);
        assert_eq!(s.total(), 300_000_000);
    }

    #[test]
    fn residual_units_go_to_the_winner() {
        let s = split(1);
        assert_eq!(s, PrizeSplit { winner: 1, creator: 0, platform: 0, closer: 0 });

        let s = split(333);
        assert_eq!(s.creator, 33);
        assert_eq!(s.platform, 8);
        assert_eq!(s.closer, 8);
        assert_eq!(s.winner, 284);
    }

    #[test]
    fn shares_reconcile_across_pool_sizes() {
        let shares = PrizeShares::new(7_000, 2_000, 333, 667).unwrap();
        let mut pool = 0u64;
        while pool < u64::MAX / 3 {
            assert_eq!(split(pool).total(), pool);
            assert_eq!(shares.split(pool).total(), pool);
            pool = pool * 3 + 7;
        }
        assert_eq!(split(u64::MAX).total(), u64::MAX);
    }

    #[test]
    fn shares_must_cover_the_whole_pool() {
        assert!(PrizeShares::new(8_500, 1_000, 250, 249).is_err());
        assert!(PrizeShares::new(8_500, 1_000, 500, 0).is_ok());
        assert_eq!(
            PrizeShares::new(8_500, 1_000, 250, 250).unwrap(),
            PrizeShares::default()
        );
    }

    #[test]
    fn oversubscribed_shares_from_bytes_still_reconcile() {
        let bytes = [0u16, 6_000, 6_000, 0]
            .iter()
            .flat_map(|bps| bps.to_le_bytes())
            .collect::<Vec<u8>>();
        let shares = PrizeShares::try_from_slice(&bytes).unwrap();
        assert_eq!(shares.platform_bps(), 6_000);

        let s = shares.split(100);
        assert_eq!(s.creator, 60);
        assert_eq!(s.platform, 40);
        assert_eq!(s.closer, 0);
        assert_eq!(s.winner, 0);
        assert_eq!(s.total(), 100);

        let max = PrizeShares::try_from_slice(&[0xff; 8]).unwrap().split(u64::MAX);
        assert_eq!(max.total(), u64::MAX);
    }

    #[test]
    fn display_split_reconciles_at_two_decimals() {
        let shown = split(300_000_000).rounded_to(2);
        assert_eq!(shown.creator, 30_000_000);
        assert_eq!(shown.platform, 7_000_000);
        assert_eq!(shown.closer, 7_000_000);
        assert_eq!(shown.winner, 256_000_000);
        assert_eq!(shown.total(), 300_000_000);

        let shown = split(123_456_789).rounded_to(2);
        assert_eq!(shown.total(), 123_000_000);
    }
}

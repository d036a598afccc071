use anchor_lang::prelude::*;

use crate::{
    constants::{FLOW_DECIMALS, UFIX64_SCALE},
    error::LottoError,
};

/// Parses a UFix64 decimal string (`"3"`, `"3.0"`, `"0.12345678"`) into base units.
///
/// Signs are rejected outright: the ledger type is unsigned, so `"-1.0"` can only
/// come from corrupted data or a bad form value.
pub fn parse_ufix64(raw: &str) -> Result<u64> {
    let raw = raw.trim();
    let (whole, fraction) = match raw.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (raw, ""),
    };

    require!(!whole.is_empty(), LottoError::InvalidAmount);
    require!(
        fraction.len() <= FLOW_DECIMALS as usize,
        LottoError::InvalidAmount
    );
    require!(
        whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()),
        LottoError::InvalidAmount
    );

    let whole_units = whole
        .parse::<u64>()
        .map_err(|_| LottoError::Overflow)?
        .checked_mul(UFIX64_SCALE)
        .ok_or(LottoError::Overflow)?;

    let fraction_units = if fraction.is_empty() {
        0
    } else {
        let padding = FLOW_DECIMALS - fraction.len() as u32;
        fraction
            .parse::<u64>()
            .map_err(|_| LottoError::InvalidAmount)?
            * 10u64.pow(padding)
    };

    Ok(whole_units
        .checked_add(fraction_units)
        .ok_or(LottoError::Overflow)?)
}

/// Renders base units the way the ledger encodes them, e.g. `"3.00000000"`.
pub fn format_ufix64(units: u64) -> String {
    format!(
        "{}.{:0width$}",
        units / UFIX64_SCALE,
        units % UFIX64_SCALE,
        width = FLOW_DECIMALS as usize
    )
}

/// Display form truncated to `decimals` fraction digits (`format_flow(255_000_000, 2) == "2.55"`).
pub fn format_flow(units: u64, decimals: u32) -> String {
    let decimals = decimals.min(FLOW_DECIMALS);
    let whole = units / UFIX64_SCALE;
    if decimals == 0 {
        return whole.to_string();
    }
    let fraction = (units % UFIX64_SCALE) / 10u64.pow(FLOW_DECIMALS - decimals);
    format!("{}.{:0width$}", whole, fraction, width = decimals as usize)
}

/// Drops everything below `decimals` fraction digits.
pub fn truncate_units(units: u64, decimals: u32) -> u64 {
    let step = 10u64.pow(FLOW_DECIMALS - decimals.min(FLOW_DECIMALS));
    units - units % step
}

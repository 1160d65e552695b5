//! Rough block height estimation from a wallet birthday.
//!
//! The estimate assumes a perfectly regular block interval since genesis. It is only meant as a
//! starting point for a rescan, callers should start early enough to cover the error.

use bitcoin::{constants::genesis_block, Network};
use chrono::{DateTime, TimeDelta, Utc};

use crate::{
    constants::{AVERAGE_BLOCK_INTERVAL_SECS, BIRTHDAY_SAFETY_MARGIN_HOURS},
    errors::BirthdayError,
};

/// Estimates the height of the block mined around `birthday` on `network`.
///
/// Returns `0` for birthdays before genesis and for regtest, where heights carry no relation to
/// wall clock time.
pub fn estimate(birthday: DateTime<Utc>, network: Network) -> Result<u32, BirthdayError> {
    let genesis = match network {
        Network::Bitcoin | Network::Testnet => i64::from(genesis_block(network).header.time),
        Network::Regtest => return Ok(0),
        other => return Err(BirthdayError::UnknownNetwork(other)),
    };

    let elapsed = birthday.timestamp().saturating_sub(genesis);
    if elapsed <= 0 {
        return Ok(0);
    }

    Ok(u32::try_from(elapsed / AVERAGE_BLOCK_INTERVAL_SECS).unwrap_or(u32::MAX))
}

/// Same as [`estimate`] after moving `birthday` back by the safety margin.
pub fn estimate_with_margin(
    birthday: DateTime<Utc>,
    network: Network,
) -> Result<u32, BirthdayError> {
    let margin = TimeDelta::hours(BIRTHDAY_SAFETY_MARGIN_HOURS);
    let start = birthday.checked_sub_signed(margin).unwrap_or(birthday);
    estimate(start, network)
}

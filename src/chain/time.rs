use chrono::{DateTime, Utc};

use crate::chain::ChainSimulator;
use crate::error::{Error, Result};

/// Moves the dev chain so the next block lands at `target` (unix seconds).
///
/// Mines a block, asks the node to shift its clock by
/// `target - latest_timestamp`, then mines again. Returns the shift. A target
/// in the past gives a negative shift, which is the node's call to accept or
/// reject.
pub async fn advance_time(sim: &(impl ChainSimulator + ?Sized), target: u64) -> Result<i64> {
    sim.mine_block().await.map_err(Error::collaborator("evm_mine"))?;

    let current = sim
        .latest_timestamp()
        .await
        .map_err(Error::collaborator("latest block"))?;
    let delta = i128::from(target) - i128::from(current);
    let delta = i64::try_from(delta)
        .map_err(|_| Error::InvalidTimestamp(format!("cannot move from {} to {}", current, target)))?;

    if delta < 0 {
        log::warn!("moving block time backwards by {}s ({} -> {})", -delta, current, target);
    } else {
        log::debug!("advancing block time by {}s ({} -> {})", delta, current, target);
    }

    sim.increase_time(delta)
        .await
        .map_err(Error::collaborator("evm_increaseTime"))?;
    sim.mine_block().await.map_err(Error::collaborator("evm_mine"))?;

    Ok(delta)
}

pub async fn advance_time_to(sim: &(impl ChainSimulator + ?Sized), at: DateTime<Utc>) -> Result<i64> {
    let target = u64::try_from(at.timestamp())
        .map_err(|_| Error::InvalidTimestamp(format!("{} is before the unix epoch", at)))?;
    advance_time(sim, target).await
}

//! Concurrency helper: bound the number of snapshots processed in parallel.

use crate::paths::SnapshotJob;
use anyhow::Result;
use rayon::prelude::*;

/// Limit parallelism across snapshot files: at most `limit` in flight.
pub fn for_each_job_limited<F>(jobs: &[SnapshotJob], limit: usize, f: F) -> Result<()>
where
    F: Sync + Fn(&SnapshotJob) -> Result<()>,
{
    if limit <= 1 {
        for job in jobs {
            f(job)?;
        }
        return Ok(());
    }
    for chunk in jobs.chunks(limit) {
        chunk.par_iter().try_for_each(|job| f(job))?;
    }
    Ok(())
}

//! Division of the angle sequence between workers.

/// Contiguous range of angle indices owned by `worker` out of `n_workers`,
/// when `total` angles are shared out.
///
/// Every worker gets `total / n_workers` angles; the last one also absorbs the
/// remainder. When there are more workers than angles, all but the last get
/// empty ranges.
pub fn partition(total: usize, n_workers: usize, worker: usize) -> Range<usize> {
    assert!(n_workers > 0, "cannot share angles between zero workers");
    assert!(worker < n_workers, "worker {worker} does not exist: there are only {n_workers}");
    let per_worker = total / n_workers;
    let start = worker * per_worker;
    let stop = if worker == n_workers - 1 { total } else { (worker + 1) * per_worker };
    start..stop
}


// ----- Imports ------------------------------------------------------------------------------------------
use std::ops::Range;

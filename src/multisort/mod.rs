//! Recursive 4-way divide-and-conquer sort with a windowed task-parallel
//! merge.
//!
//! The range is split into four quadrants which are sorted independently,
//! each against its own quadrant of the scratch buffer. Two independent
//! merges then combine quadrant pairs into the scratch halves, and a final
//! merge brings the halves back into the data buffer. The merges themselves
//! decompose recursively into independent output windows. All sibling tasks
//! at a level own disjoint sub-slices of both buffers, so the only
//! synchronization the algorithm needs are the two join barriers between the
//! phases.
//!
//! Lengths and thresholds must be powers of two; that is what keeps every
//! split exact and every sibling range disjoint.

mod merge;

use crate::error::ParamError;
use crate::observer::{NoopObserver, TaskKind, TaskObserver};

use merge::merge_rec;

/// Default recursion depth below which no further tasks are generated and the
/// decomposition continues inline on the current worker.
pub const DEFAULT_CUTOFF_DEPTH: usize = 16;

/// Granularity thresholds for the recursive decomposition.
///
/// A sort range shorter than `4 * min_sort_size` falls back to the sequential
/// base sort; a merge window shorter than `2 * min_merge_size` falls back to
/// the linear base merge. Varying the thresholds changes the task tree, never
/// the output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SortParams {
    min_sort_size: usize,
    min_merge_size: usize,
}

impl SortParams {
    /// Validates that both thresholds are non-zero powers of two.
    pub fn new(min_sort_size: usize, min_merge_size: usize) -> Result<Self, ParamError> {
        for (what, value) in [
            ("min_sort_size", min_sort_size),
            ("min_merge_size", min_merge_size),
        ] {
            if value == 0 {
                return Err(ParamError::ZeroThreshold { what });
            }
            if !value.is_power_of_two() {
                return Err(ParamError::NotPowerOfTwo { what, value });
            }
        }

        Ok(Self {
            min_sort_size,
            min_merge_size,
        })
    }

    pub fn min_sort_size(&self) -> usize {
        self.min_sort_size
    }

    pub fn min_merge_size(&self) -> usize {
        self.min_merge_size
    }
}

impl Default for SortParams {
    /// The lab defaults: 1024 elements for both thresholds.
    fn default() -> Self {
        Self {
            min_sort_size: 1024,
            min_merge_size: 1024,
        }
    }
}

/// Sorts `data` ascending using `tmp` as scratch, spawning a task per
/// independent recursive branch down to [`DEFAULT_CUTOFF_DEPTH`].
///
/// `data.len()` must be a power of two (or zero) and `tmp` at least as long
/// as `data`. The scratch contents are unspecified on entry and on return.
/// The sort is stable.
pub fn sort<T>(data: &mut [T], tmp: &mut [T], params: &SortParams) -> Result<(), ParamError>
where
    T: Ord + Clone + Send + Sync,
{
    sort_with_cutoff(data, tmp, params, DEFAULT_CUTOFF_DEPTH)
}

/// Like [`sort`], but with an explicit task-generation cutoff depth.
///
/// A cutoff of zero runs the whole decomposition inline, which is exactly
/// [`sort_seq`].
pub fn sort_with_cutoff<T>(
    data: &mut [T],
    tmp: &mut [T],
    params: &SortParams,
    cutoff_depth: usize,
) -> Result<(), ParamError>
where
    T: Ord + Clone + Send + Sync,
{
    check_input(data, tmp)?;
    let n = data.len();
    multisort_rec(data, &mut tmp[..n], 0, params, &NoopObserver, cutoff_depth);
    Ok(())
}

/// Sequential twin of [`sort`]: same decomposition, no tasks.
pub fn sort_seq<T>(data: &mut [T], tmp: &mut [T], params: &SortParams) -> Result<(), ParamError>
where
    T: Ord + Clone + Send + Sync,
{
    sort_with_cutoff(data, tmp, params, 0)
}

/// Trace-only variant: runs the decomposition sequentially and reports every
/// task boundary to `obs`, so the would-be task graph can be analyzed without
/// executing it in parallel.
pub fn sort_traced<T, O>(
    data: &mut [T],
    tmp: &mut [T],
    params: &SortParams,
    obs: &O,
) -> Result<(), ParamError>
where
    T: Ord + Clone + Send + Sync,
    O: TaskObserver + Sync,
{
    check_input(data, tmp)?;
    let n = data.len();
    multisort_rec(data, &mut tmp[..n], 0, params, obs, 0);
    Ok(())
}

/// Counts adjacent inversions. Zero means `data` is sorted ascending.
///
/// Purely diagnostic; never corrects anything.
pub fn count_unsorted<T: Ord>(data: &[T]) -> usize {
    data.windows(2).filter(|w| w[0] > w[1]).count()
}

fn check_input<T>(data: &[T], tmp: &[T]) -> Result<(), ParamError> {
    if !data.is_empty() && !data.len().is_power_of_two() {
        return Err(ParamError::NotPowerOfTwo {
            what: "data length",
            value: data.len(),
        });
    }
    if tmp.len() < data.len() {
        return Err(ParamError::ScratchTooSmall {
            need: data.len(),
            got: tmp.len(),
        });
    }
    Ok(())
}

fn multisort_rec<T, O>(
    data: &mut [T],
    tmp: &mut [T],
    base: usize,
    params: &SortParams,
    obs: &O,
    spawn: usize,
) where
    T: Ord + Clone + Send + Sync,
    O: TaskObserver + Sync,
{
    let n = data.len();
    if n < 4 * params.min_sort_size {
        obs.task_start(TaskKind::BaseSort, base, n);
        data.sort();
        obs.task_end(TaskKind::BaseSort, base, n);
        return;
    }

    obs.task_start(TaskKind::Sort, base, n);

    let quarter = n / 4;
    let half = n / 2;

    // Phase 1: the four quadrants touch disjoint memory in both buffers, so
    // they are free to run concurrently. The joins are the first barrier.
    {
        let (d01, d23) = data.split_at_mut(half);
        let (d0, d1) = d01.split_at_mut(quarter);
        let (d2, d3) = d23.split_at_mut(quarter);
        let (t01, t23) = tmp.split_at_mut(half);
        let (t0, t1) = t01.split_at_mut(quarter);
        let (t2, t3) = t23.split_at_mut(quarter);

        if spawn > 0 {
            let next = spawn - 1;
            rayon::join(
                || {
                    rayon::join(
                        || multisort_rec(d0, t0, base, params, obs, next),
                        || multisort_rec(d1, t1, base + quarter, params, obs, next),
                    )
                },
                || {
                    rayon::join(
                        || multisort_rec(d2, t2, base + half, params, obs, next),
                        || multisort_rec(d3, t3, base + half + quarter, params, obs, next),
                    )
                },
            );
        } else {
            multisort_rec(d0, t0, base, params, obs, 0);
            multisort_rec(d1, t1, base + quarter, params, obs, 0);
            multisort_rec(d2, t2, base + half, params, obs, 0);
            multisort_rec(d3, t3, base + half + quarter, params, obs, 0);
        }
    }

    // Phase 2: merge quadrant pairs into the scratch halves. Disjoint
    // destinations, shared read-only sources. Second barrier.
    {
        let (t_lo, t_hi) = tmp.split_at_mut(half);
        let (d_lo, d_hi) = data.split_at(half);
        let (d0, d1) = d_lo.split_at(quarter);
        let (d2, d3) = d_hi.split_at(quarter);

        if spawn > 0 {
            let next = spawn - 1;
            rayon::join(
                || merge_rec(d0, d1, t_lo, 0, base, params, obs, next),
                || merge_rec(d2, d3, t_hi, 0, base + half, params, obs, next),
            );
        } else {
            merge_rec(d0, d1, t_lo, 0, base, params, obs, 0);
            merge_rec(d2, d3, t_hi, 0, base + half, params, obs, 0);
        }
    }

    // Phase 3: merge the scratch halves back into the full data range. This
    // depends on both phase-2 merges having completed.
    let (t_lo, t_hi) = tmp.split_at(half);
    merge_rec(t_lo, t_hi, data, 0, base, params, obs, spawn);

    obs.task_end(TaskKind::Sort, base, n);
}

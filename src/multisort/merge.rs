use crate::observer::{TaskKind, TaskObserver};

use super::SortParams;

/// Locates the split of global merge rank `k` between `left` and `right`.
///
/// Returns `(i, j)` with `i + j == k` such that the first `k` elements of the
/// merged sequence are exactly `left[..i]` followed by `right[..j]`. Ties go
/// to `left`, matching the tie rule of the linear merge below, so the split
/// is unique.
pub(crate) fn merge_split<T: Ord>(k: usize, left: &[T], right: &[T]) -> (usize, usize) {
    debug_assert!(k <= left.len() + right.len());

    let mut lo = k.saturating_sub(right.len());
    let mut hi = k.min(left.len());

    // Smallest i where right[k - i - 1] no longer has to come before left[i].
    while lo < hi {
        let i = lo + (hi - lo) / 2;
        let j = k - i;
        if right[j - 1] >= left[i] {
            lo = i + 1;
        } else {
            hi = i;
        }
    }

    (lo, k - lo)
}

/// Two-pointer merge producing the output window `[start, start + out.len())`
/// of the merged sequence of `left` and `right`.
///
/// The merge resumes mid-stream at the arbitrary rank `start` via
/// [`merge_split`], so a caller can carve the output into independent
/// windows. A zero-length window returns without touching any element.
pub(crate) fn base_merge<T: Ord + Clone>(left: &[T], right: &[T], out: &mut [T], start: usize) {
    if out.is_empty() {
        return;
    }

    let (mut i, mut j) = merge_split(start, left, right);

    for slot in out.iter_mut() {
        // Equal elements are taken from `left` first, keeping the merge stable.
        if j == right.len() || (i < left.len() && left[i] <= right[j]) {
            *slot = left[i].clone();
            i += 1;
        } else {
            *slot = right[j].clone();
            j += 1;
        }
    }
}

/// Recursive windowed merge.
///
/// `out` is the window `[start, start + out.len())` of the merged sequence of
/// the two pre-sorted runs. `base` is the offset of `out[0]` inside the
/// destination array and is only used for observer reporting. `spawn` is the
/// remaining task-generation depth; the two half-window recursions run on
/// worker threads while it is non-zero.
pub(crate) fn merge_rec<T, O>(
    left: &[T],
    right: &[T],
    out: &mut [T],
    start: usize,
    base: usize,
    params: &SortParams,
    obs: &O,
    spawn: usize,
) where
    T: Ord + Clone + Send + Sync,
    O: TaskObserver + Sync,
{
    let length = out.len();
    if length == 0 {
        return;
    }

    if length < 2 * params.min_merge_size() {
        obs.task_start(TaskKind::BaseMerge, base, length);
        base_merge(left, right, out, start);
        obs.task_end(TaskKind::BaseMerge, base, length);
        return;
    }

    obs.task_start(TaskKind::Merge, base, length);

    // The two half-windows write disjoint output and only read the runs.
    let half = length / 2;
    let (lo, hi) = out.split_at_mut(half);

    if spawn > 0 {
        rayon::join(
            || merge_rec(left, right, lo, start, base, params, obs, spawn - 1),
            || merge_rec(left, right, hi, start + half, base + half, params, obs, spawn - 1),
        );
    } else {
        merge_rec(left, right, lo, start, base, params, obs, 0);
        merge_rec(left, right, hi, start + half, base + half, params, obs, 0);
    }

    obs.task_end(TaskKind::Merge, base, length);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;

    fn ranks_consistent(left: &[i32], right: &[i32]) {
        for k in 0..=left.len() + right.len() {
            let (i, j) = merge_split(k, left, right);
            assert_eq!(i + j, k);
            assert!(i <= left.len() && j <= right.len());

            // Everything taken must sort at or before everything left behind.
            if i > 0 && j < right.len() {
                assert!(left[i - 1] <= right[j]);
            }
            if j > 0 && i < left.len() {
                assert!(right[j - 1] < left[i]);
            }
        }
    }

    #[test]
    fn split_properties() {
        ranks_consistent(&[1, 3, 5, 7], &[2, 4, 6, 8]);
        ranks_consistent(&[1, 1, 1, 1], &[1, 1, 1, 1]);
        ranks_consistent(&[1, 2, 3, 4], &[5, 6, 7, 8]);
        ranks_consistent(&[5, 6, 7, 8], &[1, 2, 3, 4]);
        ranks_consistent(&[], &[1, 2, 3]);
        ranks_consistent(&[1, 2, 3], &[]);
    }

    #[test]
    fn split_is_left_biased() {
        // With equal elements on both sides, all of left is consumed first.
        let left = [7, 7];
        let right = [7, 7];
        assert_eq!(merge_split(1, &left, &right), (1, 0));
        assert_eq!(merge_split(2, &left, &right), (2, 0));
        assert_eq!(merge_split(3, &left, &right), (2, 1));
    }

    #[test]
    fn windowed_base_merge_matches_full_merge() {
        let left = [1, 4, 4, 9, 12, 13, 20, 22];
        let right = [2, 4, 5, 9, 10, 11, 21, 30];
        let n = left.len() + right.len();

        let mut full = vec![0; n];
        base_merge(&left, &right, &mut full, 0);

        for start in 0..n {
            for length in 0..=(n - start) {
                let mut window = vec![i32::MIN; length];
                base_merge(&left, &right, &mut window, start);
                assert_eq!(window, &full[start..start + length]);
            }
        }
    }

    #[test]
    fn recursive_merge_matches_base_merge() {
        let left = [0, 3, 3, 6, 8, 8, 11, 15];
        let right = [1, 2, 3, 7, 9, 14, 14, 16];
        let n = left.len() + right.len();

        let mut expected = vec![0; n];
        base_merge(&left, &right, &mut expected, 0);

        for min_merge in [1usize, 2, 4, 8] {
            let params = SortParams::new(2, min_merge).unwrap();
            let mut out = vec![0; n];
            merge_rec(&left, &right, &mut out, 0, 0, &params, &NoopObserver, 4);
            assert_eq!(out, expected, "min_merge_size {min_merge}");

            // Any even-length sub-window must come out identical too.
            for start in (0..n).step_by(2) {
                for length in (0..=n - start).step_by(2) {
                    let mut window = vec![i32::MIN; length];
                    merge_rec(
                        &left,
                        &right,
                        &mut window,
                        start,
                        start,
                        &params,
                        &NoopObserver,
                        0,
                    );
                    assert_eq!(window, &expected[start..start + length]);
                }
            }
        }
    }

    #[test]
    fn empty_window_is_a_noop() {
        let left = [1, 2];
        let right = [3, 4];
        let mut out: [i32; 0] = [];
        base_merge(&left, &right, &mut out, 0);

        let params = SortParams::new(1, 1).unwrap();
        merge_rec(&left, &right, &mut out, 2, 0, &params, &NoopObserver, 1);
    }
}

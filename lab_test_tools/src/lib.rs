use std::fmt::Debug;

/// A multisort execution variant under test.
///
/// Implementations allocate their own scratch buffer and panic on a contract
/// violation; the shared suite only feeds valid power-of-two inputs.
pub trait TaskSort {
    fn name() -> String;

    /// Sorts `data` ascending with the given granularity thresholds, both
    /// powers of two.
    fn sort<T>(data: &mut [T], min_sort_size: usize, min_merge_size: usize)
    where
        T: Ord + Clone + Debug + Send + Sync;
}

pub mod patterns;

// The test-instantiation macro pastes the variant prefix into test names.
pub use paste;

use thiserror::Error;

/// Caller contract violations, detected at entry to the public operations.
///
/// The kernels never try to recover from a bad configuration; they refuse it
/// up front so that the recursive decomposition can assume its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("{what} must be a power of two, got {value}")]
    NotPowerOfTwo { what: &'static str, value: usize },

    #[error("{what} must be greater than zero")]
    ZeroThreshold { what: &'static str },

    #[error("scratch buffer too small: need {need} elements, got {got}")]
    ScratchTooSmall { need: usize, got: usize },

    #[error("grid buffer holds {got} elements, expected {expected}")]
    GridMismatch { expected: usize, got: usize },
}

//! Task-parallel teaching kernels.
//!
//! Three classic lab exercises, each with a sequential and a fork-join
//! parallel execution variant:
//!
//! - [`multisort`]: recursive 4-way divide-and-conquer sort with a windowed
//!   merge. The interesting one: real dependencies between sibling tasks and
//!   tunable granularity cutoffs.
//! - [`solver`]: Jacobi stencil relaxation over a 2D grid.
//! - [`mandel`]: per-pixel Mandelbrot iteration counts.
//!
//! The [`observer`] module provides the trace-only execution hook used to
//! study the task graphs without running them in parallel.

pub mod error;
pub mod mandel;
pub mod multisort;
pub mod observer;
pub mod solver;

pub use error::ParamError;

//! Jacobi stencil relaxation over a row-major 2D grid.
//!
//! One sweep averages the four neighbors of every interior point of `u` into
//! `u_new` and accumulates the squared residual. The interior rows are
//! independent: each band writes its own rows of `u_new` while all bands read
//! the shared, immutable `u`, so the rows parallelize without any locking.
//! Boundary rows and columns are never written.

use rayon::prelude::*;

use crate::error::ParamError;

fn check_grid(len: usize, sizex: usize, sizey: usize) -> Result<(), ParamError> {
    match sizex.checked_mul(sizey) {
        Some(expected) if expected == len => Ok(()),
        Some(expected) => Err(ParamError::GridMismatch { expected, got: len }),
        None => Err(ParamError::GridMismatch {
            expected: usize::MAX,
            got: len,
        }),
    }
}

/// One parallel Jacobi sweep; returns the squared-residual sum.
///
/// Grids smaller than 3x3 have no interior and yield a zero residual.
pub fn solve(u: &[f64], u_new: &mut [f64], sizex: usize, sizey: usize) -> Result<f64, ParamError> {
    check_grid(u.len(), sizex, sizey)?;
    check_grid(u_new.len(), sizex, sizey)?;
    if sizex < 3 || sizey < 3 {
        return Ok(0.0);
    }

    let sum = u_new[sizey..(sizex - 1) * sizey]
        .par_chunks_mut(sizey)
        .enumerate()
        .map(|(band, row_out)| {
            let i = band + 1;
            let mut residual = 0.0;
            for j in 1..sizey - 1 {
                let new = 0.25
                    * (u[i * sizey + (j - 1)]
                        + u[i * sizey + (j + 1)]
                        + u[(i - 1) * sizey + j]
                        + u[(i + 1) * sizey + j]);
                let diff = new - u[i * sizey + j];
                residual += diff * diff;
                row_out[j] = new;
            }
            residual
        })
        .sum();

    Ok(sum)
}

/// Sequential twin of [`solve`], also the reference the tests compare
/// against.
pub fn solve_seq(
    u: &[f64],
    u_new: &mut [f64],
    sizex: usize,
    sizey: usize,
) -> Result<f64, ParamError> {
    check_grid(u.len(), sizex, sizey)?;
    check_grid(u_new.len(), sizex, sizey)?;
    if sizex < 3 || sizey < 3 {
        return Ok(0.0);
    }

    let mut sum = 0.0;
    for i in 1..sizex - 1 {
        for j in 1..sizey - 1 {
            let new = 0.25
                * (u[i * sizey + (j - 1)]
                    + u[i * sizey + (j + 1)]
                    + u[(i - 1) * sizey + j]
                    + u[(i + 1) * sizey + j]);
            let diff = new - u[i * sizey + j];
            sum += diff * diff;
            u_new[i * sizey + j] = new;
        }
    }

    Ok(sum)
}

/// Copies the interior of `src` into `dst`, in parallel row bands. Boundaries
/// of `dst` are left untouched.
pub fn copy_interior(
    src: &[f64],
    dst: &mut [f64],
    sizex: usize,
    sizey: usize,
) -> Result<(), ParamError> {
    check_grid(src.len(), sizex, sizey)?;
    check_grid(dst.len(), sizex, sizey)?;
    if sizex < 3 || sizey < 3 {
        return Ok(());
    }

    dst[sizey..(sizex - 1) * sizey]
        .par_chunks_mut(sizey)
        .enumerate()
        .for_each(|(band, row)| {
            let i = band + 1;
            row[1..sizey - 1].copy_from_slice(&src[i * sizey + 1..(i + 1) * sizey - 1]);
        });

    Ok(())
}

/// Runs `iterations` sweeps, ping-ponging between `u` and `scratch`, and
/// returns the residual of the last sweep. The final state ends up in `u`.
pub fn relax(
    u: &mut Vec<f64>,
    scratch: &mut Vec<f64>,
    sizex: usize,
    sizey: usize,
    iterations: usize,
) -> Result<f64, ParamError> {
    check_grid(u.len(), sizex, sizey)?;
    check_grid(scratch.len(), sizex, sizey)?;

    // The sweeps only write interior points, so the scratch buffer must carry
    // the same boundary values before the first swap.
    scratch.copy_from_slice(u);

    let mut residual = 0.0;
    for _ in 0..iterations {
        residual = solve(u, scratch, sizex, sizey)?;
        std::mem::swap(u, scratch);
    }
    Ok(residual)
}

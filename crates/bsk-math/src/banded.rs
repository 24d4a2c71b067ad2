//! Tridiagonal and cyclic tridiagonal solvers.
//!
//! The right-hand side is a slice of "lanes": anything that supports
//! addition, subtraction and scaling by `f64`. Points and plain scalars both
//! qualify, so a whole point sequence is solved in one sweep.

use std::ops::{Add, Mul, Sub};

use bsk_core::{Result, SplineError, Tolerance};

pub trait Lane: Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self> {}

impl<T> Lane for T where T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T> {}

/// Constant-coefficient three-point stencil `sub * x[i-1] + diag * x[i] + sup * x[i+1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stencil {
    pub sub: f64,
    pub diag: f64,
    pub sup: f64,
}

impl Stencil {
    pub const fn new(sub: f64, diag: f64, sup: f64) -> Self {
        Self { sub, diag, sup }
    }
}

/// Solve a tridiagonal system in place with the Thomas algorithm.
///
/// Row `i` reads `sub[i] * x[i-1] + diag[i] * x[i] + sup[i] * x[i+1] = rhs[i]`;
/// `sub[0]` and `sup[n-1]` are ignored. On return `rhs` holds `x`.
pub fn solve_tridiagonal<V: Lane>(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &mut [V],
    tol: Tolerance,
) -> Result<()> {
    let n = rhs.len();
    check_bands(sub, diag, sup, n)?;
    if n == 0 {
        return Ok(());
    }

    let mut c_prime = vec![0.0; n];

    let pivot = checked_pivot(diag[0], 0, tol)?;
    if n > 1 {
        c_prime[0] = sup[0] / pivot;
    }
    rhs[0] = rhs[0] * (1.0 / pivot);

    for i in 1..n {
        let pivot = checked_pivot(diag[i] - sub[i] * c_prime[i - 1], i, tol)?;
        if i + 1 < n {
            c_prime[i] = sup[i] / pivot;
        }
        rhs[i] = (rhs[i] - rhs[i - 1] * sub[i]) * (1.0 / pivot);
    }

    for i in (0..n - 1).rev() {
        rhs[i] = rhs[i] - rhs[i + 1] * c_prime[i];
    }

    Ok(())
}

/// Solve a circulant tridiagonal system in place.
///
/// Row `i` reads `sub * x[i-1] + diag * x[i] + sup * x[i+1] = rhs[i]` with
/// indices taken modulo `n`. The corner entries are split off with the
/// Sherman-Morrison formula and two ordinary tridiagonal solves. Requires
/// `n >= 3`.
pub fn solve_cyclic<V: Lane>(stencil: Stencil, rhs: &mut [V], tol: Tolerance) -> Result<()> {
    let n = rhs.len();
    if n < 3 {
        return Err(SplineError::InvariantViolation(format!(
            "cyclic system needs at least 3 unknowns, got {n}"
        )));
    }

    // Corner entries: top-right belongs to row 0, bottom-left to row n-1
    let top_right = stencil.sub;
    let bottom_left = stencil.sup;
    let gamma = -stencil.diag;
    checked_pivot(gamma, 0, tol)?;

    let sub = vec![stencil.sub; n];
    let sup = vec![stencil.sup; n];
    let mut diag = vec![stencil.diag; n];
    diag[0] = stencil.diag - gamma;
    diag[n - 1] = stencil.diag - bottom_left * top_right / gamma;

    solve_tridiagonal(&sub, &diag, &sup, rhs, tol)?;

    let mut z = vec![0.0; n];
    z[0] = gamma;
    z[n - 1] = bottom_left;
    solve_tridiagonal(&sub, &diag, &sup, &mut z, tol)?;

    let denom = checked_pivot(1.0 + z[0] + top_right * z[n - 1] / gamma, n - 1, tol)?;
    let fact = (rhs[0] + rhs[n - 1] * (top_right / gamma)) * (1.0 / denom);
    for (x, &zi) in rhs.iter_mut().zip(&z) {
        *x = *x - fact * zi;
    }

    Ok(())
}

/// Multiply a tridiagonal matrix by `x`. Bands are laid out as for
/// [`solve_tridiagonal`] and must match `x` in length.
pub fn apply_tridiagonal<V: Lane>(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    x: &[V],
) -> Result<Vec<V>> {
    let n = x.len();
    check_bands(sub, diag, sup, n)?;
    Ok((0..n)
        .map(|i| {
            let mut acc = x[i] * diag[i];
            if i > 0 {
                acc = acc + x[i - 1] * sub[i];
            }
            if i + 1 < n {
                acc = acc + x[i + 1] * sup[i];
            }
            acc
        })
        .collect())
}

/// Multiply a circulant tridiagonal matrix by `x`.
pub fn apply_cyclic<V: Lane>(stencil: Stencil, x: &[V]) -> Vec<V> {
    let n = x.len();
    (0..n)
        .map(|i| {
            let prev = x[(i + n - 1) % n];
            let next = x[(i + 1) % n];
            prev * stencil.sub + x[i] * stencil.diag + next * stencil.sup
        })
        .collect()
}

fn check_bands(sub: &[f64], diag: &[f64], sup: &[f64], n: usize) -> Result<()> {
    if sub.len() != n || diag.len() != n || sup.len() != n {
        return Err(SplineError::InvariantViolation(format!(
            "band lengths {}/{}/{} do not match {} unknowns",
            sub.len(),
            diag.len(),
            sup.len(),
            n
        )));
    }
    Ok(())
}

fn checked_pivot(pivot: f64, row: usize, tol: Tolerance) -> Result<f64> {
    if tol.is_degenerate_pivot(pivot) {
        Err(SplineError::SingularRelation(format!(
            "pivot {pivot:e} at row {row}"
        )))
    } else {
        Ok(pivot)
    }
}

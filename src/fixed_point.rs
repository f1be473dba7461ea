//! Fixed-Point Iteration
//!
//! Repeatedly applies an operator to a vector until successive iterates are
//! within a sup-norm tolerance. Used for Bellman-type recursions whose
//! operator is a contraction (modulus = discount factor).

use crate::error::{FigureError, Result};

pub const DEFAULT_TOLERANCE: f64 = 1e-10;
pub const DEFAULT_MAX_ITER: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedPointSolver {
    pub tolerance: f64,
    pub max_iter: usize,
}

impl Default for FixedPointSolver {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FixedPoint {
    pub values: Vec<f64>,
    pub iterations: usize,
    pub distance: f64,
}

/// Largest absolute difference. NaN if any term is NaN or the lengths differ.
pub fn sup_distance(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return f64::NAN;
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, |m, d| if m.is_nan() || d.is_nan() { f64::NAN } else { m.max(d) })
}

impl FixedPointSolver {
    pub fn new(tolerance: f64, max_iter: usize) -> Self {
        Self { tolerance, max_iter }
    }

    pub fn solve<F>(&self, initial: Vec<f64>, mut operator: F) -> Result<FixedPoint>
    where
        F: FnMut(&[f64]) -> Vec<f64>,
    {
        let mut current = initial;
        let mut distance = f64::INFINITY;

        for iteration in 1..=self.max_iter {
            let next = operator(&current);
            distance = sup_distance(&next, &current);
            current = next;

            if !distance.is_finite() {
                return Err(FigureError::NoConvergence {
                    iterations: iteration,
                    distance,
                });
            }
            if distance < self.tolerance {
                log::debug!(
                    "fixed point reached after {} iterations (distance {:e})",
                    iteration,
                    distance
                );
                return Ok(FixedPoint {
                    values: current,
                    iterations: iteration,
                    distance,
                });
            }
        }

        Err(FigureError::NoConvergence {
            iterations: self.max_iter,
            distance,
        })
    }
}

//! Point-set capability traits.
//!
//! A point set is an ordered collection of `num_points` points in the unit
//! hypercube of dimension `dimension`. Randomisation strategies only ever
//! touch it through two capabilities:
//!
//! - [`PointSet`]: coordinate access and the random shift modulo 1, which
//!   every point set supports
//! - [`MatrixScramble`]: generator-matrix scrambles and the digital shift,
//!   offered by digital nets through [`PointSet::as_matrix_scramble`]
//!
//! ## Reapplication semantics
//!
//! Each mutating operation owns one slot of randomisation state. Calling an
//! operation again *replaces* that slot instead of compounding it, while
//! operations of different kinds coexist:
//!
//! | operation                                   | on reapply                       |
//! |---------------------------------------------|----------------------------------|
//! | [`PointSet::add_random_shift`]              | replaces the shift vector        |
//! | [`MatrixScramble::add_random_digital_shift`]| replaces the digital shift       |
//! | [`MatrixScramble::striped_matrix_scramble`] | re-derives from original matrices|
//!
//! Explicit resets are [`PointSet::clear_random_shift`],
//! [`MatrixScramble::clear_digital_shift`],
//! [`MatrixScramble::reset_generator_matrices`] and [`PointSet::unrandomise`].

use crate::stream::RandomStream;

/// Smallest value a shifted coordinate may take; shifted points never sit on 0.
pub const EPSILON_HALF: f64 = 1.0 / (1u64 << 55) as f64;

/// Adds `shift` to `x` modulo 1, keeping the result in (0, 1).
///
/// # Examples
/// ```
/// use qmc_core::point_set::{shift_mod1, EPSILON_HALF};
///
/// assert_eq!(shift_mod1(0.75, 0.5), 0.25);
/// assert_eq!(shift_mod1(0.5, 0.5), EPSILON_HALF);
/// ```
#[inline]
pub fn shift_mod1(x: f64, shift: f64) -> f64 {
    let mut y = x + shift;
    if y >= 1.0 {
        y -= 1.0;
    }
    if y <= 0.0 {
        y = EPSILON_HALF;
    }
    y
}

/// Random shift modulo 1: one uniform per coordinate, shared by all points.
///
/// Point sets embed this to implement [`PointSet::add_random_shift`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RandomShift {
    values: Option<Vec<f64>>,
}

impl RandomShift {
    /// Replaces the shift vector with `dimension` fresh draws from `stream`.
    pub fn regenerate(&mut self, dimension: usize, stream: &mut dyn RandomStream) {
        let mut values = vec![0.0; dimension];
        stream.fill_uniform(&mut values);
        tracing::trace!(dimension, "regenerated random shift modulo 1");
        self.values = Some(values);
    }

    /// Removes the shift.
    pub fn clear(&mut self) {
        self.values = None;
    }

    /// Returns the current shift vector, if any.
    pub fn values(&self) -> Option<&[f64]> {
        self.values.as_deref()
    }

    /// Applies the shift of coordinate `j` to `x`.
    #[inline]
    pub fn apply(&self, j: usize, x: f64) -> f64 {
        match &self.values {
            Some(values) => shift_mod1(x, values[j]),
            None => x,
        }
    }
}

/// Base capability of every point set.
pub trait PointSet {
    /// Number of coordinates per point.
    fn dimension(&self) -> usize;

    /// Number of points.
    fn num_points(&self) -> usize;

    /// Returns coordinate `j` of point `i`, randomisations included.
    ///
    /// # Panics
    ///
    /// May panic if `i >= num_points()` or `j >= dimension()`.
    fn coordinate(&self, i: usize, j: usize) -> f64;

    /// Writes point `i` into `point`, which must hold `dimension()` values.
    fn point(&self, i: usize, point: &mut [f64]) {
        for (j, x) in point.iter_mut().enumerate() {
            *x = self.coordinate(i, j);
        }
    }

    /// Draws a fresh shift vector of `dimension()` uniforms from `stream` and
    /// adds it modulo 1 to every point, replacing any previous such shift.
    fn add_random_shift(&mut self, stream: &mut dyn RandomStream);

    /// Removes the shift modulo 1, if any.
    fn clear_random_shift(&mut self);

    /// Returns the current shift vector modulo 1, if any.
    fn random_shift(&self) -> Option<&[f64]>;

    /// Removes every randomisation applied to the point set.
    fn unrandomise(&mut self) {
        self.clear_random_shift();
    }

    /// Returns the matrix-scramble capability, if this point set has one.
    fn as_matrix_scramble(&mut self) -> Option<&mut dyn MatrixScramble> {
        None
    }

    /// Returns every point, row by row. Intended for small sets.
    fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.num_points())
            .map(|i| {
                let mut row = vec![0.0; self.dimension()];
                self.point(i, &mut row);
                row
            })
            .collect()
    }
}

/// Generator-matrix capability of digital nets.
pub trait MatrixScramble {
    /// Left-multiplies every original generator matrix by a random
    /// lower-triangular "striped" matrix: each column holds one random
    /// non-zero digit on and below the diagonal.
    ///
    /// Always derived from the original matrices, so a second call replaces
    /// the first scramble.
    fn striped_matrix_scramble(&mut self, stream: &mut dyn RandomStream);

    /// Draws a fresh digital shift, replacing any previous one.
    fn add_random_digital_shift(&mut self, stream: &mut dyn RandomStream);

    /// Removes the digital shift, if any.
    fn clear_digital_shift(&mut self);

    /// Restores the original generator matrices.
    fn reset_generator_matrices(&mut self);

    /// Returns `true` while a matrix scramble is in effect.
    fn is_scrambled(&self) -> bool;
}

//! Finite prefix of a Korobov lattice sequence as a point set.

use qmc_core::point_set::{PointSet, RandomShift};
use qmc_core::stream::RandomStream;
use qmc_core::QmcError;
use rayon::prelude::*;

use super::KorobovLatticeSequence;
use crate::radical_inverse::digit_reversal;

/// The first `b^k` points of a Korobov lattice sequence, in `d` coordinates.
///
/// These are exactly the points of the `b^k`-point Korobov lattice with
/// multiplier `a mod b^k`. Coordinates are computed on demand; only the
/// random shift is stored.
///
/// # Examples
///
/// ```rust
/// use qmc_core::point_set::PointSet;
/// use qmc_pointsets::lattice_sequence::KorobovLatticeSequence;
///
/// let lattice = KorobovLatticeSequence::new(2, 3).unwrap().embedded_lattice(3, 2).unwrap();
/// assert_eq!(lattice.num_points(), 8);
/// assert_eq!(lattice.coordinate(5, 1), 0.875);
/// ```
#[derive(Clone, Debug)]
pub struct EmbeddedLattice {
    sequence: KorobovLatticeSequence,
    exponent: u32,
    num_points: usize,
    dimension: usize,
    shift: RandomShift,
}

impl EmbeddedLattice {
    pub(crate) fn new(
        sequence: KorobovLatticeSequence,
        exponent: u32,
        dimension: usize,
    ) -> Result<Self, QmcError> {
        if dimension == 0 {
            return Err(QmcError::invalid_argument(
                "EmbeddedLattice::new",
                "dimension must be >= 1",
            ));
        }
        let num_points = (sequence.base() as usize)
            .checked_pow(exponent)
            .ok_or_else(|| {
                QmcError::invalid_argument(
                    "EmbeddedLattice::new",
                    format!("{}^{} points overflow usize", sequence.base(), exponent),
                )
            })?;
        Ok(Self {
            sequence,
            exponent,
            num_points,
            dimension,
            shift: RandomShift::default(),
        })
    }

    /// The generating sequence.
    pub fn sequence(&self) -> &KorobovLatticeSequence {
        &self.sequence
    }

    /// The exponent `k` in `n = b^k`.
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Fills `out` with all points, row-major, in parallel.
    ///
    /// # Errors
    ///
    /// Returns `QmcError::InvalidArgument` unless
    /// `out.len() == num_points() * dimension()`, or if that product
    /// overflows `usize`.
    pub fn fill_points(&self, out: &mut [f64]) -> Result<(), QmcError> {
        const OP: &str = "EmbeddedLattice::fill_points";
        let expected = self.num_points.checked_mul(self.dimension).ok_or_else(|| {
            QmcError::invalid_argument(
                OP,
                format!(
                    "{} points x {} coordinates overflow usize",
                    self.num_points, self.dimension
                ),
            )
        })?;
        if out.len() != expected {
            return Err(QmcError::invalid_argument(
                OP,
                format!("buffer holds {} values, expected {}", out.len(), expected),
            ));
        }
        out.par_chunks_mut(self.dimension)
            .enumerate()
            .for_each(|(i, row)| self.point(i, row));
        Ok(())
    }
}

impl PointSet for EmbeddedLattice {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn num_points(&self) -> usize {
        self.num_points
    }

    #[inline]
    fn coordinate(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.num_points && j < self.dimension);
        self.shift.apply(j, self.sequence.coordinate(i as u64, j as u64))
    }

    fn point(&self, i: usize, point: &mut [f64]) {
        debug_assert!(i < self.num_points && point.len() <= self.dimension);
        let rev = digit_reversal(self.sequence.base(), i as u64);
        for (j, x) in point.iter_mut().enumerate() {
            let raw = if i == 0 {
                0.0
            } else {
                self.sequence.coordinate_from_reversal(rev, j as u64)
            };
            *x = self.shift.apply(j, raw);
        }
    }

    fn add_random_shift(&mut self, stream: &mut dyn RandomStream) {
        self.shift.regenerate(self.dimension, stream);
    }

    fn clear_random_shift(&mut self) {
        self.shift.clear();
    }

    fn random_shift(&self) -> Option<&[f64]> {
        self.shift.values()
    }
}

//! # Korobov Lattice Sequences
//!
//! A Korobov lattice sequence with base `b` and multiplier `a` enumerates an
//! infinite family of embedded lattices. For every `k >= 0`, the `n = b^k`
//! point Korobov lattice with multiplier `a mod n` has points
//!
//! ```text
//! u_m = (m (1, a, a^2, ...) mod n) / n,    m = 0, ..., n - 1
//! ```
//!
//! and the sequence enumerates all of them through the radical inverse:
//!
//! ```text
//! u_i = psi_b(i) (1, a, a^2, ...) mod 1
//! ```
//!
//! The first `b^k` points of the sequence are exactly the points of the
//! `b^k`-point lattice, point `i` being lattice point `m = psi_b(i) b^k`.
//!
//! ## Arithmetic
//!
//! Coordinates are computed with exact integer arithmetic and rounded to
//! `f64` once. The modulus `n = b^d` (`d` = number of digits of `i`) always
//! fits in `u128`; up to `n = 2^64` every product fits too, beyond that the
//! modular power and product are carried out with `num_bigint::BigUint`.
//!
//! ## Usage Example
//!
//! ```rust
//! use qmc_pointsets::lattice_sequence::KorobovLatticeSequence;
//!
//! let sequence = KorobovLatticeSequence::new(2, 3).unwrap();
//!
//! // i = 5 = 101 in base 2: psi_2(5) = 5/8, then 5 * 3 mod 8 = 7.
//! assert_eq!(sequence.coordinate(5, 0), 0.625);
//! assert_eq!(sequence.coordinate(5, 1), 0.875);
//! ```

mod embedded;
mod iter;

use num_bigint::BigUint;
use qmc_core::QmcError;

use crate::radical_inverse::{
    big_ratio_to_f64, check_base, digit_reversal, ratio_to_f64, DigitReversal,
};

pub use embedded::EmbeddedLattice;
pub use iter::KorobovSequenceIter;

/// Largest modulus for which `u128` products cannot overflow.
const NATIVE_MODULUS_LIMIT: u128 = 1 << 64;

/// Korobov lattice sequence generator.
///
/// Immutable and `Copy`; every coordinate is a pure function of `(i, j)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KorobovLatticeSequence {
    base: u32,
    multiplier: u64,
}

impl KorobovLatticeSequence {
    /// Creates a lattice sequence with base `base` and multiplier `multiplier`.
    ///
    /// # Errors
    ///
    /// Returns `QmcError::InvalidArgument` if `base < 2` or `multiplier < 1`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use qmc_pointsets::lattice_sequence::KorobovLatticeSequence;
    ///
    /// assert!(KorobovLatticeSequence::new(2, 76).is_ok());
    /// assert!(KorobovLatticeSequence::new(1, 76).is_err());
    /// assert!(KorobovLatticeSequence::new(2, 0).is_err());
    /// ```
    pub fn new(base: u32, multiplier: u64) -> Result<Self, QmcError> {
        check_base("KorobovLatticeSequence::new", base)?;
        if multiplier < 1 {
            return Err(QmcError::invalid_argument(
                "KorobovLatticeSequence::new",
                "multiplier must be >= 1, got 0",
            ));
        }
        Ok(Self { base, multiplier })
    }

    /// Returns the base `b`.
    #[inline]
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Returns the multiplier `a`.
    #[inline]
    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    /// Returns coordinate `j` of point `i` of the sequence.
    ///
    /// Point 0 is the origin. Coordinate 0 is the radical inverse `psi_b(i)`.
    #[inline]
    pub fn coordinate(&self, i: u64, j: u64) -> f64 {
        if i == 0 {
            return 0.0;
        }
        self.coordinate_from_reversal(digit_reversal(self.base, i), j)
    }

    /// Coordinate `j` of the point whose index has digit reversal `rev`.
    ///
    /// Lets callers reuse one reversal for all coordinates of a point.
    pub(crate) fn coordinate_from_reversal(&self, rev: DigitReversal, j: u64) -> f64 {
        if j == 0 {
            return rev.to_f64();
        }
        let n = rev.modulus;
        if n <= NATIVE_MODULUS_LIMIT {
            let power = mod_pow_u128(self.multiplier, j, n);
            ratio_to_f64(rev.reversed * power % n, n)
        } else {
            let modulus = BigUint::from(n);
            let power = BigUint::from(self.multiplier).modpow(&BigUint::from(j), &modulus);
            let numerator = BigUint::from(rev.reversed) * power % &modulus;
            big_ratio_to_f64(numerator, modulus)
        }
    }

    /// Writes the first `point.len()` coordinates of point `i` into `point`.
    pub fn point(&self, i: u64, point: &mut [f64]) {
        let rev = digit_reversal(self.base, i);
        for (j, x) in point.iter_mut().enumerate() {
            *x = if i == 0 {
                0.0
            } else {
                self.coordinate_from_reversal(rev, j as u64)
            };
        }
    }

    /// The first `b^exponent` points in `dimension` coordinates, as a point set.
    ///
    /// # Errors
    ///
    /// Returns `QmcError::InvalidArgument` if `dimension` is 0 or `b^exponent`
    /// does not fit in `usize`.
    pub fn embedded_lattice(
        &self,
        exponent: u32,
        dimension: usize,
    ) -> Result<EmbeddedLattice, QmcError> {
        EmbeddedLattice::new(*self, exponent, dimension)
    }

    /// Iterator over the infinite sequence in `dimension` coordinates.
    pub fn points(&self, dimension: usize) -> KorobovSequenceIter {
        KorobovSequenceIter::new(*self, dimension)
    }
}

/// Coordinate `j` of point `i` of the Korobov lattice sequence `(base, multiplier)`.
///
/// # Errors
///
/// Returns `QmcError::InvalidArgument` if `base < 2` or `multiplier < 1`.
///
/// # Examples
///
/// ```rust
/// use qmc_pointsets::lattice_sequence::korobov_sequence_coordinate;
///
/// assert_eq!(korobov_sequence_coordinate(3, 2, 2, 3).unwrap(), 0.75);
/// assert!(korobov_sequence_coordinate(3, 2, 2, 0).is_err());
/// ```
pub fn korobov_sequence_coordinate(
    i: u64,
    j: u64,
    base: u32,
    multiplier: u64,
) -> Result<f64, QmcError> {
    Ok(KorobovLatticeSequence::new(base, multiplier)?.coordinate(i, j))
}

/// `a^e mod m` by square-and-multiply, reducing at every step.
///
/// Requires `m <= 2^64` so that every intermediate product fits in `u128`.
#[inline]
fn mod_pow_u128(a: u64, mut e: u64, m: u128) -> u128 {
    debug_assert!(m >= 1 && m <= NATIVE_MODULUS_LIMIT);
    if m == 1 {
        return 0;
    }
    let mut base = u128::from(a) % m;
    let mut result = 1u128;
    while e > 0 {
        if e & 1 == 1 {
            result = result * base % m;
        }
        e >>= 1;
        if e > 0 {
            base = base * base % m;
        }
    }
    result
}

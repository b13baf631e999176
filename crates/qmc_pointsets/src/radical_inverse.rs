//! Radical inverse and base-`b` digit reversal.
//!
//! For an integer `i = sum_l d_l b^l`, the radical inverse is
//! `psi_b(i) = sum_l d_l b^-(l+1)`. It is computed exactly as the ratio
//! `reversed / modulus` of a [`DigitReversal`], and rounded to `f64` once.

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::ToPrimitive;
use qmc_core::QmcError;

/// Largest integer below which every `u128` converts to `f64` exactly.
const EXACT_F64_INTEGER: u128 = 1 << 53;

/// Largest `f64` strictly below 1.
pub(crate) const ONE_MINUS_ULP: f64 = 1.0 - f64::EPSILON / 2.0;

/// Digit reversal of an index: `psi_b(i) = reversed / modulus`.
///
/// `modulus` is `b^d` where `d` is the number of base-`b` digits of `i`, and
/// `reversed` is the integer read from those digits in reverse order. For
/// `u64` indices and `u32` bases, `modulus < b * i < 2^96`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DigitReversal {
    /// Digits of the index read in reverse order.
    pub reversed: u128,
    /// `b^d`, the smallest power of the base exceeding the index.
    pub modulus: u128,
}

impl DigitReversal {
    /// Returns `reversed / modulus`, correctly rounded.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        ratio_to_f64(self.reversed, self.modulus)
    }
}

/// Computes the digit reversal of `i` in base `base`.
///
/// # Errors
///
/// Returns `QmcError::InvalidArgument` if `base < 2`.
///
/// # Examples
/// ```
/// use qmc_pointsets::radical_inverse::integer_radical_inverse;
///
/// // 6 = 110 in base 2, reversed 011 = 3, over 2^3.
/// let rev = integer_radical_inverse(2, 6).unwrap();
/// assert_eq!((rev.reversed, rev.modulus), (3, 8));
/// ```
pub fn integer_radical_inverse(base: u32, i: u64) -> Result<DigitReversal, QmcError> {
    check_base("integer_radical_inverse", base)?;
    Ok(digit_reversal(base, i))
}

/// Radical inverse `psi_b(i)` as an `f64`.
///
/// # Errors
///
/// Returns `QmcError::InvalidArgument` if `base < 2`.
///
/// # Examples
/// ```
/// use qmc_pointsets::radical_inverse::radical_inverse;
///
/// assert_eq!(radical_inverse(2, 5).unwrap(), 0.625);
/// assert_eq!(radical_inverse(3, 1).unwrap(), 1.0 / 3.0);
/// ```
pub fn radical_inverse(base: u32, i: u64) -> Result<f64, QmcError> {
    Ok(integer_radical_inverse(base, i)?.to_f64())
}

/// Digit reversal by repeated division; `base` must already be validated.
#[inline]
pub(crate) fn digit_reversal(base: u32, i: u64) -> DigitReversal {
    let b = u128::from(base);
    let mut rest = u128::from(i);
    let mut reversed = 0u128;
    let mut modulus = 1u128;
    while rest > 0 {
        reversed = reversed * b + rest % b;
        modulus *= b;
        rest /= b;
    }
    DigitReversal { reversed, modulus }
}

pub(crate) fn check_base(operation: &'static str, base: u32) -> Result<(), QmcError> {
    if base < 2 {
        return Err(QmcError::invalid_argument(
            operation,
            format!("base must be >= 2, got {}", base),
        ));
    }
    Ok(())
}

/// `numerator / denominator` rounded once to the nearest `f64`.
#[inline]
pub(crate) fn ratio_to_f64(numerator: u128, denominator: u128) -> f64 {
    if denominator <= EXACT_F64_INTEGER {
        // Both operands are exact, so the division rounds once.
        numerator as f64 / denominator as f64
    } else {
        big_ratio_to_f64(BigUint::from(numerator), BigUint::from(denominator))
    }
}

/// Correctly rounded conversion of a ratio in [0, 1).
///
/// Ratios within half an ulp of 1 would round up to 1.0; they are pinned to
/// the largest double below 1 instead, which is still within one ulp.
pub(crate) fn big_ratio_to_f64(numerator: BigUint, denominator: BigUint) -> f64 {
    let ratio = BigRational::new_raw(BigInt::from(numerator), BigInt::from(denominator));
    // `to_f64` only fails on a zero denominator.
    ratio.to_f64().unwrap_or(f64::NAN).min(ONE_MINUS_ULP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Digit-by-digit floating evaluation, as a reference.
    fn radical_inverse_by_digits(base: u32, mut i: u64) -> f64 {
        let radical = 1.0 / base as f64;
        let mut digit = radical;
        let mut inverse = 0.0;
        while i > 0 {
            inverse += digit * (i % base as u64) as f64;
            digit *= radical;
            i /= base as u64;
        }
        inverse
    }

    #[test]
    fn test_zero_index() {
        let rev = integer_radical_inverse(7, 0).unwrap();
        assert_eq!(rev, DigitReversal { reversed: 0, modulus: 1 });
        assert_eq!(rev.to_f64(), 0.0);
    }

    #[test]
    fn test_base_two_values() {
        let expected = [0.0, 0.5, 0.25, 0.75, 0.125, 0.625, 0.375, 0.875, 0.0625];
        for (i, &e) in expected.iter().enumerate() {
            assert_eq!(radical_inverse(2, i as u64).unwrap(), e, "i = {}", i);
        }
    }

    #[test]
    fn test_base_three_digit_reversal() {
        // 15 = 120 in base 3 -> reversed 021 = 7, modulus 27.
        let rev = integer_radical_inverse(3, 15).unwrap();
        assert_eq!(rev.reversed, 7);
        assert_eq!(rev.modulus, 27);
    }

    #[test]
    fn test_trailing_zero_digits_shrink_reversal() {
        // 8 = 1000 in base 2 -> reversed 0001 = 1 over 16.
        let rev = integer_radical_inverse(2, 8).unwrap();
        assert_eq!((rev.reversed, rev.modulus), (1, 16));
    }

    #[test]
    fn test_matches_digit_evaluation() {
        for base in [2u32, 3, 5, 7, 10, 16] {
            for i in 0..2_000u64 {
                assert_relative_eq!(
                    radical_inverse(base, i).unwrap(),
                    radical_inverse_by_digits(base, i),
                    epsilon = 1e-15
                );
            }
        }
    }

    #[test]
    fn test_largest_index_fits() {
        let rev = integer_radical_inverse(u32::MAX, u64::MAX).unwrap();
        assert!(rev.reversed < rev.modulus);
        let x = rev.to_f64();
        assert!((0.0..1.0).contains(&x));
    }

    #[test]
    fn test_large_modulus_rounding() {
        // 2^60 - 1 in base 2: all 60 digits are 1, so psi = 1 - 2^-60.
        // Round-to-nearest would give 1.0; the value stays below 1.
        let i = (1u64 << 60) - 1;
        let rev = integer_radical_inverse(2, i).unwrap();
        assert_eq!(rev.reversed, u128::from(i));
        assert_eq!(rev.modulus, 1u128 << 60);
        assert_eq!(rev.to_f64(), ONE_MINUS_ULP);
        assert!(rev.to_f64() < 1.0);

        // 2^59 in base 2 -> psi = 2^-60, exactly representable.
        let rev = integer_radical_inverse(2, 1u64 << 59).unwrap();
        assert_eq!(rev.to_f64(), 2f64.powi(-60));
    }

    #[test]
    fn test_invalid_base() {
        assert!(integer_radical_inverse(1, 5).unwrap_err().is_invalid_argument());
        assert!(radical_inverse(0, 5).unwrap_err().is_invalid_argument());
    }
}

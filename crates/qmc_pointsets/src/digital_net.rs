//! Digital nets in base `b` with matrix scrambles and digital shifts.
//!
//! A digital net with generator matrices `C_0, ..., C_{s-1}` (each
//! `num_rows x num_cols` over `Z_b`) maps point index `i`, with base-`b`
//! digits `(a_0, ..., a_{k-1})`, to coordinate `j` whose digits are
//!
//! ```text
//! (y_{j,1}, ..., y_{j,r}) = C_j (a_0, ..., a_{k-1}) mod b
//! u_{i,j} = sum_l y_{j,l} b^-l
//! ```
//!
//! Randomisations act on three independent slots: the scrambled matrices
//! (always re-derived from the originals), the digital shift added digit-wise
//! modulo `b`, and the random shift modulo 1 shared by every point set.

use qmc_core::point_set::{MatrixScramble, PointSet, RandomShift, EPSILON_HALF};
use qmc_core::stream::RandomStream;
use qmc_core::QmcError;

use crate::radical_inverse::{check_base, ONE_MINUS_ULP};

/// Base-`b` digital net with `b^num_cols` points.
///
/// # Examples
///
/// ```rust
/// use qmc_core::point_set::PointSet;
/// use qmc_pointsets::digital_net::DigitalNet;
///
/// // 2-D Hammersley net: (i / 8, psi_2(i)).
/// let net = DigitalNet::hammersley(2, 3).unwrap();
/// assert_eq!(net.num_points(), 8);
/// assert_eq!(net.coordinate(6, 0), 0.75);
/// assert_eq!(net.coordinate(6, 1), 0.375);
/// ```
#[derive(Clone, Debug)]
pub struct DigitalNet {
    base: u32,
    num_cols: usize,
    num_rows: usize,
    dimension: usize,
    num_points: usize,
    /// Original matrices; entry `(j, row, col)` at `(j * num_rows + row) * num_cols + col`.
    original: Vec<u32>,
    /// Scrambled matrices, same layout, when a matrix scramble is in effect.
    scrambled: Option<Vec<u32>>,
    /// Digital shift; digit `l` of coordinate `j` at `j * num_rows + l`.
    digital_shift: Option<Vec<u32>>,
    shift: RandomShift,
    /// `factors[l] = b^-(l+1)`.
    factors: Vec<f64>,
    /// `b^num_rows` when it is exactly representable as `f64`.
    denominator: Option<u64>,
}

const EXACT_DENOMINATOR_LIMIT: u64 = 1 << 53;

impl DigitalNet {
    /// Builds a net from explicit generator matrices, indexed `[j][row][col]`.
    ///
    /// # Errors
    ///
    /// Returns `QmcError::InvalidArgument` if `base < 2`, there are no
    /// matrices, the matrices are empty or ragged, an entry is not a base-`b`
    /// digit, or `b^num_cols` does not fit in `usize`.
    pub fn from_generator_matrices(
        base: u32,
        matrices: &[Vec<Vec<u32>>],
    ) -> Result<Self, QmcError> {
        const OP: &str = "DigitalNet::from_generator_matrices";
        check_base(OP, base)?;
        let dimension = matrices.len();
        if dimension == 0 {
            return Err(QmcError::invalid_argument(OP, "at least one generator matrix is required"));
        }
        let num_rows = matrices[0].len();
        let num_cols = matrices[0].first().map_or(0, Vec::len);
        if num_rows == 0 || num_cols == 0 {
            return Err(QmcError::invalid_argument(OP, "generator matrices must not be empty"));
        }
        let num_points = (base as usize).checked_pow(num_cols as u32).ok_or_else(|| {
            QmcError::invalid_argument(OP, format!("{}^{} points overflow usize", base, num_cols))
        })?;

        let mut original = Vec::with_capacity(dimension * num_rows * num_cols);
        for (j, matrix) in matrices.iter().enumerate() {
            if matrix.len() != num_rows || matrix.iter().any(|row| row.len() != num_cols) {
                return Err(QmcError::invalid_argument(
                    OP,
                    format!("matrix {} is not {} x {}", j, num_rows, num_cols),
                ));
            }
            for row in matrix {
                if let Some(&digit) = row.iter().find(|&&d| d >= base) {
                    return Err(QmcError::invalid_argument(
                        OP,
                        format!("matrix {} has entry {} outside base {}", j, digit, base),
                    ));
                }
                original.extend_from_slice(row);
            }
        }

        let inv_base = 1.0 / f64::from(base);
        let mut factors = Vec::with_capacity(num_rows);
        let mut factor = inv_base;
        for _ in 0..num_rows {
            factors.push(factor);
            factor *= inv_base;
        }
        let denominator = u64::from(base)
            .checked_pow(num_rows as u32)
            .filter(|&d| d <= EXACT_DENOMINATOR_LIMIT);

        Ok(Self {
            base,
            num_cols,
            num_rows,
            dimension,
            num_points,
            original,
            scrambled: None,
            digital_shift: None,
            shift: RandomShift::default(),
            factors,
            denominator,
        })
    }

    /// Two-dimensional Hammersley net `(i / b^k, psi_b(i))` with `b^k` points.
    ///
    /// # Errors
    ///
    /// As [`DigitalNet::from_generator_matrices`]; `k` must be at least 1.
    pub fn hammersley(base: u32, k: usize) -> Result<Self, QmcError> {
        let reversal: Vec<Vec<u32>> = (0..k)
            .map(|row| (0..k).map(|col| u32::from(row + col + 1 == k)).collect())
            .collect();
        let identity: Vec<Vec<u32>> = (0..k)
            .map(|row| (0..k).map(|col| u32::from(row == col)).collect())
            .collect();
        Self::from_generator_matrices(base, &[reversal, identity])
    }

    /// The base `b`.
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Number of digits of a point index, `k`.
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Number of output digits per coordinate, `r`.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Entry `(row, col)` of the current generator matrix of coordinate `j`.
    pub fn generator_entry(&self, j: usize, row: usize, col: usize) -> u32 {
        self.matrices()[self.entry_index(j, row, col)]
    }

    /// The current digital shift, digit `l` of coordinate `j` at `j * num_rows + l`.
    pub fn digital_shift(&self) -> Option<&[u32]> {
        self.digital_shift.as_deref()
    }

    #[inline]
    fn entry_index(&self, j: usize, row: usize, col: usize) -> usize {
        (j * self.num_rows + row) * self.num_cols + col
    }

    #[inline]
    fn matrices(&self) -> &[u32] {
        self.scrambled.as_deref().unwrap_or(&self.original)
    }

    /// Coordinate `j` of point `i` before the shift modulo 1.
    fn digital_coordinate(&self, i: usize, j: usize) -> f64 {
        let b = u64::from(self.base);
        let mut digits = Vec::with_capacity(self.num_cols);
        let mut rest = i as u64;
        while rest > 0 && digits.len() < self.num_cols {
            digits.push(rest % b);
            rest /= b;
        }

        let matrices = self.matrices();
        let output_digit = |l: usize| {
            let mut sum = self
                .digital_shift
                .as_ref()
                .map_or(0, |shift| u128::from(shift[j * self.num_rows + l]));
            let row = self.entry_index(j, l, 0);
            for (c, &digit) in digits.iter().enumerate() {
                sum += u128::from(matrices[row + c]) * u128::from(digit);
            }
            (sum % u128::from(b)) as u64
        };

        let mut result = match self.denominator {
            Some(denominator) => {
                let numerator = (0..self.num_rows).fold(0u64, |acc, l| acc * b + output_digit(l));
                numerator as f64 / denominator as f64
            }
            None => self
                .factors
                .iter()
                .enumerate()
                .map(|(l, &factor)| output_digit(l) as f64 * factor)
                .sum(),
        };
        if self.digital_shift.is_some() {
            result += EPSILON_HALF;
        }
        // Summing many digits can round up to 1.
        result.min(ONE_MINUS_ULP)
    }
}

impl PointSet for DigitalNet {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn num_points(&self) -> usize {
        self.num_points
    }

    fn coordinate(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.num_points && j < self.dimension);
        self.shift.apply(j, self.digital_coordinate(i, j))
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

    fn unrandomise(&mut self) {
        self.clear_random_shift();
        self.clear_digital_shift();
        self.reset_generator_matrices();
    }

    fn as_matrix_scramble(&mut self) -> Option<&mut dyn MatrixScramble> {
        Some(self)
    }
}

impl MatrixScramble for DigitalNet {
    fn striped_matrix_scramble(&mut self, stream: &mut dyn RandomStream) {
        let b = u128::from(self.base);
        let mut scrambled = vec![0u32; self.original.len()];
        let mut stripes = vec![0u128; self.num_rows];

        for j in 0..self.dimension {
            // Column c of M_j holds one random non-zero digit from row c down.
            for stripe in stripes.iter_mut() {
                *stripe = u128::from(stream.next_int(1, self.base - 1));
            }
            // Row l of M_j C_j = sum over c <= l of stripe_c * (row c of C_j).
            for l in 0..self.num_rows {
                for col in 0..self.num_cols {
                    let sum: u128 = (0..=l)
                        .map(|c| {
                            stripes[c] * u128::from(self.original[self.entry_index(j, c, col)])
                        })
                        .sum();
                    scrambled[self.entry_index(j, l, col)] = (sum % b) as u32;
                }
            }
        }
        tracing::trace!(
            dimension = self.dimension,
            rows = self.num_rows,
            "applied striped matrix scramble"
        );
        self.scrambled = Some(scrambled);
    }

    fn add_random_digital_shift(&mut self, stream: &mut dyn RandomStream) {
        let shift = (0..self.dimension * self.num_rows)
            .map(|_| stream.next_int(0, self.base - 1))
            .collect();
        tracing::trace!(dimension = self.dimension, "regenerated digital shift");
        self.digital_shift = Some(shift);
    }

    fn clear_digital_shift(&mut self) {
        self.digital_shift = None;
    }

    fn reset_generator_matrices(&mut self) {
        self.scrambled = None;
    }

    fn is_scrambled(&self) -> bool {
        self.scrambled.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radical_inverse::radical_inverse;
    use qmc_core::stream::SeededStream;

    #[test]
    fn test_hammersley_coordinates() {
        for base in [2u32, 3, 5] {
            let net = DigitalNet::hammersley(base, 3).unwrap();
            let n = net.num_points();
            assert_eq!(n, (base as usize).pow(3));
            for i in 0..n {
                assert_eq!(net.coordinate(i, 0), i as f64 / n as f64);
                assert_eq!(net.coordinate(i, 1), radical_inverse(base, i as u64).unwrap());
            }
        }
    }

    #[test]
    fn test_rejects_bad_matrices() {
        assert!(DigitalNet::from_generator_matrices(2, &[]).is_err());
        assert!(DigitalNet::from_generator_matrices(1, &[vec![vec![1]]]).is_err());
        assert!(DigitalNet::from_generator_matrices(2, &[vec![vec![]]]).is_err());

        let ragged = vec![vec![1, 0], vec![0]];
        let err = DigitalNet::from_generator_matrices(2, &[ragged]).unwrap_err();
        assert!(err.to_string().contains("is not 2 x 2"));

        let bad_digit = vec![vec![1, 3], vec![0, 1]];
        let err = DigitalNet::from_generator_matrices(3, &[bad_digit]).unwrap_err();
        assert!(err.to_string().contains("outside base 3"));
    }

    #[test]
    fn test_striped_scramble_base_two_is_all_ones_lower_triangle() {
        // In base 2 every stripe digit is 1, so M_j I = lower-triangular ones.
        let mut net = DigitalNet::hammersley(2, 4).unwrap();
        let mut stream = SeededStream::from_seed(1);
        net.striped_matrix_scramble(&mut stream);

        assert!(net.is_scrambled());
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(net.generator_entry(1, row, col), u32::from(col <= row));
            }
        }
    }

    #[test]
    fn test_striped_scramble_consumes_one_draw_per_row_and_dimension() {
        let mut net = DigitalNet::hammersley(3, 4).unwrap();
        let mut stream = SeededStream::from_seed(9);
        net.striped_matrix_scramble(&mut stream);

        let mut reference = SeededStream::from_seed(9);
        for _ in 0..(2 * 4) {
            reference.next_double();
        }
        assert_eq!(stream.next_double(), reference.next_double());
    }

    #[test]
    fn test_striped_scramble_keeps_net_property_in_one_dimension() {
        // A non-singular lower-triangular scramble permutes the b^k values i / b^k.
        let mut net = DigitalNet::hammersley(3, 3).unwrap();
        let mut stream = SeededStream::from_seed(5);
        net.striped_matrix_scramble(&mut stream);

        let n = net.num_points();
        for j in 0..2 {
            let mut cells: Vec<usize> = (0..n)
                .map(|i| (net.coordinate(i, j) * n as f64).round() as usize)
                .collect();
            cells.sort_unstable();
            assert_eq!(cells, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_rescramble_derives_from_original_matrices() {
        let mut twice = DigitalNet::hammersley(5, 3).unwrap();
        twice.striped_matrix_scramble(&mut SeededStream::from_seed(1));
        twice.striped_matrix_scramble(&mut SeededStream::from_seed(2));

        let mut once = DigitalNet::hammersley(5, 3).unwrap();
        once.striped_matrix_scramble(&mut SeededStream::from_seed(2));

        assert_eq!(twice.to_rows(), once.to_rows());
    }

    #[test]
    fn test_reset_generator_matrices() {
        let mut net = DigitalNet::hammersley(3, 3).unwrap();
        let plain = net.to_rows();
        net.striped_matrix_scramble(&mut SeededStream::from_seed(3));
        net.reset_generator_matrices();
        assert!(!net.is_scrambled());
        assert_eq!(net.to_rows(), plain);
    }

    #[test]
    fn test_digital_shift_adds_digits_modulo_base() {
        let mut net = DigitalNet::hammersley(3, 2).unwrap();
        let plain = net.to_rows();
        net.add_random_digital_shift(&mut SeededStream::from_seed(12));
        let shift = net.digital_shift().unwrap().to_vec();
        assert_eq!(shift.len(), 2 * 2);

        for (i, row) in plain.iter().enumerate() {
            for (j, &x) in row.iter().enumerate() {
                // Digits of the unshifted coordinate (2 base-3 digits).
                let scaled = (x * 9.0).round() as u32;
                let digits = [scaled / 3, scaled % 3];
                let shifted =
                    (digits[0] + shift[j * 2]) % 3 * 3 + (digits[1] + shift[j * 2 + 1]) % 3;
                let expected = shifted as f64 / 9.0 + EPSILON_HALF;
                assert_eq!(net.coordinate(i, j), expected, "i = {}, j = {}", i, j);
            }
        }
    }

    #[test]
    fn test_digital_shift_replaced_on_reapply() {
        let mut twice = DigitalNet::hammersley(3, 3).unwrap();
        twice.add_random_digital_shift(&mut SeededStream::from_seed(1));
        twice.add_random_digital_shift(&mut SeededStream::from_seed(2));

        let mut once = DigitalNet::hammersley(3, 3).unwrap();
        once.add_random_digital_shift(&mut SeededStream::from_seed(2));

        assert_eq!(twice.digital_shift(), once.digital_shift());
        assert_eq!(twice.to_rows(), once.to_rows());
    }

    #[test]
    fn test_unrandomise_clears_every_slot() {
        let mut net = DigitalNet::hammersley(3, 3).unwrap();
        let plain = net.to_rows();
        let mut stream = SeededStream::from_seed(6);

        net.striped_matrix_scramble(&mut stream);
        net.add_random_digital_shift(&mut stream);
        net.add_random_shift(&mut stream);
        assert_ne!(net.to_rows(), plain);

        net.unrandomise();
        assert!(!net.is_scrambled());
        assert!(net.digital_shift().is_none());
        assert!(net.random_shift().is_none());
        assert_eq!(net.to_rows(), plain);
    }

    #[test]
    fn test_long_digit_expansions_stay_below_one() {
        // 2^60 points: b^rows exceeds 2^53, every output digit of the last point is 1.
        let net = DigitalNet::hammersley(2, 60).unwrap();
        let last = net.num_points() - 1;
        for j in 0..2 {
            let x = net.coordinate(last, j);
            assert!(x < 1.0, "j = {}, x = {}", j, x);
            assert_eq!(x, ONE_MINUS_ULP);
        }

        let net = DigitalNet::hammersley(3, 34).unwrap();
        let x = net.coordinate(net.num_points() - 1, 0);
        assert!((0.0..1.0).contains(&x));
    }

    #[test]
    fn test_exposes_matrix_scramble_capability() {
        let mut net = DigitalNet::hammersley(2, 2).unwrap();
        assert!(net.as_matrix_scramble().is_some());
    }
}

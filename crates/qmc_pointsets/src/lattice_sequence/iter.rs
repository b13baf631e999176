//! Sequential enumeration of a Korobov lattice sequence.

use super::KorobovLatticeSequence;
use crate::sequence::LowDiscrepancySequence;

/// Enumerates the points of a [`KorobovLatticeSequence`] in order.
///
/// The digit reversal of the current index is computed once per point and
/// shared by all of its coordinates.
///
/// # Examples
///
/// ```rust
/// use qmc_pointsets::lattice_sequence::KorobovLatticeSequence;
/// use qmc_pointsets::sequence::LowDiscrepancySequence;
///
/// let mut points = KorobovLatticeSequence::new(2, 3).unwrap().points(2);
/// assert_eq!(points.next_point(), &[0.0, 0.0]);
/// assert_eq!(points.next_point(), &[0.5, 0.5]);
/// assert_eq!(points.next_point(), &[0.25, 0.75]);
/// ```
#[derive(Clone, Debug)]
pub struct KorobovSequenceIter {
    sequence: KorobovLatticeSequence,
    index: u64,
    buffer: Vec<f64>,
}

impl KorobovSequenceIter {
    pub(crate) fn new(sequence: KorobovLatticeSequence, dimension: usize) -> Self {
        Self {
            sequence,
            index: 0,
            buffer: vec![0.0; dimension],
        }
    }

    /// Index of the point the next call to `next_point` returns.
    ///
    /// Saturates at `u64::MAX`; past that point the last point repeats.
    pub fn index(&self) -> u64 {
        self.index
    }
}

impl LowDiscrepancySequence for KorobovSequenceIter {
    fn dimension(&self) -> usize {
        self.buffer.len()
    }

    fn next_point(&mut self) -> &[f64] {
        self.sequence.point(self.index, &mut self.buffer);
        self.index = self.index.saturating_add(1);
        &self.buffer
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn skip(&mut self, n: usize) {
        self.index = self.index.saturating_add(n as u64);
    }
}

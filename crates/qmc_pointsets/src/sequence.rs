//! Point-by-point enumeration of low-discrepancy sequences.

/// Trait for low-discrepancy sequences enumerated one point at a time.
///
/// Low-discrepancy sequences provide more uniform coverage of the unit
/// hypercube than pseudo-random sequences, which often leads to faster
/// convergence in numerical integration.
pub trait LowDiscrepancySequence {
    /// Returns the dimensionality of the sequence.
    fn dimension(&self) -> usize;

    /// Advances the sequence and returns the next point.
    ///
    /// # Returns
    ///
    /// A slice of `dimension()` values, each in the interval [0, 1).
    fn next_point(&mut self) -> &[f64];

    /// Resets the sequence to its initial state.
    ///
    /// After calling this method, the sequence will produce the same
    /// points as a newly initialised instance.
    fn reset(&mut self);

    /// Skips ahead by `n` points in the sequence.
    ///
    /// This is useful for parallel computation where different workers
    /// need to process non-overlapping portions of the sequence.
    fn skip(&mut self, n: usize);
}

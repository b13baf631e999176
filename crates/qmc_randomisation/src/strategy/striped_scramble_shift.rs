//! Striped matrix scramble plus random digital shift for digital nets.

use qmc_core::point_set::PointSet;
use qmc_core::stream::StreamHandle;
use qmc_core::QmcError;

use super::{borrow_stream, PointSetRandomisation, UniformShift};

const OPERATION: &str = "StripedScrambleShift::randomise";

/// Striped matrix scramble followed by a random digital shift.
///
/// Only point sets exposing the matrix-scramble capability (digital nets)
/// can be randomised. The scramble is applied first so that the digital
/// shift acts on the scrambled net. Both draw from the same held stream.
///
/// # Examples
///
/// ```rust
/// use qmc_core::point_set::{MatrixScramble, PointSet};
/// use qmc_core::stream::{shared, SeededStream};
/// use qmc_pointsets::DigitalNet;
/// use qmc_randomisation::strategy::{PointSetRandomisation, StripedScrambleShift};
///
/// let mut net = DigitalNet::hammersley(3, 4).unwrap();
/// let strategy = StripedScrambleShift::new(shared(SeededStream::from_seed(11)));
/// strategy.randomise(&mut net).unwrap();
///
/// assert!(net.is_scrambled());
/// assert!(net.digital_shift().is_some());
/// ```
#[derive(Clone)]
pub struct StripedScrambleShift {
    base: UniformShift,
}

impl StripedScrambleShift {
    /// Strategy drawing from `stream`.
    pub fn new(stream: StreamHandle) -> Self {
        Self {
            base: UniformShift::new(stream),
        }
    }
}

impl PointSetRandomisation for StripedScrambleShift {
    fn randomise(&self, point_set: &mut dyn PointSet) -> Result<(), QmcError> {
        let dimension = point_set.dimension();
        let points = point_set.num_points();

        let net = point_set.as_matrix_scramble().ok_or_else(|| {
            QmcError::invalid_argument(
                OPERATION,
                "point set must be a DigitalNet with the matrix-scramble capability",
            )
        })?;
        let mut stream = borrow_stream(OPERATION, self.base.handle())?;

        net.striped_matrix_scramble(&mut *stream);
        net.add_random_digital_shift(&mut *stream);
        tracing::debug!(strategy = self.label(), dimension, points, "randomisation applied");
        Ok(())
    }

    fn set_stream(&mut self, stream: StreamHandle) {
        self.base.set_stream(stream);
    }

    fn stream(&self) -> Option<StreamHandle> {
        self.base.stream()
    }

    fn label(&self) -> &'static str {
        "striped matrix scramble + random digital shift"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmc_core::point_set::{shift_mod1, MatrixScramble};
    use qmc_core::stream::{shared, RandomStream, SeededStream};
    use qmc_pointsets::lattice_sequence::KorobovLatticeSequence;
    use qmc_pointsets::DigitalNet;
    use std::rc::Rc;

    #[test]
    fn test_requires_matrix_scramble_capability() {
        let mut lattice = KorobovLatticeSequence::new(2, 3)
            .unwrap()
            .embedded_lattice(5, 3)
            .unwrap();
        let before: Vec<Vec<u64>> = lattice
            .to_rows()
            .iter()
            .map(|row| row.iter().map(|x| x.to_bits()).collect())
            .collect();

        let handle = shared(SeededStream::from_seed(3));
        let strategy = StripedScrambleShift::new(Rc::clone(&handle));
        let err = strategy.randomise(&mut lattice).unwrap_err();

        assert!(err.is_invalid_argument());
        let message = err.to_string();
        assert!(message.contains("StripedScrambleShift::randomise"));
        assert!(message.contains("DigitalNet"));

        let after: Vec<Vec<u64>> = lattice
            .to_rows()
            .iter()
            .map(|row| row.iter().map(|x| x.to_bits()).collect())
            .collect();
        assert_eq!(before, after);
        assert!(lattice.random_shift().is_none());

        // No draw was consumed.
        let next = handle.borrow_mut().next_double();
        assert_eq!(next, SeededStream::from_seed(3).next_double());
    }

    #[test]
    fn test_scramble_then_digital_shift_from_one_stream() {
        let mut net = DigitalNet::hammersley(3, 4).unwrap();
        StripedScrambleShift::new(shared(SeededStream::from_seed(17)))
            .randomise(&mut net)
            .unwrap();

        let mut manual = DigitalNet::hammersley(3, 4).unwrap();
        let mut stream = SeededStream::from_seed(17);
        manual.striped_matrix_scramble(&mut stream);
        manual.add_random_digital_shift(&mut stream);

        assert!(net.is_scrambled());
        assert_eq!(net.digital_shift(), manual.digital_shift());
        assert_eq!(net.to_rows(), manual.to_rows());
    }

    #[test]
    fn test_reapply_replaces_previous_contribution() {
        let mut twice = DigitalNet::hammersley(5, 3).unwrap();
        StripedScrambleShift::new(shared(SeededStream::from_seed(1)))
            .randomise(&mut twice)
            .unwrap();
        StripedScrambleShift::new(shared(SeededStream::from_seed(2)))
            .randomise(&mut twice)
            .unwrap();

        let mut once = DigitalNet::hammersley(5, 3).unwrap();
        StripedScrambleShift::new(shared(SeededStream::from_seed(2)))
            .randomise(&mut once)
            .unwrap();

        assert_eq!(twice.to_rows(), once.to_rows());
    }

    #[test]
    fn test_composes_with_uniform_shift() {
        let mut net = DigitalNet::hammersley(3, 3).unwrap();
        UniformShift::new(shared(SeededStream::from_seed(21)))
            .randomise(&mut net)
            .unwrap();
        let shift = net.random_shift().unwrap().to_vec();

        StripedScrambleShift::new(shared(SeededStream::from_seed(22)))
            .randomise(&mut net)
            .unwrap();

        let mut scrambled_only = DigitalNet::hammersley(3, 3).unwrap();
        StripedScrambleShift::new(shared(SeededStream::from_seed(22)))
            .randomise(&mut scrambled_only)
            .unwrap();

        // The modulo-1 shift survives on top of the scramble and digital shift.
        assert_eq!(net.random_shift().unwrap(), &shift[..]);
        for i in 0..net.num_points() {
            for (j, &s) in shift.iter().enumerate() {
                assert_eq!(net.coordinate(i, j), shift_mod1(scrambled_only.coordinate(i, j), s));
            }
        }
    }

    #[test]
    fn test_accessors_and_label() {
        let first = shared(SeededStream::from_seed(1));
        let mut strategy = StripedScrambleShift::new(Rc::clone(&first));
        assert!(Rc::ptr_eq(&strategy.stream().unwrap(), &first));

        let second = shared(SeededStream::from_seed(2));
        strategy.set_stream(Rc::clone(&second));
        assert!(Rc::ptr_eq(&strategy.stream().unwrap(), &second));
        assert_eq!(strategy.label(), "striped matrix scramble + random digital shift");
    }
}

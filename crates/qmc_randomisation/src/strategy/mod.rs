//! # Randomisation Strategies
//!
//! A strategy perturbs a point set in place with draws from a random stream
//! it shares with the caller. Three strategies are provided:
//!
//! - [`Identity`]: leaves the point set untouched and never draws
//! - [`UniformShift`]: random shift modulo 1, one uniform per coordinate
//! - [`StripedScrambleShift`]: striped matrix scramble followed by a random
//!   digital shift, for point sets with the matrix-scramble capability
//!
//! ## Composition
//!
//! Strategies of different types applied in sequence to the same point set
//! keep both effects. Reapplying a strategy of the same type replaces its
//! previous contribution, because every point-set operation a strategy calls
//! owns a single slot of randomisation state:
//!
//! | strategy               | point-set operations                                    |
//! |------------------------|---------------------------------------------------------|
//! | `Identity`             | none                                                    |
//! | `UniformShift`         | `add_random_shift`                                      |
//! | `StripedScrambleShift` | `striped_matrix_scramble`, then `add_random_digital_shift` |
//!
//! ## Usage Example
//!
//! ```rust
//! use qmc_core::point_set::PointSet;
//! use qmc_core::stream::{shared, SeededStream};
//! use qmc_pointsets::lattice_sequence::KorobovLatticeSequence;
//! use qmc_randomisation::strategy::{PointSetRandomisation, UniformShift};
//!
//! let mut lattice = KorobovLatticeSequence::new(2, 76)
//!     .unwrap()
//!     .embedded_lattice(8, 3)
//!     .unwrap();
//!
//! let shift = UniformShift::new(shared(SeededStream::from_seed(7)));
//! shift.randomise(&mut lattice).unwrap();
//! assert!(lattice.random_shift().is_some());
//! ```

mod identity;
mod striped_scramble_shift;
mod uniform_shift;

use qmc_core::point_set::PointSet;
use qmc_core::stream::{RandomStream, StreamHandle};
use qmc_core::QmcError;
use std::cell::RefMut;

pub use identity::Identity;
pub use striped_scramble_shift::StripedScrambleShift;
pub use uniform_shift::UniformShift;

/// A randomisation applied in place to a point set.
pub trait PointSetRandomisation {
    /// Randomises `point_set` with draws from the held stream.
    ///
    /// # Errors
    ///
    /// Returns `QmcError::InvalidArgument` if the point set lacks a capability
    /// the strategy requires or the stream is already borrowed elsewhere. The
    /// point set is left unmodified in either case.
    fn randomise(&self, point_set: &mut dyn PointSet) -> Result<(), QmcError>;

    /// Replaces the held stream.
    fn set_stream(&mut self, stream: StreamHandle);

    /// Returns the held stream, if any.
    fn stream(&self) -> Option<StreamHandle>;

    /// Short description for diagnostics.
    fn label(&self) -> &'static str;
}

/// Mutably borrows `stream` for the duration of one randomisation.
pub(crate) fn borrow_stream<'a>(
    operation: &'static str,
    stream: &'a StreamHandle,
) -> Result<RefMut<'a, dyn RandomStream + 'static>, QmcError> {
    stream
        .try_borrow_mut()
        .map_err(|_| QmcError::invalid_argument(operation, "random stream is already borrowed"))
}

#[cfg(test)]
pub(crate) mod test_support {
    use qmc_core::stream::RandomStream;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Deterministic stream that counts its draws.
    pub struct CountingStream {
        draws: Rc<Cell<usize>>,
        state: u64,
    }

    impl CountingStream {
        pub fn new() -> (Self, Rc<Cell<usize>>) {
            let draws = Rc::new(Cell::new(0));
            (
                Self {
                    draws: Rc::clone(&draws),
                    state: 1,
                },
                draws,
            )
        }
    }

    impl RandomStream for CountingStream {
        fn next_double(&mut self) -> f64 {
            self.draws.set(self.draws.get() + 1);
            self.state = self
                .state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (self.state >> 11) as f64 / (1u64 << 53) as f64
        }

        fn reset_start_stream(&mut self) {
            self.state = 1;
        }
    }
}

//! # Random Streams
//!
//! This module provides the source of uniform variates consumed by point-set
//! randomisations. Randomisation strategies never own their stream: they hold
//! a [`StreamHandle`] shared with the caller, who keeps control of seeding and
//! may replace or re-seed it between randomisations.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: [`SeededStream`] replays the same variates from the
//!   same seed, and [`RandomStream::reset_start_stream`] rewinds to that seed
//! - **No reimplementation**: the uniform generator is `rand::rngs::StdRng`
//! - **Single writer**: a [`StreamHandle`] is an `Rc<RefCell<_>>`; handles are
//!   not `Send`, so each stream is driven from one thread at a time
//!
//! ## British English Convention
//!
//! All documentation in this module uses British English spelling conventions
//! ("initialise", "randomise", "behaviour").
//!
//! ## Usage Example
//!
//! ```rust
//! use qmc_core::stream::{shared, RandomStream, SeededStream};
//!
//! let handle = shared(SeededStream::from_seed(12345));
//!
//! // Draw a uniform in [0, 1) through the shared handle
//! let u = handle.borrow_mut().next_double();
//! assert!((0.0..1.0).contains(&u));
//!
//! // Draw a digit in {0, ..., 6}
//! let digit = handle.borrow_mut().next_int(0, 6);
//! assert!(digit <= 6);
//! ```

mod seeded;

use std::cell::RefCell;
use std::rc::Rc;

pub use seeded::SeededStream;

/// Source of independent uniform variates.
///
/// Implementations must return values in the half-open interval [0, 1) from
/// [`next_double`](RandomStream::next_double), and successive draws must be
/// reproducible from the same starting state.
pub trait RandomStream {
    /// Returns the next uniform variate in [0, 1).
    fn next_double(&mut self) -> f64;

    /// Returns a uniform integer in the closed range `[low, high]`.
    ///
    /// Consumes exactly one uniform variate.
    fn next_int(&mut self, low: u32, high: u32) -> u32 {
        debug_assert!(low <= high, "next_int: low {} > high {}", low, high);
        let span = (high - low) as f64 + 1.0;
        let offset = (self.next_double() * span) as u32;
        low + offset.min(high - low)
    }

    /// Fills `buffer` with uniform variates, one draw per element.
    fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_double();
        }
    }

    /// Rewinds the stream to its initial state.
    fn reset_start_stream(&mut self);
}

/// Shared, non-owning handle to a random stream.
///
/// Strategies and callers clone the handle; the stream lives as long as any
/// clone does.
pub type StreamHandle = Rc<RefCell<dyn RandomStream>>;

/// Wraps `stream` into a [`StreamHandle`].
pub fn shared<S: RandomStream + 'static>(stream: S) -> StreamHandle {
    Rc::new(RefCell::new(stream))
}

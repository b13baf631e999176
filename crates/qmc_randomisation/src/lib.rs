//! # qmc_randomisation: Randomised Quasi-Monte Carlo Strategies
//!
//! ## Layer 3 (Randomisation) Role
//!
//! qmc_randomisation sits on top of qmc_core and qmc_pointsets and provides:
//! - The `PointSetRandomisation` contract and its three strategies
//!   `Identity`, `UniformShift`, `StripedScrambleShift` (`strategy`)
//! - Construction of strategies and randomised lattices from a `QmcConfig`
//!   (`factory`)
//!
//! ## Streams
//!
//! Strategies share their random stream with the caller through a
//! `StreamHandle`. A handle is single-threaded; one stream may feed several
//! strategies in turn, each call borrowing it for the duration of one
//! randomisation.
//!
//! ## Usage Examples
//!
//! ```rust
//! use qmc_core::point_set::PointSet;
//! use qmc_core::stream::{shared, SeededStream};
//! use qmc_pointsets::DigitalNet;
//! use qmc_randomisation::{PointSetRandomisation, StripedScrambleShift, UniformShift};
//!
//! let stream = shared(SeededStream::from_seed(2024));
//! let mut net = DigitalNet::hammersley(2, 10).unwrap();
//!
//! // Different strategies compose: both effects persist.
//! UniformShift::new(stream.clone()).randomise(&mut net).unwrap();
//! StripedScrambleShift::new(stream).randomise(&mut net).unwrap();
//!
//! assert!(net.random_shift().is_some());
//! assert!(net.digital_shift().is_some());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod factory;
pub mod strategy;

pub use factory::{strategy_for, RandomisedLattice};
pub use strategy::{Identity, PointSetRandomisation, StripedScrambleShift, UniformShift};

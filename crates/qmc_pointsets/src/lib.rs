//! # qmc_pointsets: Quasi-Monte Carlo Point Sets and Sequences
//!
//! ## Layer 2 (Point Sets) Role
//!
//! qmc_pointsets builds on qmc_core and provides the point constructions that
//! randomisation strategies act on:
//! - Radical inverse and digit reversal in any base (`radical_inverse`)
//! - Korobov lattice sequences and their embedded `b^k`-point lattices
//!   (`lattice_sequence`)
//! - Digital nets with striped matrix scrambles and digital shifts
//!   (`digital_net`)
//! - Point-by-point enumeration (`sequence`)
//!
//! ## Dependencies
//!
//! - qmc_core: error type, streams, point-set traits
//! - num-bigint + num-rational: moduli beyond `2^64` and correctly rounded ratios
//! - rayon: parallel point materialisation
//! - tracing: diagnostics
//!
//! ## Usage Examples
//!
//! ```rust
//! use qmc_core::point_set::PointSet;
//! use qmc_pointsets::lattice_sequence::KorobovLatticeSequence;
//!
//! let sequence = KorobovLatticeSequence::new(2, 3).unwrap();
//! assert_eq!(sequence.coordinate(3, 1), 0.25);
//!
//! // The first 2^4 points form the 16-point Korobov lattice with multiplier 3.
//! let lattice = sequence.embedded_lattice(4, 2).unwrap();
//! assert_eq!(lattice.num_points(), 16);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod digital_net;
pub mod lattice_sequence;
pub mod radical_inverse;
pub mod sequence;

pub use digital_net::DigitalNet;
pub use lattice_sequence::{korobov_sequence_coordinate, EmbeddedLattice, KorobovLatticeSequence};
pub use sequence::LowDiscrepancySequence;

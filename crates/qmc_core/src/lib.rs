//! # qmc_core: Foundation for Randomised Quasi-Monte Carlo
//!
//! ## Layer 1 (Foundation) Role
//!
//! qmc_core is the bottom layer of the 3-layer architecture, providing:
//! - Error types: `QmcError` (`error`)
//! - Uniform random streams and the shared `StreamHandle` (`stream`)
//! - Point-set capability traits: `PointSet`, `MatrixScramble` (`point_set`)
//! - TOML configuration: `QmcConfig`, `RandomisationKind` (`config`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other qmc_* crates, with minimal external dependencies:
//! - rand: seeded uniform generator behind `SeededStream`
//! - thiserror: error derives
//! - serde + toml: configuration loading
//! - tracing: diagnostics
//!
//! ## Usage Examples
//!
//! ```rust
//! use qmc_core::point_set::shift_mod1;
//! use qmc_core::stream::{shared, RandomStream, SeededStream};
//!
//! let handle = shared(SeededStream::from_seed(2024));
//! let shift = handle.borrow_mut().next_double();
//!
//! let shifted = shift_mod1(0.5, shift);
//! assert!(shifted > 0.0 && shifted < 1.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod error;
pub mod point_set;
pub mod stream;

pub use error::QmcError;

//! Randomised QMC configuration.
//!
//! Handles loading the lattice and randomisation settings from TOML files or
//! strings. Missing keys fall back to [`QmcConfig::default`].
//!
//! ```toml
//! base = 2
//! multiplier = 76
//! exponent = 10
//! dimension = 4
//! seed = 12345
//! randomisation = "uniform_shift"
//! ```

use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::error::QmcError;
use crate::stream::{shared, SeededStream, StreamHandle};

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("Configuration parse error: {0}")]
    Parse(String),

    /// The configuration file could not be read.
    #[error("Configuration file error: {0}")]
    File(String),

    /// A value was parsed but is not acceptable.
    #[error(transparent)]
    Invalid(#[from] QmcError),
}

/// Randomisation applied to the point set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomisationKind {
    /// No randomisation.
    Identity,
    /// Random shift modulo 1.
    #[default]
    UniformShift,
    /// Striped matrix scramble followed by a random digital shift.
    StripedScrambleShift,
}

/// Randomisations known by name whose implementations are not provided.
const UNPROVIDED_RANDOMISATIONS: &[&str] = &[
    "left_matrix_scramble_shift",
    "right_matrix_scramble_shift",
    "nested_uniform_scramble",
];

impl FromStr for RandomisationKind {
    type Err = QmcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        match name.as_str() {
            "identity" | "none" => Ok(RandomisationKind::Identity),
            "uniform_shift" | "random_shift" => Ok(RandomisationKind::UniformShift),
            "striped_scramble_shift" => Ok(RandomisationKind::StripedScrambleShift),
            other if UNPROVIDED_RANDOMISATIONS.contains(&other) => Err(QmcError::Unimplemented(
                format!("randomisation '{}' is not provided", other),
            )),
            other => Err(QmcError::invalid_argument(
                "RandomisationKind::from_str",
                format!(
                    "unknown randomisation '{}': must be one of identity, uniform_shift, \
                     striped_scramble_shift",
                    other
                ),
            )),
        }
    }
}

impl RandomisationKind {
    /// Canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RandomisationKind::Identity => "identity",
            RandomisationKind::UniformShift => "uniform_shift",
            RandomisationKind::StripedScrambleShift => "striped_scramble_shift",
        }
    }
}

impl std::fmt::Display for RandomisationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lattice sequence and randomisation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QmcConfig {
    /// Base `b` of the lattice sequence.
    pub base: u32,
    /// Multiplier `a` of the lattice sequence.
    pub multiplier: u64,
    /// Exponent `k`; the point set holds `b^k` points.
    pub exponent: u32,
    /// Number of coordinates per point.
    pub dimension: usize,
    /// Seed of the randomisation stream.
    pub seed: u64,
    /// Randomisation name, parsed with [`RandomisationKind::from_str`].
    pub randomisation: String,
}

impl Default for QmcConfig {
    fn default() -> Self {
        Self {
            base: 2,
            multiplier: 76,
            exponent: 10,
            dimension: 4,
            seed: 12345,
            randomisation: RandomisationKind::default().as_str().to_string(),
        }
    }
}

impl QmcConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: QmcConfig = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        tracing::debug!(?config, "loaded QMC configuration");
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::File(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `QmcError::InvalidArgument` if:
    /// - `base` < 2 or `multiplier` < 1
    /// - `dimension` is 0
    /// - `base^exponent` overflows `usize`
    ///
    /// and the error of [`RandomisationKind::from_str`] for a bad name.
    pub fn validate(&self) -> Result<(), QmcError> {
        if self.base < 2 {
            return Err(QmcError::invalid_argument(
                "QmcConfig::validate",
                format!("base must be >= 2, got {}", self.base),
            ));
        }
        if self.multiplier < 1 {
            return Err(QmcError::invalid_argument(
                "QmcConfig::validate",
                "multiplier must be >= 1, got 0",
            ));
        }
        if self.dimension == 0 {
            return Err(QmcError::invalid_argument(
                "QmcConfig::validate",
                "dimension must be >= 1",
            ));
        }
        self.num_points()?;
        self.randomisation_kind()?;
        Ok(())
    }

    /// Number of points `b^k`.
    pub fn num_points(&self) -> Result<usize, QmcError> {
        (self.base as usize).checked_pow(self.exponent).ok_or_else(|| {
            QmcError::invalid_argument(
                "QmcConfig::num_points",
                format!("{}^{} points overflow usize", self.base, self.exponent),
            )
        })
    }

    /// Parsed randomisation kind.
    pub fn randomisation_kind(&self) -> Result<RandomisationKind, QmcError> {
        self.randomisation.parse()
    }

    /// Fresh stream seeded from `seed`.
    pub fn stream_handle(&self) -> StreamHandle {
        shared(SeededStream::from_seed(self.seed))
    }
}

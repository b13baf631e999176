//! Building strategies and randomised lattices from configuration.

use qmc_core::config::{ConfigError, QmcConfig, RandomisationKind};
use qmc_core::point_set::PointSet;
use qmc_core::stream::StreamHandle;
use qmc_core::QmcError;
use qmc_pointsets::lattice_sequence::{EmbeddedLattice, KorobovLatticeSequence};

use crate::strategy::{
    borrow_stream, Identity, PointSetRandomisation, StripedScrambleShift, UniformShift,
};

/// Builds the strategy of the given kind, drawing from `stream`.
///
/// # Examples
///
/// ```rust
/// use qmc_core::config::RandomisationKind;
/// use qmc_core::stream::{shared, SeededStream};
/// use qmc_randomisation::factory::strategy_for;
///
/// let stream = shared(SeededStream::from_seed(1));
/// let strategy = strategy_for(RandomisationKind::UniformShift, stream);
/// assert_eq!(strategy.label(), "random shift modulo 1");
/// ```
pub fn strategy_for(
    kind: RandomisationKind,
    stream: StreamHandle,
) -> Box<dyn PointSetRandomisation> {
    match kind {
        RandomisationKind::Identity => Box::new(Identity::with_stream(stream)),
        RandomisationKind::UniformShift => Box::new(UniformShift::new(stream)),
        RandomisationKind::StripedScrambleShift => Box::new(StripedScrambleShift::new(stream)),
    }
}

/// An embedded Korobov lattice together with its strategy and stream.
///
/// # Examples
///
/// ```rust
/// use qmc_core::config::QmcConfig;
/// use qmc_core::point_set::PointSet;
/// use qmc_randomisation::factory::RandomisedLattice;
///
/// let config = QmcConfig::from_toml_str("exponent = 6\ndimension = 3").unwrap();
/// let mut rqmc = RandomisedLattice::from_config(&config).unwrap();
///
/// rqmc.randomise().unwrap();
/// assert_eq!(rqmc.lattice().num_points(), 64);
/// assert!(rqmc.lattice().random_shift().is_some());
/// ```
pub struct RandomisedLattice {
    lattice: EmbeddedLattice,
    strategy: Box<dyn PointSetRandomisation>,
    stream: StreamHandle,
}

impl RandomisedLattice {
    /// Builds the lattice, a stream seeded from `config.seed` and the
    /// configured strategy.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the configuration fails validation
    /// or names a strategy lattices cannot take (`striped_scramble_shift`
    /// needs a digital net).
    pub fn from_config(config: &QmcConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let kind = config.randomisation_kind()?;
        if kind == RandomisationKind::StripedScrambleShift {
            return Err(QmcError::invalid_argument(
                "RandomisedLattice::from_config",
                format!("randomisation '{}' requires a DigitalNet point set", kind),
            )
            .into());
        }

        let lattice = KorobovLatticeSequence::new(config.base, config.multiplier)?
            .embedded_lattice(config.exponent, config.dimension)?;
        let stream = config.stream_handle();
        let strategy = strategy_for(kind, stream.clone());
        tracing::debug!(
            base = config.base,
            multiplier = config.multiplier,
            points = lattice.num_points(),
            dimension = lattice.dimension(),
            strategy = strategy.label(),
            "built randomised lattice"
        );
        Ok(Self {
            lattice,
            strategy,
            stream,
        })
    }

    /// Applies the strategy once more, replacing its previous contribution.
    pub fn randomise(&mut self) -> Result<(), QmcError> {
        self.strategy.randomise(&mut self.lattice)
    }

    /// Rewinds the stream to its seed and removes every randomisation.
    ///
    /// # Errors
    ///
    /// Returns `QmcError::InvalidArgument` if the stream is borrowed elsewhere.
    pub fn reset(&mut self) -> Result<(), QmcError> {
        borrow_stream("RandomisedLattice::reset", &self.stream)?.reset_start_stream();
        self.lattice.unrandomise();
        Ok(())
    }

    /// The point set.
    pub fn lattice(&self) -> &EmbeddedLattice {
        &self.lattice
    }

    /// The strategy.
    pub fn strategy(&self) -> &dyn PointSetRandomisation {
        self.strategy.as_ref()
    }

    /// The shared stream.
    pub fn stream(&self) -> &StreamHandle {
        &self.stream
    }
}

//! Randomisation that leaves the point set untouched.

use qmc_core::point_set::PointSet;
use qmc_core::stream::StreamHandle;
use qmc_core::QmcError;

use super::PointSetRandomisation;

/// Randomisation that does nothing.
///
/// Stands in where a strategy is required but no perturbation is wanted. It
/// may hold a stream so that it can be swapped with other strategies, but
/// never draws from it.
#[derive(Clone, Default)]
pub struct Identity {
    stream: Option<StreamHandle>,
}

impl Identity {
    /// Identity without a stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity holding `stream`.
    pub fn with_stream(stream: StreamHandle) -> Self {
        Self {
            stream: Some(stream),
        }
    }
}

impl PointSetRandomisation for Identity {
    fn randomise(&self, point_set: &mut dyn PointSet) -> Result<(), QmcError> {
        tracing::debug!(
            strategy = self.label(),
            dimension = point_set.dimension(),
            points = point_set.num_points(),
            "randomisation applied"
        );
        Ok(())
    }

    fn set_stream(&mut self, stream: StreamHandle) {
        self.stream = Some(stream);
    }

    fn stream(&self) -> Option<StreamHandle> {
        self.stream.clone()
    }

    fn label(&self) -> &'static str {
        "identity"
    }
}

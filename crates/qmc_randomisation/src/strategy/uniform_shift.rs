//! Random shift modulo 1 applied to every point.

use qmc_core::point_set::PointSet;
use qmc_core::stream::StreamHandle;
use qmc_core::QmcError;

use super::{borrow_stream, PointSetRandomisation};

/// Random shift modulo 1.
///
/// Each call to [`randomise`](PointSetRandomisation::randomise) asks the
/// point set to draw `dimension()` uniforms from the held stream and add them
/// modulo 1 to every point, replacing any shift made earlier.
///
/// # Examples
///
/// ```rust
/// use qmc_core::point_set::PointSet;
/// use qmc_core::stream::{shared, SeededStream};
/// use qmc_pointsets::DigitalNet;
/// use qmc_randomisation::strategy::{PointSetRandomisation, UniformShift};
///
/// let mut net = DigitalNet::hammersley(2, 4).unwrap();
/// let shift = UniformShift::new(shared(SeededStream::from_seed(3)));
/// shift.randomise(&mut net).unwrap();
///
/// let x = net.coordinate(0, 0);
/// assert!(x > 0.0 && x < 1.0);
/// ```
#[derive(Clone)]
pub struct UniformShift {
    stream: StreamHandle,
}

impl UniformShift {
    /// Shift drawing from `stream`.
    pub fn new(stream: StreamHandle) -> Self {
        Self { stream }
    }

    /// The held stream.
    pub fn handle(&self) -> &StreamHandle {
        &self.stream
    }
}

impl PointSetRandomisation for UniformShift {
    fn randomise(&self, point_set: &mut dyn PointSet) -> Result<(), QmcError> {
        let mut stream = borrow_stream("UniformShift::randomise", &self.stream)?;
        point_set.add_random_shift(&mut *stream);
        tracing::debug!(
            strategy = self.label(),
            dimension = point_set.dimension(),
            points = point_set.num_points(),
            "randomisation applied"
        );
        Ok(())
    }

    fn set_stream(&mut self, stream: StreamHandle) {
        self.stream = stream;
    }

    fn stream(&self) -> Option<StreamHandle> {
        Some(self.stream.clone())
    }

    fn label(&self) -> &'static str {
        "random shift modulo 1"
    }
}

//! Propagator trait for time-stepping algorithms

use crate::engine::array::{Complex64, WaveField};
use crate::error::WaveError;
use std::fmt::Debug;

/// Trait defining the interface for time-domain field propagators
pub trait Propagator: Debug + Send {
    /// Advance the field by one discrete time step.
    ///
    /// The first call after construction or [`reset`](Propagator::reset)
    /// seeds the history buffers from the incoming field and performs no
    /// update.
    fn propagate(&mut self, field: &mut WaveField) -> Result<(), WaveError>;

    /// Drop the history buffers; the next propagate call re-seeds them
    fn reset(&mut self);

    /// Write an amplitude into both history buffers at a cell.
    ///
    /// Used by driven sources so the stencil sees the forced value on the
    /// following steps.
    fn set_boundary_value(&mut self, i: usize, j: usize, value: Complex64)
        -> Result<(), WaveError>;

    /// Scale both history buffers by a real factor
    fn scale_amplitudes(&mut self, factor: f64);

    /// One-step-back field, if history has been seeded
    fn last(&self) -> Option<&WaveField>;

    /// Two-steps-back field, if history has been seeded
    fn last2(&self) -> Option<&WaveField>;
}

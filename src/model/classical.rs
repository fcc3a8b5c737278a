//! Classical wave propagator
//!
//! Advances a 2D complex field by one discrete time step using a
//! second-order finite-difference update over the two previous field
//! states. Cells covered by a nonzero potential are forced to zero
//! amplitude, and the outermost ring of cells is overwritten from the
//! two-steps-back buffer at the adjacent interior row or column,
//! approximating an absorbing boundary.

use crate::engine::array::{Complex64, WaveField};
use crate::engine::operations;
use crate::error::WaveError;
use crate::model::potential::Potential;
use crate::model::propagator::Propagator;
use rayon::prelude::*;

/// Finite-difference propagator for the classical wave equation
#[derive(Debug)]
pub struct ClassicalWavePropagator<P: Potential> {
    potential: P,
    last: Option<WaveField>,
    last2: Option<WaveField>,
}

impl<P: Potential> ClassicalWavePropagator<P> {
    /// Create a propagator with empty history.
    ///
    /// History is seeded from the field passed to the first
    /// [`propagate`](Propagator::propagate) call.
    pub fn new(potential: P) -> Self {
        Self {
            potential,
            last: None,
            last2: None,
        }
    }

    /// The obstruction potential consulted each step
    pub fn potential(&self) -> &P {
        &self.potential
    }

    /// Replace both history buffers
    pub fn initialize(&mut self, last: WaveField, last2: WaveField) -> Result<(), WaveError> {
        if last.shape() != last2.shape() {
            return Err(WaveError::ShapeMismatch {
                expected: last.shape(),
                found: last2.shape(),
            });
        }
        self.last = Some(last);
        self.last2 = Some(last2);
        Ok(())
    }

    /// Accumulate into the history buffers, creating empty ones if absent
    pub fn add_initialization(
        &mut self,
        last: &WaveField,
        last2: &WaveField,
    ) -> Result<(), WaveError> {
        if last.shape() != last2.shape() {
            return Err(WaveError::ShapeMismatch {
                expected: last.shape(),
                found: last2.shape(),
            });
        }
        if let Some(buf) = &self.last {
            if buf.shape() != last.shape() {
                return Err(WaveError::ShapeMismatch {
                    expected: buf.shape(),
                    found: last.shape(),
                });
            }
        }
        let (w, h) = last.shape();
        self.last
            .get_or_insert_with(|| WaveField::zeros(w, h))
            .add(last);
        self.last2
            .get_or_insert_with(|| WaveField::zeros(w, h))
            .add(last2);
        Ok(())
    }

    /// History value at a cell, reading zero where the potential blocks
    fn masked(&self, last: &WaveField, i: usize, j: usize) -> Complex64 {
        if self.potential.is_blocked(i, j) {
            Complex64::new(0.0, 0.0)
        } else {
            last.data[[i, j]]
        }
    }

    /// Parallel variant of [`propagate`](Propagator::propagate).
    ///
    /// Computes the interior stencil across rows with rayon; edge damping
    /// and the history shift stay serial. Produces the same field as the
    /// serial path.
    pub fn propagate_parallel(&mut self, field: &mut WaveField) -> Result<(), WaveError> {
        let (w, h) = field.shape();
        check_min_size(w, h)?;
        if self.seed_if_empty(field) {
            return Ok(());
        }

        if let (Some(last), Some(last2)) = (&self.last, &self.last2) {
            check_history_shape(last, last2, (w, h))?;

            let potential = &self.potential;
            let masked = |i: usize, j: usize| -> Complex64 {
                if potential.is_blocked(i, j) {
                    Complex64::new(0.0, 0.0)
                } else {
                    last.data[[i, j]]
                }
            };
            let updates: Vec<(usize, usize, Complex64)> = (1..w - 1)
                .into_par_iter()
                .flat_map_iter(|i| {
                    (1..h - 1).map(move |j| {
                        let value = if potential.is_blocked(i, j) {
                            Complex64::new(0.0, 0.0)
                        } else {
                            let center = last.data[[i, j]];
                            let neigh = (masked(i + 1, j)
                                + masked(i - 1, j)
                                + masked(i, j + 1)
                                + masked(i, j - 1)
                                - center * 4.0)
                                * 0.25;
                            center * 2.0 - last2.data[[i, j]] + neigh
                        };
                        (i, j, value)
                    })
                })
                .collect();

            for (i, j, value) in updates {
                field.data[[i, j]] = value;
            }

            damp_rows(field, last2);
            damp_cols(field, last2);
        }
        self.shift_history(field);
        Ok(())
    }

    /// Seed both history buffers from the field when either is missing.
    /// Returns true when this call performed the seeding.
    fn seed_if_empty(&mut self, field: &WaveField) -> bool {
        if self.last.is_some() && self.last2.is_some() {
            return false;
        }
        self.last = Some(field.clone());
        self.last2 = Some(field.clone());
        true
    }

    /// Shift history buffers: two-steps-back <- one-step-back <- current
    fn shift_history(&mut self, field: &WaveField) {
        if let (Some(last), Some(last2)) = (self.last.as_mut(), self.last2.as_mut()) {
            std::mem::swap(last, last2);
            operations::copy(field, last);
        }
    }
}

impl<P: Potential> Propagator for ClassicalWavePropagator<P> {
    fn propagate(&mut self, field: &mut WaveField) -> Result<(), WaveError> {
        let (w, h) = field.shape();
        check_min_size(w, h)?;
        // First call after construction or reset: seed history, no update.
        if self.seed_if_empty(field) {
            return Ok(());
        }

        if let (Some(last), Some(last2)) = (&self.last, &self.last2) {
            check_history_shape(last, last2, (w, h))?;

            for i in 1..w - 1 {
                for j in 1..h - 1 {
                    if self.potential.is_blocked(i, j) {
                        field.data[[i, j]] = Complex64::new(0.0, 0.0);
                        continue;
                    }
                    let center = last.data[[i, j]];
                    let neigh = (self.masked(last, i + 1, j)
                        + self.masked(last, i - 1, j)
                        + self.masked(last, i, j + 1)
                        + self.masked(last, i, j - 1)
                        - center * 4.0)
                        * 0.25;
                    field.data[[i, j]] = center * 2.0 - last2.data[[i, j]] + neigh;
                }
            }

            damp_rows(field, last2);
            damp_cols(field, last2);
        }
        self.shift_history(field);
        Ok(())
    }

    fn reset(&mut self) {
        self.last = None;
        self.last2 = None;
    }

    fn set_boundary_value(
        &mut self,
        i: usize,
        j: usize,
        value: Complex64,
    ) -> Result<(), WaveError> {
        if let Some(last) = &self.last {
            if !last.contains(i, j) {
                let (width, height) = last.shape();
                return Err(WaveError::OutOfBounds {
                    i,
                    j,
                    width,
                    height,
                });
            }
        }
        if let Some(last) = self.last.as_mut() {
            last.data[[i, j]] = value;
        }
        if let Some(last2) = self.last2.as_mut() {
            last2.data[[i, j]] = value;
        }
        Ok(())
    }

    fn scale_amplitudes(&mut self, factor: f64) {
        if let Some(last) = self.last.as_mut() {
            last.scale(factor);
        }
        if let Some(last2) = self.last2.as_mut() {
            last2.scale(factor);
        }
    }

    fn last(&self) -> Option<&WaveField> {
        self.last.as_ref()
    }

    fn last2(&self) -> Option<&WaveField> {
        self.last2.as_ref()
    }
}

fn check_min_size(w: usize, h: usize) -> Result<(), WaveError> {
    if w < 3 || h < 3 {
        return Err(WaveError::InvalidParameter(format!(
            "lattice must be at least 3x3 to propagate, got {}x{}",
            w, h
        )));
    }
    Ok(())
}

fn check_history_shape(
    last: &WaveField,
    last2: &WaveField,
    found: (usize, usize),
) -> Result<(), WaveError> {
    if last.shape() != found {
        return Err(WaveError::ShapeMismatch {
            expected: last.shape(),
            found,
        });
    }
    if last2.shape() != found {
        return Err(WaveError::ShapeMismatch {
            expected: last2.shape(),
            found,
        });
    }
    Ok(())
}

/// Overwrite the top and bottom rows from the adjacent interior rows of
/// the two-steps-back buffer
fn damp_rows(field: &mut WaveField, last2: &WaveField) {
    let (w, h) = field.shape();
    for i in 0..w {
        field.data[[i, 0]] = last2.data[[i, 1]];
        field.data[[i, h - 1]] = last2.data[[i, h - 2]];
    }
}

/// Overwrite the left and right columns from the adjacent interior
/// columns of the two-steps-back buffer
fn damp_cols(field: &mut WaveField, last2: &WaveField) {
    let (w, h) = field.shape();
    for j in 0..h {
        field.data[[0, j]] = last2.data[[1, j]];
        field.data[[w - 1, j]] = last2.data[[w - 2, j]];
    }
}

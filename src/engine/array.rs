//! Core lattice type for time-domain wave simulations
//!
//! This module provides the fundamental 2D array type used throughout the
//! library. It wraps ndarray for efficient numerical operations with complex
//! amplitudes.

use ndarray::Array2;
use num_complex::Complex;
use num_traits::Zero;

/// Type alias for Complex64
pub type Complex64 = Complex<f64>;

/// A width x height grid of complex wave amplitudes
#[derive(Debug, Clone, PartialEq)]
pub struct WaveField {
    /// The underlying ndarray, indexed as `[[i, j]]` with `i < width`
    pub data: Array2<Complex64>,
}

impl WaveField {
    /// Create a new field with all amplitudes zero
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            data: Array2::zeros((width, height)),
        }
    }

    /// Create a new field filled with a scalar value
    pub fn from_scalar(width: usize, height: usize, value: Complex64) -> Self {
        Self {
            data: Array2::from_elem((width, height), value),
        }
    }

    /// Number of columns (i axis)
    pub fn width(&self) -> usize {
        self.data.nrows()
    }

    /// Number of rows (j axis)
    pub fn height(&self) -> usize {
        self.data.ncols()
    }

    /// Shape as a (width, height) tuple
    pub fn shape(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Whether a position lies on the lattice
    pub fn contains(&self, i: usize, j: usize) -> bool {
        i < self.width() && j < self.height()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the field has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Fill every cell with a scalar value
    pub fn fill(&mut self, value: Complex64) {
        self.data.fill(value);
    }

    /// Zero out every cell
    pub fn clear(&mut self) {
        self.fill(Complex64::zero());
    }

    /// Copy all amplitudes from another field of the same shape
    pub fn copy_from(&mut self, other: &Self) {
        self.data.assign(&other.data);
    }

    /// Add another field element-wise
    pub fn add(&mut self, other: &Self) {
        self.data += &other.data;
    }

    /// Scale every amplitude by a real factor
    pub fn scale(&mut self, factor: f64) {
        self.data.mapv_inplace(|c| c * factor);
    }

    /// Total energy: the sum of squared magnitudes over all cells
    pub fn norm_squared(&self) -> f64 {
        self.data.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Largest amplitude magnitude on the lattice
    pub fn max_magnitude(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |m, c| m.max(c.norm()))
    }

    /// Real-valued |psi| grid, for diagnostics and display
    pub fn magnitude(&self) -> Array2<f64> {
        self.data.mapv(|c| c.norm())
    }
}

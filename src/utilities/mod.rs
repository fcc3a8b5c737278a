//! Utility functions for lattice wave simulations

pub mod sources;

pub use sources::{Oscillator, Waveform};

use crate::engine::array::{Complex64, WaveField};

/// Add a Gaussian wave packet to a field.
///
/// The packet is centered at `(cx, cy)` in cell coordinates with spatial
/// width `sigma`. A nonzero wave vector `(kx, ky)` (radians per cell)
/// applies a phase ramp so the packet carries momentum.
pub fn gaussian_packet(
    field: &mut WaveField,
    center: (f64, f64),
    sigma: f64,
    k: (f64, f64),
    amplitude: f64,
) {
    let (w, h) = field.shape();
    let (cx, cy) = center;
    let (kx, ky) = k;

    for i in 0..w {
        for j in 0..h {
            let dx = i as f64 - cx;
            let dy = j as f64 - cy;
            let r2 = (dx * dx + dy * dy) / (2.0 * sigma * sigma);
            let envelope = amplitude * (-r2).exp();

            let phase = kx * dx + ky * dy;
            field.data[[i, j]] += Complex64::new(
                envelope * phase.cos(),
                envelope * phase.sin(),
            );
        }
    }
}

//! Drivable point sources
//!
//! An oscillator forces the amplitude of a single lattice cell each step,
//! either continuously or as a one-shot Gaussian-enveloped pulse.

use crate::engine::array::Complex64;
use std::f64::consts::PI;

/// Envelope applied to the oscillator drive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    /// Drive forever with constant amplitude
    Continuous,
    /// Gaussian envelope centered at `t0` with the given temporal width
    GaussianPulse { t0: f64, width: f64 },
}

/// Point source driving one cell with `A * cos(2*pi*t / period + phase)`
#[derive(Debug, Clone)]
pub struct Oscillator {
    i: usize,
    j: usize,
    amplitude: f64,
    period: f64,
    phase: f64,
    waveform: Waveform,
}

impl Oscillator {
    /// Continuous oscillator at a cell
    pub fn new(i: usize, j: usize, amplitude: f64, period: f64) -> Self {
        Self {
            i,
            j,
            amplitude,
            period,
            phase: 0.0,
            waveform: Waveform::Continuous,
        }
    }

    /// One-shot pulse centered at time `t0`
    pub fn pulse(i: usize, j: usize, amplitude: f64, period: f64, t0: f64, width: f64) -> Self {
        Self {
            i,
            j,
            amplitude,
            period,
            phase: 0.0,
            waveform: Waveform::GaussianPulse { t0, width },
        }
    }

    /// Set the phase offset in radians
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Lattice cell driven by this source
    pub fn position(&self) -> (usize, usize) {
        (self.i, self.j)
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Drive amplitude at simulation time `t`
    pub fn value_at(&self, t: f64) -> Complex64 {
        let oscillation = (2.0 * PI * t / self.period + self.phase).cos();
        let envelope = match self.waveform {
            Waveform::Continuous => 1.0,
            Waveform::GaussianPulse { t0, width } => {
                let arg = (t - t0) / width;
                (-arg * arg).exp()
            }
        };
        Complex64::new(self.amplitude * envelope * oscillation, 0.0)
    }
}

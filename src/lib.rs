//! WaveLattice - time-domain simulation of classical scalar waves on a 2D lattice
//!
//! This library advances a grid of complex wave amplitudes with a second-order
//! finite-difference propagator, supporting per-cell obstruction potentials,
//! damped grid edges and drivable point sources.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod utilities;

// Re-export commonly used types
pub use engine::array::{Complex64, WaveField};
pub use error::WaveError;
pub use model::classical::ClassicalWavePropagator;
pub use model::simulation::{simulate, SimulationParams, SimulationResult, WaveModel};

pub mod prelude {
    //! Common imports for using the WaveLattice library
    pub use crate::config::Config;
    pub use crate::engine::array::{Complex64, WaveField};
    pub use crate::error::WaveError;
    pub use crate::model::classical::ClassicalWavePropagator;
    pub use crate::model::potential::{
        BarrierPotential, CompositePotential, Potential, ZeroPotential,
    };
    pub use crate::model::propagator::Propagator;
    pub use crate::model::simulation::{simulate, SimulationParams, SimulationResult, WaveModel};
    pub use crate::utilities::{gaussian_packet, Oscillator};
}

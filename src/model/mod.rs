//! Model module: potentials, propagators and the stepping loop

pub mod classical;
pub mod potential;
pub mod propagator;
pub mod simulation;

pub use classical::ClassicalWavePropagator;
pub use potential::{BarrierPotential, CompositePotential, Potential, ZeroPotential};
pub use propagator::Propagator;
pub use simulation::{simulate, SimulationParams, WaveModel};

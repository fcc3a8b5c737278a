//! High-level stepping loop for lattice wave simulations

use crate::engine::array::WaveField;
use crate::error::WaveError;
use crate::model::classical::ClassicalWavePropagator;
use crate::model::potential::Potential;
use crate::model::propagator::Propagator;
use crate::utilities::sources::Oscillator;
use log::{debug, info};

/// Parameters for a lattice wave simulation
#[derive(Debug, Clone)]
pub struct SimulationParams {
    /// Lattice width in cells
    pub width: usize,
    /// Lattice height in cells
    pub height: usize,
    /// Number of time steps to run
    pub steps: usize,
    /// Simulation time advanced per step
    pub dt: f64,
    /// Whether to record total energy after every step
    pub record_energy: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            steps: 100,
            dt: 1.0,
            record_energy: false,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), WaveError> {
        if self.width < 3 || self.height < 3 {
            return Err(WaveError::InvalidParameter(format!(
                "lattice must be at least 3x3, got {}x{}",
                self.width, self.height
            )));
        }
        if self.dt <= 0.0 {
            return Err(WaveError::InvalidParameter(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        Ok(())
    }
}

/// Result of a simulation run
#[derive(Debug)]
pub struct SimulationResult {
    /// The field after the final step
    pub field: WaveField,
    /// Number of steps executed
    pub steps: usize,
    /// Total energy of the final field
    pub final_energy: f64,
    /// Per-step energy (if requested)
    pub energy_history: Option<Vec<f64>>,
}

/// A stepping wave model: field, propagator and driven sources
#[derive(Debug)]
pub struct WaveModel {
    field: WaveField,
    propagator: Box<dyn Propagator>,
    sources: Vec<Oscillator>,
    dt: f64,
    time: f64,
    step_count: usize,
}

impl WaveModel {
    /// Create a model over a fresh zero field
    pub fn new(
        width: usize,
        height: usize,
        propagator: Box<dyn Propagator>,
    ) -> Result<Self, WaveError> {
        if width < 3 || height < 3 {
            return Err(WaveError::InvalidParameter(format!(
                "lattice must be at least 3x3, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            field: WaveField::zeros(width, height),
            propagator,
            sources: Vec::new(),
            dt: 1.0,
            time: 0.0,
            step_count: 0,
        })
    }

    /// Set the simulation time advanced per step
    pub fn with_dt(mut self, dt: f64) -> Result<Self, WaveError> {
        if dt <= 0.0 {
            return Err(WaveError::InvalidParameter(format!(
                "dt must be positive, got {}",
                dt
            )));
        }
        self.dt = dt;
        Ok(self)
    }

    /// Add a driven point source
    pub fn add_source(&mut self, source: Oscillator) -> Result<(), WaveError> {
        let (i, j) = source.position();
        if !self.field.contains(i, j) {
            let (width, height) = self.field.shape();
            return Err(WaveError::OutOfBounds {
                i,
                j,
                width,
                height,
            });
        }
        self.sources.push(source);
        Ok(())
    }

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    /// Mutable field access, for writing initial conditions
    pub fn field_mut(&mut self) -> &mut WaveField {
        &mut self.field
    }

    pub fn propagator(&self) -> &dyn Propagator {
        self.propagator.as_ref()
    }

    pub fn propagator_mut(&mut self) -> &mut dyn Propagator {
        self.propagator.as_mut()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Total energy of the current field
    pub fn energy(&self) -> f64 {
        self.field.norm_squared()
    }

    /// Advance the simulation by one time step.
    ///
    /// Sources force their cells in both the field and the propagator
    /// history, then the propagator advances the field.
    pub fn step(&mut self) -> Result<(), WaveError> {
        for source in &self.sources {
            let (i, j) = source.position();
            let value = source.value_at(self.time);
            self.field.data[[i, j]] = value;
            self.propagator.set_boundary_value(i, j, value)?;
        }
        self.propagator.propagate(&mut self.field)?;
        self.time += self.dt;
        self.step_count += 1;
        Ok(())
    }

    /// Clear the field, drop propagator history and rewind time
    pub fn reset(&mut self) {
        self.field.clear();
        self.propagator.reset();
        self.time = 0.0;
        self.step_count = 0;
    }
}

/// Run a classical wave simulation to completion.
///
/// Builds a [`ClassicalWavePropagator`] over the potential, drives the
/// sources each step and returns the final field with energy diagnostics.
pub fn simulate<P: Potential + 'static>(
    potential: P,
    sources: Vec<Oscillator>,
    params: SimulationParams,
) -> Result<SimulationResult, WaveError> {
    params.validate()?;

    let propagator = ClassicalWavePropagator::new(potential);
    let mut model = WaveModel::new(params.width, params.height, Box::new(propagator))?
        .with_dt(params.dt)?;
    for source in sources {
        model.add_source(source)?;
    }

    info!(
        "running {} steps on a {}x{} lattice",
        params.steps, params.width, params.height
    );

    let mut energy_history = params.record_energy.then(|| Vec::with_capacity(params.steps));

    for step in 0..params.steps {
        model.step()?;
        if let Some(history) = energy_history.as_mut() {
            history.push(model.energy());
        }
        if (step + 1) % 100 == 0 {
            debug!("step {}/{}: energy {:.6e}", step + 1, params.steps, model.energy());
        }
    }

    let final_energy = model.energy();
    info!("finished {} steps, final energy {:.6e}", model.step_count(), final_energy);

    Ok(SimulationResult {
        steps: model.step_count(),
        final_energy,
        energy_history,
        field: model.field,
    })
}

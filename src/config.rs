//! TOML-backed simulation configuration

use crate::error::WaveError;
use crate::model::potential::{BarrierPotential, CompositePotential};
use crate::model::simulation::SimulationParams;
use crate::utilities::sources::Oscillator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Lattice dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

impl GridConfig {
    fn validate(&self) -> Result<(), WaveError> {
        if self.width < 3 || self.height < 3 {
            return Err(WaveError::InvalidParameter(format!(
                "grid must be at least 3x3, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Stepping parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub steps: usize,
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default)]
    pub record_energy: bool,
}

fn default_dt() -> f64 {
    1.0
}

impl SimulationConfig {
    fn validate(&self) -> Result<(), WaveError> {
        if self.steps == 0 {
            return Err(WaveError::InvalidParameter(
                "steps must be at least 1".to_string(),
            ));
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

/// A driven point source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub i: usize,
    pub j: usize,
    pub amplitude: f64,
    pub period: f64,
    #[serde(default)]
    pub phase: f64,
    /// One-shot Gaussian pulse instead of a continuous drive
    #[serde(default)]
    pub pulse: bool,
    #[serde(default)]
    pub pulse_t0: f64,
    #[serde(default = "default_pulse_width")]
    pub pulse_width: f64,
}

fn default_pulse_width() -> f64 {
    5.0
}

impl SourceConfig {
    fn validate(&self, grid: &GridConfig) -> Result<(), WaveError> {
        if self.i >= grid.width || self.j >= grid.height {
            return Err(WaveError::OutOfBounds {
                i: self.i,
                j: self.j,
                width: grid.width,
                height: grid.height,
            });
        }
        if self.period <= 0.0 {
            return Err(WaveError::InvalidParameter(format!(
                "source period must be positive, got {}",
                self.period
            )));
        }
        if self.pulse && self.pulse_width <= 0.0 {
            return Err(WaveError::InvalidParameter(format!(
                "pulse width must be positive, got {}",
                self.pulse_width
            )));
        }
        Ok(())
    }

    fn build(&self) -> Oscillator {
        let source = if self.pulse {
            Oscillator::pulse(
                self.i,
                self.j,
                self.amplitude,
                self.period,
                self.pulse_t0,
                self.pulse_width,
            )
        } else {
            Oscillator::new(self.i, self.j, self.amplitude, self.period)
        };
        source.with_phase(self.phase)
    }
}

/// A rectangular obstruction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarrierConfig {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    #[serde(default = "default_strength")]
    pub strength: f64,
}

fn default_strength() -> f64 {
    1.0
}

impl BarrierConfig {
    fn validate(&self, grid: &GridConfig) -> Result<(), WaveError> {
        if self.width == 0 || self.height == 0 {
            return Err(WaveError::InvalidParameter(
                "barrier dimensions must be positive".to_string(),
            ));
        }
        if self.x + self.width > grid.width || self.y + self.height > grid.height {
            return Err(WaveError::InvalidParameter(format!(
                "barrier at ({}, {}) size {}x{} does not fit the {}x{} grid",
                self.x, self.y, self.width, self.height, grid.width, grid.height
            )));
        }
        if self.strength == 0.0 {
            return Err(WaveError::InvalidParameter(
                "barrier strength must be nonzero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceConfig>,
    #[serde(default, rename = "barrier")]
    pub barriers: Vec<BarrierConfig>,
}

impl Config {
    /// Load and validate a configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WaveError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| WaveError::ConfigRead {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, WaveError> {
        let config: Config = toml::from_str(content).map_err(|e| WaveError::ConfigParse {
            msg: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections against each other
    pub fn validate(&self) -> Result<(), WaveError> {
        self.grid.validate()?;
        self.simulation.validate()?;
        for source in &self.sources {
            source.validate(&self.grid)?;
        }
        for barrier in &self.barriers {
            barrier.validate(&self.grid)?;
        }
        Ok(())
    }

    /// Build the combined obstruction potential
    pub fn build_potential(&self) -> CompositePotential {
        let mut potential = CompositePotential::new();
        for barrier in &self.barriers {
            potential.push(Box::new(BarrierPotential::new(
                barrier.x,
                barrier.y,
                barrier.width,
                barrier.height,
                barrier.strength,
            )));
        }
        potential
    }

    /// Build the driven sources
    pub fn build_sources(&self) -> Vec<Oscillator> {
        self.sources.iter().map(|s| s.build()).collect()
    }

    /// Stepping parameters for [`simulate`](crate::model::simulation::simulate)
    pub fn simulation_params(&self) -> SimulationParams {
        SimulationParams {
            width: self.grid.width,
            height: self.grid.height,
            steps: self.simulation.steps,
            dt: self.simulation.dt,
            record_energy: self.simulation.record_energy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::potential::Potential;

    const EXAMPLE: &str = r#"
        [grid]
        width = 60
        height = 40

        [simulation]
        steps = 200
        record_energy = true

        [[source]]
        i = 10
        j = 20
        amplitude = 1.0
        period = 16.0

        [[barrier]]
        x = 30
        y = 5
        width = 2
        height = 30
        strength = 50.0
    "#;

    #[test]
    fn test_parse_example() {
        let config = Config::from_toml_str(EXAMPLE).unwrap();
        assert_eq!(config.grid.width, 60);
        assert_eq!(config.simulation.steps, 200);
        assert_eq!(config.simulation.dt, 1.0); // default
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.barriers.len(), 1);

        let potential = config.build_potential();
        assert_eq!(potential.value_at(31, 10), 50.0);
        assert_eq!(potential.value_at(10, 10), 0.0);

        let sources = config.build_sources();
        assert_eq!(sources[0].position(), (10, 20));

        let params = config.simulation_params();
        assert!(params.record_energy);
        assert_eq!(params.width, 60);
    }

    #[test]
    fn test_rejects_out_of_bounds_source() {
        let bad = EXAMPLE.replace("i = 10", "i = 60");
        assert!(matches!(
            Config::from_toml_str(&bad),
            Err(WaveError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_barrier() {
        let bad = EXAMPLE.replace("height = 30\n        strength", "height = 40\n        strength");
        assert!(matches!(
            Config::from_toml_str(&bad),
            Err(WaveError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Config::from_toml_str("not toml at all ["),
            Err(WaveError::ConfigParse { .. })
        ));
    }
}

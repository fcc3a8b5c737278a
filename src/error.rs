//! Error types for the library

use thiserror::Error;

/// Errors surfaced by lattice construction, propagation and configuration.
#[derive(Debug, Error)]
pub enum WaveError {
    #[error("field shape {found:?} does not match history shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("position ({i}, {j}) is outside the {width}x{height} lattice")]
    OutOfBounds {
        i: usize,
        j: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unable to read config file: {path}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse config: {msg}")]
    ConfigParse { msg: String },
}

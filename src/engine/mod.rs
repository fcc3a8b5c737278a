//! Engine module containing the lattice array type and element-wise operations

pub mod array;
pub mod operations;

pub use array::{Complex64, WaveField};
pub use operations::*;

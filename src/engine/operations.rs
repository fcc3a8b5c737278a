//! Element-wise operations on wave fields

use crate::engine::array::{Complex64, WaveField};

/// Scale a field by a complex scalar and add an offset
/// out = scale * input + offset
pub fn scale(
    scale: Complex64,
    input: &WaveField,
    offset: Option<Complex64>,
    out: &mut WaveField,
) {
    let offset = offset.unwrap_or(Complex64::new(0.0, 0.0));
    out.data.zip_mut_with(&input.data, |o, &x| {
        *o = scale * x + offset;
    });
}

/// Mix two fields: out = alpha * a + beta * b
pub fn mix(
    alpha: Complex64,
    a: &WaveField,
    beta: Complex64,
    b: &WaveField,
    out: &mut WaveField,
) {
    for ((o, &av), &bv) in out.data.iter_mut().zip(a.data.iter()).zip(b.data.iter()) {
        *o = alpha * av + beta * bv;
    }
}

/// Copy amplitudes from one field to another
pub fn copy(source: &WaveField, dest: &mut WaveField) {
    dest.data.assign(&source.data);
}

// Scalar kernels shared by the CPU backend's unary operations.

/// Logistic sigmoid that never evaluates `exp` of a positive argument.
///
/// For x >= 0 this is 1 / (1 + e^-x); for x < 0 the algebraically equal
/// e^x / (1 + e^x) keeps the exponent non-positive.
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// max(0, x). NaN inputs map to 0.
#[inline]
pub fn relu(x: f32) -> f32 {
    x.max(0.0)
}

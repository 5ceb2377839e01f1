use std::fmt::Debug;

use crate::error::Result;

/// Trait for pluggable compute backends (CPU, GPU, etc.).
///
/// All operations work on f32 slices. Data is passed in as slices and
/// returned as owned vectors; the backend never mutates its inputs.
pub trait ComputeBackend: Send + Sync + Debug {
    /// Returns the name of this backend (e.g., "cpu").
    fn name(&self) -> &str;

    /// Element-wise addition: result[i] = a[i] + b[i].
    fn add(&self, a: &[f32], b: &[f32]) -> Result<Vec<f32>>;

    /// Element-wise subtraction: result[i] = a[i] - b[i].
    fn sub(&self, a: &[f32], b: &[f32]) -> Result<Vec<f32>>;

    /// Element-wise multiplication: result[i] = a[i] * b[i].
    fn mul(&self, a: &[f32], b: &[f32]) -> Result<Vec<f32>>;

    /// Element-wise division: result[i] = a[i] / b[i].
    fn div(&self, a: &[f32], b: &[f32]) -> Result<Vec<f32>>;

    /// Scalar multiplication: result[i] = a[i] * s.
    fn scale(&self, a: &[f32], s: f32) -> Result<Vec<f32>>;

    /// Scalar addition: result[i] = a[i] + s.
    fn add_scalar(&self, a: &[f32], s: f32) -> Result<Vec<f32>>;

    /// Exponential: result[i] = exp(x[i]).
    fn exp(&self, x: &[f32]) -> Result<Vec<f32>>;

    /// Hyperbolic tangent: result[i] = tanh(x[i]).
    fn tanh(&self, x: &[f32]) -> Result<Vec<f32>>;

    /// Logistic sigmoid: result[i] = 1 / (1 + exp(-x[i])).
    ///
    /// Implementations must not overflow for large negative inputs.
    fn sigmoid(&self, x: &[f32]) -> Result<Vec<f32>>;

    /// Rectifier: result[i] = max(0, x[i]).
    fn relu(&self, x: &[f32]) -> Result<Vec<f32>>;

    /// Maximum over the middle axis of an `[outer, axis_len, inner]` view.
    ///
    /// Returns `outer * inner` values laid out as `[outer, inner]`.
    fn reduce_max(
        &self,
        x: &[f32],
        outer: usize,
        axis_len: usize,
        inner: usize,
    ) -> Result<Vec<f32>>;

    /// Sum over the middle axis of an `[outer, axis_len, inner]` view.
    ///
    /// Returns `outer * inner` values laid out as `[outer, inner]`.
    fn reduce_sum(
        &self,
        x: &[f32],
        outer: usize,
        axis_len: usize,
        inner: usize,
    ) -> Result<Vec<f32>>;
}

pub mod reduce;
pub mod unary;

use crate::backend::ComputeBackend;
use crate::error::{Result, TensorError};

/// Pure-Rust CPU compute backend.
///
/// Implements all operations with straightforward loops optimized for
/// correctness rather than peak performance. Intended as a reference
/// implementation and fallback.
#[derive(Debug, Clone)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        CpuBackend
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn zip_with(a: &[f32], b: &[f32], f: impl Fn(f32, f32) -> f32) -> Result<Vec<f32>> {
    if a.len() != b.len() {
        return Err(TensorError::ShapeMismatch {
            expected: vec![a.len()],
            got: vec![b.len()],
        });
    }
    Ok(a.iter().zip(b.iter()).map(|(&x, &y)| f(x, y)).collect())
}

impl ComputeBackend for CpuBackend {
    fn name(&self) -> &str {
        "cpu"
    }

    fn add(&self, a: &[f32], b: &[f32]) -> Result<Vec<f32>> {
        zip_with(a, b, |x, y| x + y)
    }

    fn sub(&self, a: &[f32], b: &[f32]) -> Result<Vec<f32>> {
        zip_with(a, b, |x, y| x - y)
    }

    fn mul(&self, a: &[f32], b: &[f32]) -> Result<Vec<f32>> {
        zip_with(a, b, |x, y| x * y)
    }

    fn div(&self, a: &[f32], b: &[f32]) -> Result<Vec<f32>> {
        zip_with(a, b, |x, y| x / y)
    }

    fn scale(&self, a: &[f32], s: f32) -> Result<Vec<f32>> {
        Ok(a.iter().map(|x| x * s).collect())
    }

    fn add_scalar(&self, a: &[f32], s: f32) -> Result<Vec<f32>> {
        Ok(a.iter().map(|x| x + s).collect())
    }

    fn exp(&self, x: &[f32]) -> Result<Vec<f32>> {
        Ok(x.iter().map(|v| v.exp()).collect())
    }

    fn tanh(&self, x: &[f32]) -> Result<Vec<f32>> {
        Ok(x.iter().map(|v| v.tanh()).collect())
    }

    fn sigmoid(&self, x: &[f32]) -> Result<Vec<f32>> {
        Ok(x.iter().map(|&v| unary::sigmoid(v)).collect())
    }

    fn relu(&self, x: &[f32]) -> Result<Vec<f32>> {
        Ok(x.iter().map(|&v| unary::relu(v)).collect())
    }

    fn reduce_max(
        &self,
        x: &[f32],
        outer: usize,
        axis_len: usize,
        inner: usize,
    ) -> Result<Vec<f32>> {
        reduce::reduce_axis(x, outer, axis_len, inner, f32::NEG_INFINITY, f32::max)
    }

    fn reduce_sum(
        &self,
        x: &[f32],
        outer: usize,
        axis_len: usize,
        inner: usize,
    ) -> Result<Vec<f32>> {
        reduce::reduce_axis(x, outer, axis_len, inner, 0.0, |acc, v| acc + v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn backend() -> CpuBackend {
        CpuBackend::new()
    }

    #[test]
    fn test_add() {
        let b = backend();
        let r = b.add(&[1.0, 2.0], &[3.0, 4.0]).unwrap();
        assert_eq!(r, vec![4.0, 6.0]);
    }

    #[test]
    fn test_sub_div() {
        let b = backend();
        assert_eq!(b.sub(&[5.0, 2.0], &[3.0, 4.0]).unwrap(), vec![2.0, -2.0]);
        assert_eq!(b.div(&[6.0, 1.0], &[3.0, 4.0]).unwrap(), vec![2.0, 0.25]);
    }

    #[test]
    fn test_mul() {
        let b = backend();
        let r = b.mul(&[2.0, 3.0], &[4.0, 5.0]).unwrap();
        assert_eq!(r, vec![8.0, 15.0]);
    }

    #[test]
    fn test_scale_and_add_scalar() {
        let b = backend();
        assert_eq!(b.scale(&[1.0, 2.0, 3.0], 2.0).unwrap(), vec![2.0, 4.0, 6.0]);
        assert_eq!(b.add_scalar(&[1.0, -1.0], 0.5).unwrap(), vec![1.5, -0.5]);
    }

    #[test]
    fn test_exp_tanh() {
        let b = backend();
        let e = b.exp(&[0.0, 1.0]).unwrap();
        assert_abs_diff_eq!(e[0], 1.0);
        assert_abs_diff_eq!(e[1], std::f32::consts::E, epsilon = 1e-6);

        let t = b.tanh(&[0.0, 1.0]).unwrap();
        assert_abs_diff_eq!(t[0], 0.0);
        assert_abs_diff_eq!(t[1], 0.761_594_2, epsilon = 1e-6);
    }

    #[test]
    fn test_sigmoid() {
        let b = backend();
        let r = b.sigmoid(&[0.0, 1.0]).unwrap();
        assert_abs_diff_eq!(r[0], 0.5);
        // sigmoid(1) = 1 / (1 + exp(-1)) ~= 0.7310586
        assert_abs_diff_eq!(r[1], 0.731_058_6, epsilon = 1e-6);
    }

    #[test]
    fn test_relu() {
        let b = backend();
        assert_eq!(b.relu(&[-2.0, 0.0, 3.0]).unwrap(), vec![0.0, 0.0, 3.0]);
    }

    #[test]
    fn test_reduce_max_sum() {
        let b = backend();
        // [2, 3] reduced over the last axis
        let x = [1.0, 5.0, 2.0, -1.0, -4.0, -2.0];
        assert_eq!(b.reduce_max(&x, 2, 3, 1).unwrap(), vec![5.0, -1.0]);
        assert_eq!(b.reduce_sum(&x, 2, 3, 1).unwrap(), vec![8.0, -7.0]);
        // and over the first axis
        assert_eq!(b.reduce_max(&x, 1, 2, 3).unwrap(), vec![1.0, 5.0, 2.0]);
    }

    #[test]
    fn test_add_length_mismatch() {
        let b = backend();
        assert!(b.add(&[1.0], &[1.0, 2.0]).is_err());
        assert!(b.div(&[1.0], &[]).is_err());
    }
}

//! Named arithmetic helpers over backend tensors.
//!
//! Tensor-tensor forms broadcast with numpy rules. Every helper returns a
//! new tensor; inputs are never modified.

use nl_tensor::Tensor;

use crate::context::OperatorContext;
use crate::error::Result;

/// `a + b`
pub fn add(ctx: &OperatorContext, a: &Tensor, b: &Tensor) -> Result<Tensor> {
    Ok(a.add(b, ctx.backend())?)
}

/// `a + s`
pub fn add_scalar(ctx: &OperatorContext, a: &Tensor, s: f32) -> Result<Tensor> {
    Ok(a.add_scalar(s, ctx.backend())?)
}

/// `a - b`
pub fn subtract(ctx: &OperatorContext, a: &Tensor, b: &Tensor) -> Result<Tensor> {
    Ok(a.sub(b, ctx.backend())?)
}

/// `a - s`
pub fn subtract_scalar(ctx: &OperatorContext, a: &Tensor, s: f32) -> Result<Tensor> {
    Ok(a.add_scalar(-s, ctx.backend())?)
}

/// `s - a`, elementwise.
pub fn scalar_subtract(ctx: &OperatorContext, s: f32, a: &Tensor) -> Result<Tensor> {
    let backend = ctx.backend();
    Ok(a.scale(-1.0, backend)?.add_scalar(s, backend)?)
}

/// `a * b`
pub fn multiply(ctx: &OperatorContext, a: &Tensor, b: &Tensor) -> Result<Tensor> {
    Ok(a.mul(b, ctx.backend())?)
}

/// `a * s`
pub fn multiply_scalar(ctx: &OperatorContext, a: &Tensor, s: f32) -> Result<Tensor> {
    Ok(a.scale(s, ctx.backend())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActivationError;
    use nl_tensor::{DType, Shape, TensorError};

    fn vec1(data: &[f32]) -> Tensor {
        Tensor::new(data.to_vec(), Shape::new(vec![data.len()]))
    }

    #[test]
    fn test_tensor_tensor() {
        let ctx = OperatorContext::cpu();
        let a = vec1(&[1.0, 2.0, 3.0]);
        let b = vec1(&[4.0, 5.0, 6.0]);

        assert_eq!(add(&ctx, &a, &b).unwrap().data_f32().unwrap(), &[5.0, 7.0, 9.0]);
        assert_eq!(
            subtract(&ctx, &a, &b).unwrap().data_f32().unwrap(),
            &[-3.0, -3.0, -3.0]
        );
        assert_eq!(
            multiply(&ctx, &a, &b).unwrap().data_f32().unwrap(),
            &[4.0, 10.0, 18.0]
        );
    }

    #[test]
    fn test_scalar_forms() {
        let ctx = OperatorContext::cpu();
        let a = vec1(&[1.0, -2.0]);

        assert_eq!(add_scalar(&ctx, &a, 1.0).unwrap().data_f32().unwrap(), &[2.0, -1.0]);
        assert_eq!(
            subtract_scalar(&ctx, &a, 1.0).unwrap().data_f32().unwrap(),
            &[0.0, -3.0]
        );
        assert_eq!(
            multiply_scalar(&ctx, &a, 3.0).unwrap().data_f32().unwrap(),
            &[3.0, -6.0]
        );
    }

    #[test]
    fn test_scalar_subtract() {
        let ctx = OperatorContext::cpu();
        let a = vec1(&[1.0, -2.0, 0.5]);
        let r = scalar_subtract(&ctx, 1.0, &a).unwrap();
        assert_eq!(r.data_f32().unwrap(), &[0.0, 3.0, 0.5]);
        // the input is left untouched
        assert_eq!(a.data_f32().unwrap(), &[1.0, -2.0, 0.5]);
    }

    #[test]
    fn test_broadcasting() {
        let ctx = OperatorContext::cpu();
        let m = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], Shape::new(vec![2, 2]));
        let col = Tensor::new(vec![10.0, 100.0], Shape::new(vec![2, 1]));
        let r = multiply(&ctx, &m, &col).unwrap();
        assert_eq!(r.data_f32().unwrap(), &[10.0, 20.0, 300.0, 400.0]);
    }

    #[test]
    fn test_errors_propagate() {
        let ctx = OperatorContext::cpu();
        let a = vec1(&[1.0, 2.0]);
        let b = vec1(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            add(&ctx, &a, &b),
            Err(ActivationError::TensorError(TensorError::BroadcastError { .. }))
        ));

        let i = Tensor::from_i32(vec![1], Shape::new(vec![1]));
        assert_eq!(i.dtype(), DType::I32);
        assert!(scalar_subtract(&ctx, 1.0, &i).is_err());
    }
}

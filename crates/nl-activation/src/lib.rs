//! `nl-activation` - Activation functions and tensor arithmetic for nonlin.
//!
//! This crate provides:
//! - `Activation`, an immutable description of sigmoid, relu, tanh, softmax
//!   or swish, and its evaluator
//! - Named arithmetic helpers (`add`, `subtract`, `multiply`, ...) over
//!   `nl_tensor::Tensor`
//! - `OperatorContext`, the explicitly passed handle to the compute backend
//!
//! ```
//! use nl_activation::{Activation, OperatorContext};
//! use nl_tensor::{Shape, Tensor};
//!
//! let ctx = OperatorContext::cpu();
//! let x = Tensor::new(vec![-2.0, 0.0, 3.0], Shape::new(vec![3]));
//! let y = Activation::Relu.evaluate(&ctx, &x).unwrap();
//! assert_eq!(y.data_f32().unwrap(), &[0.0, 0.0, 3.0]);
//! ```

pub mod activation;
pub mod arith;
pub mod context;
pub mod error;

pub use activation::{evaluate, Activation, ActivationKind, ActivationParams};
pub use arith::{
    add, add_scalar, multiply, multiply_scalar, scalar_subtract, subtract, subtract_scalar,
};
pub use context::{ContextBuilder, OperatorContext};
pub use error::{ActivationError, Result};

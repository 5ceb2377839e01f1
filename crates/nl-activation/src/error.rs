use nl_tensor::DType;
use thiserror::Error;

use crate::activation::ActivationKind;

#[derive(Error, Debug)]
pub enum ActivationError {
    #[error("operator context has no compute backend")]
    UninitializedContext,
    #[error("{kind} is not defined for {dtype} tensors")]
    UnsupportedType { dtype: DType, kind: ActivationKind },
    #[error("cannot normalize over axis {axis} of shape {dims:?}")]
    InvalidShape { dims: Vec<usize>, axis: isize },
    #[error("unknown activation: {0}")]
    UnknownActivation(String),
    #[error("tensor error: {0}")]
    TensorError(#[from] nl_tensor::TensorError),
}

pub type Result<T> = std::result::Result<T, ActivationError>;

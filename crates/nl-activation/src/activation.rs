//! Activation function evaluation.
//!
//! An [`Activation`] is an immutable value describing one nonlinearity and
//! its parameters. Evaluation selects the formula and composes it from the
//! backend's elementwise and reduction kernels:
//!
//! | kind    | formula                                   |
//! |---------|-------------------------------------------|
//! | sigmoid | `1 / (1 + exp(-x))`                       |
//! | relu    | `max(0, x)`                               |
//! | tanh    | `tanh(x)`                                 |
//! | softmax | `exp(x_i - max) / sum_j exp(x_j - max)`   |
//! | swish   | `x * sigmoid(beta * x)`                   |
//!
//! All kinds preserve the input shape. Half-precision input is computed in
//! f32 and returned as f16.

use std::fmt;
use std::str::FromStr;

use nl_tensor::{DType, Tensor};

use crate::context::OperatorContext;
use crate::error::{ActivationError, Result};

/// The supported nonlinearities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivationKind {
    Sigmoid,
    Relu,
    Tanh,
    Softmax,
    Swish,
}

impl ActivationKind {
    pub const ALL: [ActivationKind; 5] = [
        ActivationKind::Sigmoid,
        ActivationKind::Relu,
        ActivationKind::Tanh,
        ActivationKind::Softmax,
        ActivationKind::Swish,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActivationKind::Sigmoid => "sigmoid",
            ActivationKind::Relu => "relu",
            ActivationKind::Tanh => "tanh",
            ActivationKind::Softmax => "softmax",
            ActivationKind::Swish => "swish",
        }
    }
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivationKind {
    type Err = ActivationError;

    /// Parses a case-insensitive activation name. `silu` is accepted for swish.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sigmoid" => Ok(ActivationKind::Sigmoid),
            "relu" => Ok(ActivationKind::Relu),
            "tanh" => Ok(ActivationKind::Tanh),
            "softmax" => Ok(ActivationKind::Softmax),
            "swish" | "silu" => Ok(ActivationKind::Swish),
            _ => Err(ActivationError::UnknownActivation(s.to_string())),
        }
    }
}

/// Optional parameters for [`evaluate`].
///
/// `beta` only affects swish and `axis` only affects softmax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationParams {
    pub beta: f32,
    pub axis: isize,
}

impl Default for ActivationParams {
    fn default() -> Self {
        Self {
            beta: Activation::DEFAULT_BETA,
            axis: Activation::DEFAULT_AXIS,
        }
    }
}

impl ActivationParams {
    pub fn with_beta(mut self, beta: f32) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_axis(mut self, axis: isize) -> Self {
        self.axis = axis;
        self
    }
}

/// An activation function together with its parameters.
///
/// Values are never mutated after construction; to use another `beta` build
/// a new value with [`Activation::with_beta`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    Sigmoid,
    Relu,
    Tanh,
    /// Normalizes along `axis`; negative values count from the last axis.
    Softmax { axis: isize },
    Swish { beta: f32 },
}

impl Activation {
    pub const DEFAULT_BETA: f32 = 1.0;
    pub const DEFAULT_AXIS: isize = -1;

    /// Softmax over the last axis.
    pub fn softmax() -> Self {
        Activation::Softmax {
            axis: Self::DEFAULT_AXIS,
        }
    }

    pub fn swish(beta: f32) -> Self {
        Activation::Swish { beta }
    }

    pub fn from_kind(kind: ActivationKind, params: ActivationParams) -> Self {
        match kind {
            ActivationKind::Sigmoid => Activation::Sigmoid,
            ActivationKind::Relu => Activation::Relu,
            ActivationKind::Tanh => Activation::Tanh,
            ActivationKind::Softmax => Activation::Softmax { axis: params.axis },
            ActivationKind::Swish => Activation::Swish { beta: params.beta },
        }
    }

    pub fn kind(&self) -> ActivationKind {
        match self {
            Activation::Sigmoid => ActivationKind::Sigmoid,
            Activation::Relu => ActivationKind::Relu,
            Activation::Tanh => ActivationKind::Tanh,
            Activation::Softmax { .. } => ActivationKind::Softmax,
            Activation::Swish { .. } => ActivationKind::Swish,
        }
    }

    /// Returns a copy with `beta` replaced. Kinds other than swish are
    /// returned unchanged.
    pub fn with_beta(self, beta: f32) -> Self {
        match self {
            Activation::Swish { .. } => Activation::Swish { beta },
            other => other,
        }
    }

    /// Applies the activation to `input`, returning a new tensor of the same
    /// shape and dtype.
    #[tracing::instrument(
        level = "debug",
        skip(self, ctx, input),
        fields(kind = %self.kind(), shape = %input.shape(), dtype = %input.dtype())
    )]
    pub fn evaluate(&self, ctx: &OperatorContext, input: &Tensor) -> Result<Tensor> {
        let dtype = input.dtype();
        match dtype {
            DType::F32 => self.evaluate_f32(ctx, input),
            DType::F16 => {
                tracing::debug!("upcasting f16 input to f32");
                let out = self.evaluate_f32(ctx, &input.to_dtype(DType::F32)?)?;
                Ok(out.to_dtype(DType::F16)?)
            }
            DType::I32 => Err(ActivationError::UnsupportedType {
                dtype,
                kind: self.kind(),
            }),
        }
    }

    fn evaluate_f32(&self, ctx: &OperatorContext, x: &Tensor) -> Result<Tensor> {
        let backend = ctx.backend();
        let out = match *self {
            Activation::Sigmoid => x.sigmoid(backend)?,
            Activation::Relu => x.relu(backend)?,
            Activation::Tanh => x.tanh(backend)?,
            Activation::Softmax { axis } => return softmax(ctx, x, axis),
            Activation::Swish { beta } => {
                let gate = x.scale(beta, backend)?.sigmoid(backend)?;
                x.mul(&gate, backend)?
            }
        };
        Ok(out)
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::Softmax { axis } => write!(f, "softmax(axis={})", axis),
            Activation::Swish { beta } => write!(f, "swish(beta={})", beta),
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// Numerically stable softmax: the per-slice maximum is subtracted before
/// exponentiating so no `exp` argument is positive.
fn softmax(ctx: &OperatorContext, x: &Tensor, axis: isize) -> Result<Tensor> {
    let backend = ctx.backend();
    let shape = x.shape();
    let invalid = || ActivationError::InvalidShape {
        dims: shape.dims().to_vec(),
        axis,
    };

    if shape.ndim() == 0 {
        return Err(invalid());
    }
    let resolved = shape.normalize_axis(axis)?;
    if shape.dim(resolved) == 0 {
        return Err(invalid());
    }

    let max = x.max_axis(axis, backend)?;
    let exps = x.sub(&max, backend)?.exp(backend)?;
    let sum = exps.sum_axis(axis, backend)?;
    Ok(exps.div(&sum, backend)?)
}

/// Evaluates activation `kind` on `input`.
///
/// `params` defaults to [`ActivationParams::default`] (beta 1, last axis).
pub fn evaluate(
    ctx: &OperatorContext,
    kind: ActivationKind,
    input: &Tensor,
    params: Option<ActivationParams>,
) -> Result<Tensor> {
    Activation::from_kind(kind, params.unwrap_or_default()).evaluate(ctx, input)
}

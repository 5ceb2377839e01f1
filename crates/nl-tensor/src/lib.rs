//! `nl-tensor` - Tensor library with pluggable compute backends for nonlin.
//!
//! This crate provides:
//! - An immutable `Tensor` type backed by CPU storage
//! - A `ComputeBackend` trait for pluggable elementwise and reduction kernels
//! - A reference `CpuBackend` implementation
//! - Shape utilities, axis handling and broadcasting
//! - Data type definitions (F32, F16, I32)

pub mod backend;
pub mod cpu;
pub mod dtype;
pub mod error;
pub mod shape;
pub mod storage;
pub mod tensor;

// Re-export primary types at the crate root for convenience.
pub use backend::ComputeBackend;
pub use cpu::CpuBackend;
pub use dtype::DType;
pub use error::{Result, TensorError};
pub use shape::Shape;
pub use storage::CpuStorage;
pub use tensor::Tensor;

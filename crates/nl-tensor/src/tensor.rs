use half::f16;

use crate::backend::ComputeBackend;
use crate::dtype::DType;
use crate::error::{Result, TensorError};
use crate::shape::Shape;
use crate::storage::CpuStorage;

/// An immutable tensor backed by CPU storage.
///
/// Holds contiguous, row-major data with an associated shape and dtype.
/// Operations that require computation are dispatched to a `ComputeBackend`
/// and always return a new tensor.
#[derive(Debug, Clone)]
pub struct Tensor {
    storage: CpuStorage,
    shape: Shape,
    dtype: DType,
}

impl Tensor {
    fn from_storage(storage: CpuStorage, shape: Shape) -> Self {
        debug_assert_eq!(storage.len(), shape.numel());
        let dtype = storage.dtype();
        Tensor {
            storage,
            shape,
            dtype,
        }
    }

    /// Create a new tensor from f32 data and a shape.
    ///
    /// # Panics
    /// Panics if `data.len() != shape.numel()`.
    pub fn new(data: Vec<f32>, shape: Shape) -> Self {
        assert_eq!(
            data.len(),
            shape.numel(),
            "data length {} does not match shape {:?} (numel={})",
            data.len(),
            shape,
            shape.numel()
        );
        Self::from_storage(CpuStorage::from_f32_vec(data), shape)
    }

    /// Create a half-precision tensor.
    ///
    /// # Panics
    /// Panics if `data.len() != shape.numel()`.
    pub fn from_f16(data: Vec<f16>, shape: Shape) -> Self {
        assert_eq!(data.len(), shape.numel(), "data length does not match shape");
        Self::from_storage(CpuStorage::F16(data), shape)
    }

    /// Create an integer tensor.
    ///
    /// # Panics
    /// Panics if `data.len() != shape.numel()`.
    pub fn from_i32(data: Vec<i32>, shape: Shape) -> Self {
        assert_eq!(data.len(), shape.numel(), "data length does not match shape");
        Self::from_storage(CpuStorage::I32(data), shape)
    }

    /// Create a rank-0 tensor holding a single value.
    pub fn scalar(value: f32) -> Self {
        Self::new(vec![value], Shape::scalar())
    }

    /// Create a tensor of the given shape with every element set to `value`.
    pub fn full(shape: Shape, value: f32) -> Self {
        let n = shape.numel();
        Self::new(vec![value; n], shape)
    }

    /// Create a zero-filled tensor with the given shape.
    pub fn zeros(shape: Shape) -> Self {
        Self::full(shape, 0.0)
    }

    /// Create a tensor filled with ones with the given shape.
    pub fn ones(shape: Shape) -> Self {
        Self::full(shape, 1.0)
    }

    /// Returns a reference to the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the tensor's data type.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Number of elements.
    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Returns the underlying data as an f32 slice.
    ///
    /// # Errors
    /// Returns an error if the tensor is not F32.
    pub fn data_f32(&self) -> Result<&[f32]> {
        self.storage.as_f32_slice()
    }

    /// Copies the data out as f32, widening F16.
    pub fn to_vec_f32(&self) -> Result<Vec<f32>> {
        self.storage.to_f32_vec()
    }

    /// Reads the element at a multi-dimensional index as f32.
    ///
    /// A rank-0 tensor is read with an empty index. I32 values are cast, so
    /// magnitudes above 2^24 come back rounded to the nearest f32.
    pub fn get(&self, index: &[usize]) -> Result<f32> {
        let offset = self.shape.offset_of(index)?;
        match &self.storage {
            CpuStorage::F32(v) => Ok(v[offset]),
            CpuStorage::F16(v) => Ok(v[offset].to_f32()),
            CpuStorage::I32(v) => Ok(v[offset] as f32),
        }
    }

    /// Reshape the tensor, returning a new tensor with the same data but
    /// a different shape.
    ///
    /// The total number of elements must remain the same.
    pub fn reshape(&self, new_shape: Shape) -> Result<Tensor> {
        if self.shape.numel() != new_shape.numel() {
            return Err(TensorError::ShapeMismatch {
                expected: self.shape.dims().to_vec(),
                got: new_shape.dims().to_vec(),
            });
        }
        Ok(Tensor {
            storage: self.storage.clone(),
            shape: new_shape,
            dtype: self.dtype,
        })
    }

    /// Converts to another element type.
    ///
    /// Supported: F32 <-> F16, and I32 -> F32. Converting to the current
    /// dtype is a copy. I32 -> F32 rounds magnitudes above 2^24 to the
    /// nearest representable f32; F32 -> F16 rounds to half precision.
    pub fn to_dtype(&self, dtype: DType) -> Result<Tensor> {
        if dtype == self.dtype {
            return Ok(self.clone());
        }
        let storage = match (&self.storage, dtype) {
            (CpuStorage::I32(v), DType::F32) => {
                CpuStorage::from_f32_vec(v.iter().map(|&x| x as f32).collect())
            }
            (CpuStorage::F32(_) | CpuStorage::F16(_), DType::F32 | DType::F16) => {
                CpuStorage::from_f32_as(dtype, self.storage.to_f32_vec()?)?
            }
            _ => {
                return Err(TensorError::UnsupportedDType(format!(
                    "cannot convert {} tensor to {}",
                    self.dtype, dtype
                )))
            }
        };
        Ok(Self::from_storage(storage, self.shape.clone()))
    }

    /// Builds a result tensor of this tensor's dtype from f32 values.
    fn with_f32_data(&self, data: Vec<f32>, shape: Shape) -> Result<Tensor> {
        Ok(Self::from_storage(
            CpuStorage::from_f32_as(self.dtype, data)?,
            shape,
        ))
    }

    fn float_data(&self) -> Result<Vec<f32>> {
        if !self.dtype.is_float() {
            return Err(TensorError::UnsupportedDType(format!(
                "{} tensors do not support float arithmetic",
                self.dtype
            )));
        }
        self.to_vec_f32()
    }

    fn map_unary(
        &self,
        f: impl FnOnce(&[f32]) -> Result<Vec<f32>>,
    ) -> Result<Tensor> {
        let data = self.float_data()?;
        let out = f(&data)?;
        self.with_f32_data(out, self.shape.clone())
    }

    /// Broadcasts `self` and `other` to a common shape and applies `f` to the
    /// expanded operands.
    fn zip_broadcast(
        &self,
        other: &Tensor,
        f: impl FnOnce(&[f32], &[f32]) -> Result<Vec<f32>>,
    ) -> Result<Tensor> {
        if self.dtype != other.dtype {
            return Err(TensorError::DTypeMismatch {
                expected: self.dtype.to_string(),
                got: other.dtype.to_string(),
            });
        }
        let a = self.float_data()?;
        let b = other.float_data()?;

        let out_shape = Shape::broadcast_shape(&self.shape, &other.shape)?;
        let a = expand(a, &self.shape, &out_shape)?;
        let b = expand(b, &other.shape, &out_shape)?;

        let out = f(&a, &b)?;
        self.with_f32_data(out, out_shape)
    }

    /// Element-wise `self + other` with broadcasting.
    pub fn add(&self, other: &Tensor, backend: &dyn ComputeBackend) -> Result<Tensor> {
        self.zip_broadcast(other, |a, b| backend.add(a, b))
    }

    /// Element-wise `self - other` with broadcasting.
    pub fn sub(&self, other: &Tensor, backend: &dyn ComputeBackend) -> Result<Tensor> {
        self.zip_broadcast(other, |a, b| backend.sub(a, b))
    }

    /// Element-wise `self * other` with broadcasting.
    pub fn mul(&self, other: &Tensor, backend: &dyn ComputeBackend) -> Result<Tensor> {
        self.zip_broadcast(other, |a, b| backend.mul(a, b))
    }

    /// Element-wise `self / other` with broadcasting.
    pub fn div(&self, other: &Tensor, backend: &dyn ComputeBackend) -> Result<Tensor> {
        self.zip_broadcast(other, |a, b| backend.div(a, b))
    }

    /// Element-wise `self * s`.
    pub fn scale(&self, s: f32, backend: &dyn ComputeBackend) -> Result<Tensor> {
        self.map_unary(|x| backend.scale(x, s))
    }

    /// Element-wise `self + s`.
    pub fn add_scalar(&self, s: f32, backend: &dyn ComputeBackend) -> Result<Tensor> {
        self.map_unary(|x| backend.add_scalar(x, s))
    }

    /// Element-wise `exp(self)`.
    pub fn exp(&self, backend: &dyn ComputeBackend) -> Result<Tensor> {
        self.map_unary(|x| backend.exp(x))
    }

    /// Element-wise `tanh(self)`.
    pub fn tanh(&self, backend: &dyn ComputeBackend) -> Result<Tensor> {
        self.map_unary(|x| backend.tanh(x))
    }

    /// Element-wise logistic sigmoid.
    pub fn sigmoid(&self, backend: &dyn ComputeBackend) -> Result<Tensor> {
        self.map_unary(|x| backend.sigmoid(x))
    }

    /// Element-wise `max(0, self)`.
    pub fn relu(&self, backend: &dyn ComputeBackend) -> Result<Tensor> {
        self.map_unary(|x| backend.relu(x))
    }

    /// Maximum along `axis`, keeping it as a size-1 dimension.
    pub fn max_axis(&self, axis: isize, backend: &dyn ComputeBackend) -> Result<Tensor> {
        self.reduce(axis, |x, o, a, i| backend.reduce_max(x, o, a, i))
    }

    /// Sum along `axis`, keeping it as a size-1 dimension.
    pub fn sum_axis(&self, axis: isize, backend: &dyn ComputeBackend) -> Result<Tensor> {
        self.reduce(axis, |x, o, a, i| backend.reduce_sum(x, o, a, i))
    }

    fn reduce(
        &self,
        axis: isize,
        f: impl FnOnce(&[f32], usize, usize, usize) -> Result<Vec<f32>>,
    ) -> Result<Tensor> {
        let axis = self.shape.normalize_axis(axis)?;
        let (outer, axis_len, inner) = self.shape.split_at_axis(axis);
        let data = self.float_data()?;
        let out = f(&data, outer, axis_len, inner)?;
        self.with_f32_data(out, self.shape.reduced(axis))
    }
}

/// Materializes `data` of shape `from` at the broadcast shape `to`.
fn expand(data: Vec<f32>, from: &Shape, to: &Shape) -> Result<Vec<f32>> {
    if from == to {
        return Ok(data);
    }
    tracing::trace!(from = %from, to = %to, "broadcasting operand");
    let offsets = from.broadcast_offsets(to)?;
    Ok(offsets.into_iter().map(|i| data[i]).collect())
}

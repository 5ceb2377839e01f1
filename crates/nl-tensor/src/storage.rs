use half::f16;

use crate::dtype::DType;
use crate::error::{Result, TensorError};

/// CPU-side tensor storage.
#[derive(Debug, Clone)]
pub enum CpuStorage {
    /// 32-bit floating point storage.
    F32(Vec<f32>),
    /// 16-bit floating point storage.
    F16(Vec<f16>),
    /// 32-bit signed integer storage.
    I32(Vec<i32>),
}

impl CpuStorage {
    /// Number of elements in this storage.
    pub fn len(&self) -> usize {
        match self {
            CpuStorage::F32(v) => v.len(),
            CpuStorage::F16(v) => v.len(),
            CpuStorage::I32(v) => v.len(),
        }
    }

    /// Returns true if the storage contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the data as an f32 slice.
    ///
    /// # Errors
    /// Returns an error if the storage is not F32.
    pub fn as_f32_slice(&self) -> Result<&[f32]> {
        match self {
            CpuStorage::F32(v) => Ok(v.as_slice()),
            other => Err(TensorError::DTypeMismatch {
                expected: DType::F32.to_string(),
                got: other.dtype().to_string(),
            }),
        }
    }

    /// Copies the data out as f32 values, widening half-precision storage.
    ///
    /// # Errors
    /// Returns an error for non-float storage.
    pub fn to_f32_vec(&self) -> Result<Vec<f32>> {
        match self {
            CpuStorage::F32(v) => Ok(v.clone()),
            CpuStorage::F16(v) => Ok(v.iter().map(|h| h.to_f32()).collect()),
            CpuStorage::I32(_) => Err(TensorError::UnsupportedDType(format!(
                "{} storage cannot be read as f32",
                DType::I32
            ))),
        }
    }

    /// Create storage from an f32 vector.
    pub fn from_f32_vec(data: Vec<f32>) -> Self {
        CpuStorage::F32(data)
    }

    /// Create storage of the given float dtype from f32 values, narrowing
    /// to half precision when asked to.
    ///
    /// # Errors
    /// Returns an error for non-float dtypes.
    pub fn from_f32_as(dtype: DType, data: Vec<f32>) -> Result<Self> {
        match dtype {
            DType::F32 => Ok(CpuStorage::F32(data)),
            DType::F16 => Ok(CpuStorage::F16(
                data.into_iter().map(f16::from_f32).collect(),
            )),
            DType::I32 => Err(TensorError::UnsupportedDType(format!(
                "cannot store f32 results as {}",
                DType::I32
            ))),
        }
    }

    /// Returns the dtype of this storage.
    pub fn dtype(&self) -> DType {
        match self {
            CpuStorage::F32(_) => DType::F32,
            CpuStorage::F16(_) => DType::F16,
            CpuStorage::I32(_) => DType::I32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f32_vec() {
        let s = CpuStorage::from_f32_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.as_f32_slice().unwrap(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_f16_widening() {
        let s = CpuStorage::from_f32_as(DType::F16, vec![0.5, -2.0]).unwrap();
        assert_eq!(s.dtype(), DType::F16);
        assert!(s.as_f32_slice().is_err());
        assert_eq!(s.to_f32_vec().unwrap(), vec![0.5, -2.0]);
    }

    #[test]
    fn test_i32_not_readable_as_f32() {
        let s = CpuStorage::I32(vec![1, 2]);
        assert_eq!(s.dtype(), DType::I32);
        assert!(s.to_f32_vec().is_err());
        assert!(CpuStorage::from_f32_as(DType::I32, vec![1.0]).is_err());
    }

    #[test]
    fn test_empty() {
        let s = CpuStorage::from_f32_vec(vec![]);
        assert!(s.is_empty());
        assert_eq!(s.dtype(), DType::F32);
    }
}

use crate::error::{Result, TensorError};
use std::fmt;

/// A tensor shape, wrapping a vector of dimension sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Create a new shape from a vector of dimensions.
    pub fn new(dims: Vec<usize>) -> Self {
        Shape { dims }
    }

    /// The rank-0 shape of a single scalar.
    pub fn scalar() -> Self {
        Shape { dims: vec![] }
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements (product of all dimension sizes).
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Returns the size of dimension `i`.
    ///
    /// # Panics
    /// Panics if `i >= ndim()`.
    pub fn dim(&self, i: usize) -> usize {
        self.dims[i]
    }

    /// Returns a reference to the underlying dimension sizes.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Computes row-major contiguous strides for this shape.
    ///
    /// For a shape [d0, d1, d2], the strides are [d1*d2, d2, 1].
    pub fn strides(&self) -> Vec<usize> {
        if self.dims.is_empty() {
            return vec![];
        }
        let mut strides = vec![0usize; self.dims.len()];
        strides[self.dims.len() - 1] = 1;
        for i in (0..self.dims.len() - 1).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }

    /// Resolves a possibly negative axis into an index into `dims()`.
    ///
    /// `-1` is the last axis, `-ndim` the first.
    pub fn normalize_axis(&self, axis: isize) -> Result<usize> {
        let ndim = self.ndim() as isize;
        let resolved = if axis < 0 { axis + ndim } else { axis };
        if resolved < 0 || resolved >= ndim {
            return Err(TensorError::InvalidAxis {
                axis,
                ndim: self.ndim(),
            });
        }
        Ok(resolved as usize)
    }

    /// Splits the shape around `axis` into `(outer, axis_len, inner)`.
    ///
    /// A row-major buffer of this shape can then be addressed as
    /// `[outer][axis_len][inner]`.
    ///
    /// # Panics
    /// Panics if `axis >= ndim()`.
    pub fn split_at_axis(&self, axis: usize) -> (usize, usize, usize) {
        let outer: usize = self.dims[..axis].iter().product();
        let inner: usize = self.dims[axis + 1..].iter().product();
        (outer, self.dims[axis], inner)
    }

    /// Returns a copy of this shape with `axis` collapsed to size 1.
    pub fn reduced(&self, axis: usize) -> Shape {
        let mut dims = self.dims.clone();
        dims[axis] = 1;
        Shape::new(dims)
    }

    /// Converts a multi-dimensional index into a row-major linear offset.
    pub fn offset_of(&self, index: &[usize]) -> Result<usize> {
        if index.len() != self.dims.len() || index.iter().zip(&self.dims).any(|(i, d)| i >= d) {
            return Err(TensorError::IndexOutOfBounds {
                index: index.to_vec(),
                dims: self.dims.clone(),
            });
        }
        Ok(index
            .iter()
            .zip(self.strides())
            .map(|(i, stride)| i * stride)
            .sum())
    }

    /// Compute the broadcast shape of `a` and `b` using numpy-style broadcasting rules.
    ///
    /// Rules:
    /// 1. If the shapes have different numbers of dimensions, the shorter shape is
    ///    padded with ones on the left.
    /// 2. For each dimension, sizes must either be equal, or one of them must be 1.
    ///    The output dimension is the maximum of the two.
    pub fn broadcast_shape(a: &Shape, b: &Shape) -> Result<Shape> {
        let max_ndim = a.ndim().max(b.ndim());
        let mut result = Vec::with_capacity(max_ndim);

        for i in 0..max_ndim {
            // Index from the right: dim at position (ndim - 1 - i) from the right
            let da = if i < a.ndim() {
                a.dims[a.ndim() - 1 - i]
            } else {
                1
            };
            let db = if i < b.ndim() {
                b.dims[b.ndim() - 1 - i]
            } else {
                1
            };

            if da == db {
                result.push(da);
            } else if da == 1 {
                result.push(db);
            } else if db == 1 {
                result.push(da);
            } else {
                return Err(TensorError::BroadcastError {
                    a: a.dims.clone(),
                    b: b.dims.clone(),
                });
            }
        }

        result.reverse();
        Ok(Shape::new(result))
    }

    /// For every element of `target`, the linear offset of the element of
    /// `self` it is broadcast from.
    ///
    /// `target` must be a valid broadcast of `self` (e.g. the output of
    /// [`Shape::broadcast_shape`]).
    pub fn broadcast_offsets(&self, target: &Shape) -> Result<Vec<usize>> {
        if target.ndim() < self.ndim() {
            return Err(TensorError::BroadcastError {
                a: self.dims.clone(),
                b: target.dims.clone(),
            });
        }

        // Left-pad our dims with ones; broadcast dims get a zero stride.
        let pad = target.ndim() - self.ndim();
        let own_strides = self.strides();
        let mut src_strides = vec![0usize; target.ndim()];
        for (i, &d) in self.dims.iter().enumerate() {
            let t = target.dims[pad + i];
            if d == t {
                src_strides[pad + i] = own_strides[i];
            } else if d != 1 {
                return Err(TensorError::BroadcastError {
                    a: self.dims.clone(),
                    b: target.dims.clone(),
                });
            }
        }

        let target_strides = target.strides();
        let offsets = (0..target.numel())
            .map(|linear| {
                let mut rem = linear;
                let mut src = 0;
                for (axis, &stride) in target_strides.iter().enumerate() {
                    let coord = rem / stride;
                    rem %= stride;
                    src += coord * src_strides[axis];
                }
                src
            })
            .collect();
        Ok(offsets)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_shape() {
        let s = Shape::new(vec![2, 3, 4]);
        assert_eq!(s.ndim(), 3);
        assert_eq!(s.numel(), 24);
        assert_eq!(s.dim(0), 2);
        assert_eq!(s.dim(2), 4);
    }

    #[test]
    fn test_strides() {
        let s = Shape::new(vec![2, 3, 4]);
        assert_eq!(s.strides(), vec![12, 4, 1]);
    }

    #[test]
    fn test_scalar_shape() {
        let s = Shape::scalar();
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.numel(), 1); // product of empty = 1
        assert_eq!(s.strides(), vec![]);
        assert_eq!(s.offset_of(&[]).unwrap(), 0);
    }

    #[test]
    fn test_normalize_axis() {
        let s = Shape::new(vec![2, 3, 4]);
        assert_eq!(s.normalize_axis(-1).unwrap(), 2);
        assert_eq!(s.normalize_axis(-3).unwrap(), 0);
        assert_eq!(s.normalize_axis(1).unwrap(), 1);
        assert!(s.normalize_axis(3).is_err());
        assert!(s.normalize_axis(-4).is_err());
        assert!(Shape::scalar().normalize_axis(-1).is_err());
    }

    #[test]
    fn test_split_at_axis() {
        let s = Shape::new(vec![2, 3, 4]);
        assert_eq!(s.split_at_axis(0), (1, 2, 12));
        assert_eq!(s.split_at_axis(1), (2, 3, 4));
        assert_eq!(s.split_at_axis(2), (6, 4, 1));
        assert_eq!(s.reduced(1).dims(), &[2, 1, 4]);
    }

    #[test]
    fn test_offset_of() {
        let s = Shape::new(vec![2, 3]);
        assert_eq!(s.offset_of(&[1, 2]).unwrap(), 5);
        assert!(s.offset_of(&[2, 0]).is_err());
        assert!(s.offset_of(&[0]).is_err());
    }

    #[test]
    fn test_broadcast_same() {
        let a = Shape::new(vec![2, 3]);
        let b = Shape::new(vec![2, 3]);
        let c = Shape::broadcast_shape(&a, &b).unwrap();
        assert_eq!(c.dims(), &[2, 3]);
    }

    #[test]
    fn test_broadcast_expand() {
        let a = Shape::new(vec![2, 1]);
        let b = Shape::new(vec![1, 3]);
        let c = Shape::broadcast_shape(&a, &b).unwrap();
        assert_eq!(c.dims(), &[2, 3]);
    }

    #[test]
    fn test_broadcast_different_ndim() {
        let a = Shape::new(vec![3]);
        let b = Shape::new(vec![2, 3]);
        let c = Shape::broadcast_shape(&a, &b).unwrap();
        assert_eq!(c.dims(), &[2, 3]);
    }

    #[test]
    fn test_broadcast_error() {
        let a = Shape::new(vec![2, 3]);
        let b = Shape::new(vec![2, 4]);
        assert!(Shape::broadcast_shape(&a, &b).is_err());
    }

    #[test]
    fn test_broadcast_offsets_column() {
        // [2, 1] -> [2, 3]: each row repeats its single value.
        let from = Shape::new(vec![2, 1]);
        let to = Shape::new(vec![2, 3]);
        assert_eq!(from.broadcast_offsets(&to).unwrap(), vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_broadcast_offsets_row_and_scalar() {
        let row = Shape::new(vec![3]);
        let to = Shape::new(vec![2, 3]);
        assert_eq!(row.broadcast_offsets(&to).unwrap(), vec![0, 1, 2, 0, 1, 2]);

        let scalar = Shape::scalar();
        assert_eq!(scalar.broadcast_offsets(&to).unwrap(), vec![0; 6]);
    }

    #[test]
    fn test_broadcast_offsets_incompatible() {
        let from = Shape::new(vec![2]);
        let to = Shape::new(vec![2, 3]);
        assert!(from.broadcast_offsets(&to).is_err());
    }
}

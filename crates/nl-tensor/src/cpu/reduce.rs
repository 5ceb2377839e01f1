// Axis reductions over a row-major `[outer, axis_len, inner]` view.

use crate::error::{Result, TensorError};

/// Folds the middle axis with `f`, starting from `init`.
pub fn reduce_axis(
    x: &[f32],
    outer: usize,
    axis_len: usize,
    inner: usize,
    init: f32,
    f: impl Fn(f32, f32) -> f32,
) -> Result<Vec<f32>> {
    if x.len() != outer * axis_len * inner {
        return Err(TensorError::ShapeMismatch {
            expected: vec![outer, axis_len, inner],
            got: vec![x.len()],
        });
    }

    let mut result = vec![init; outer * inner];
    for o in 0..outer {
        let base = o * axis_len * inner;
        for a in 0..axis_len {
            let row = &x[base + a * inner..base + (a + 1) * inner];
            let acc = &mut result[o * inner..(o + 1) * inner];
            for (r, &v) in acc.iter_mut().zip(row) {
                *r = f(*r, v);
            }
        }
    }
    Ok(result)
}

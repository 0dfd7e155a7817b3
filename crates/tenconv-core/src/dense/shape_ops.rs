//! Shape manipulation operations on tensors
//!
//! `reshape` is layout-preserving: it reinterprets a contiguous buffer without
//! moving elements. `permute` is layout-changing: it reorders strides, and
//! `to_contiguous` pays the O(size) copy that brings the tensor back to
//! row-major order.

use super::types::DenseND;
use scirs2_core::ndarray_ext::IxDyn;
use scirs2_core::numeric::Num;

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Reshape the tensor to a new shape
    ///
    /// Elements are taken in row-major logical order. This is a reinterpretation
    /// when the tensor is contiguous and falls back to a gather otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the total size doesn't match.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let reshaped = tensor.reshape(&[6, 4]).unwrap();
    /// assert_eq!(reshaped.shape(), &[6, 4]);
    /// assert!(tensor.reshape(&[7]).is_err());
    /// ```
    pub fn reshape(&self, new_shape: &[usize]) -> anyhow::Result<Self> {
        self.clone().into_reshape(new_shape)
    }

    /// Consuming variant of [`reshape`](Self::reshape) that reuses the buffer
    /// when the tensor is contiguous.
    pub fn into_reshape(self, new_shape: &[usize]) -> anyhow::Result<Self> {
        let new_size: usize = new_shape.iter().product();
        let old_size = self.len();
        if new_size != old_size {
            anyhow::bail!(
                "Cannot reshape tensor of size {} into shape {:?} (size {})",
                old_size,
                new_shape,
                new_size
            );
        }
        if self.is_contiguous() {
            let reshaped = self.data.into_shape_with_order(IxDyn(new_shape))?;
            Ok(Self { data: reshaped })
        } else {
            Self::from_vec(self.to_vec(), new_shape)
        }
    }

    /// Permute (transpose) the axes of the tensor.
    ///
    /// Output axis `i` is input axis `axes[i]`. The result shares no storage
    /// with `self` but keeps a strided layout; call
    /// [`to_contiguous`](Self::to_contiguous) to materialise row-major order.
    ///
    /// # Errors
    ///
    /// Returns an error if `axes` is not a valid permutation of `0..rank`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let permuted = tensor.permute(&[2, 0, 1]).unwrap();
    /// assert_eq!(permuted.shape(), &[4, 2, 3]);
    /// ```
    pub fn permute(&self, axes: &[usize]) -> anyhow::Result<Self> {
        if axes.len() != self.rank() {
            anyhow::bail!(
                "Permutation axes length {} does not match tensor rank {}",
                axes.len(),
                self.rank()
            );
        }
        let mut seen = vec![false; self.rank()];
        for &axis in axes {
            if axis >= self.rank() {
                anyhow::bail!("Invalid axis {} for rank {}", axis, self.rank());
            }
            if seen[axis] {
                anyhow::bail!("Duplicate axis {} in permutation", axis);
            }
            seen[axis] = true;
        }
        let permuted = self.data.clone().permuted_axes(IxDyn(axes));
        Ok(Self { data: permuted })
    }

    /// Return a C-contiguous copy of the tensor (no copy if already contiguous)
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// let transposed = tensor.permute(&[1, 0]).unwrap().to_contiguous();
    /// assert!(transposed.is_contiguous());
    /// assert_eq!(transposed.shape(), &[3, 2]);
    /// assert_eq!(transposed[&[2, 1]], 6.0);
    /// ```
    pub fn to_contiguous(self) -> Self {
        if self.is_contiguous() {
            return self;
        }
        Self {
            data: self.data.as_standard_layout().into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reshape_keeps_row_major_order() {
        let tensor =
            DenseND::<f64>::from_vec((0..12).map(|x| x as f64).collect(), &[2, 3, 2]).unwrap();
        let matrix = tensor.reshape(&[6, 2]).unwrap();
        assert_eq!(matrix[&[4, 1]], 9.0);
        assert_eq!(matrix.to_vec(), tensor.to_vec());
    }

    #[test]
    fn test_reshape_of_permuted_tensor_follows_logical_order() {
        let tensor = DenseND::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let flat = tensor.permute(&[1, 0]).unwrap().reshape(&[6]).unwrap();
        assert_eq!(flat.to_vec(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_permute_rejects_invalid_axes() {
        let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
        assert!(tensor.permute(&[0, 1]).is_err());
        assert!(tensor.permute(&[0, 1, 3]).is_err());
        assert!(tensor.permute(&[0, 1, 1]).is_err());
    }

    #[test]
    fn test_permute_nhwc_to_nchw() {
        // (N, P, Q, K) -> (N, K, P, Q)
        let nhwc = DenseND::<f64>::from_shape_fn(&[2, 3, 4, 5], |idx| {
            (idx[0] * 1000 + idx[1] * 100 + idx[2] * 10 + idx[3]) as f64
        });
        let nchw = nhwc.permute(&[0, 3, 1, 2]).unwrap().to_contiguous();
        assert_eq!(nchw.shape(), &[2, 5, 3, 4]);
        assert_eq!(nchw[&[1, 4, 2, 3]], nhwc[&[1, 2, 3, 4]]);
    }
}

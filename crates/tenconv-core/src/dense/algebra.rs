//! Dense matrix algebra: transpose and matrix multiplication
//!
//! `matmul` is the GEMM primitive consumed by the im2col convolution path. It
//! delegates to ndarray's `dot`, so accumulation order and rounding are those
//! of the underlying kernel.

use super::types::DenseND;
use scirs2_core::ndarray_ext::{Ix2, IxDyn};
use scirs2_core::numeric::Float;

impl<T> DenseND<T>
where
    T: Float + 'static,
{
    /// Transpose a 2D tensor.
    ///
    /// # Errors
    ///
    /// Returns an error if the tensor is not 2D.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let m = DenseND::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// let t = m.transpose().unwrap();
    /// assert_eq!(t.shape(), &[3, 2]);
    /// assert_eq!(t[&[2, 0]], 3.0);
    /// ```
    pub fn transpose(&self) -> anyhow::Result<Self> {
        if self.rank() != 2 {
            anyhow::bail!("Transpose requires a 2D tensor, got rank {}", self.rank());
        }
        self.permute(&[1, 0])
    }

    /// Matrix multiplication of two 2D tensors.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either tensor is not 2D
    /// - The inner dimensions don't match (A's columns != B's rows)
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let a = DenseND::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// let b = DenseND::<f64>::from_vec(vec![5.0, 6.0, 7.0, 8.0], &[2, 2]).unwrap();
    ///
    /// let c = a.matmul(&b).unwrap();
    /// // [[1*5 + 2*7, 1*6 + 2*8],
    /// //  [3*5 + 4*7, 3*6 + 4*8]]
    /// assert_eq!(c.to_vec(), vec![19.0, 22.0, 43.0, 50.0]);
    /// ```
    pub fn matmul(&self, other: &Self) -> anyhow::Result<Self> {
        if self.rank() != 2 || other.rank() != 2 {
            anyhow::bail!(
                "Matrix multiplication requires 2D tensors, got ranks {} and {}",
                self.rank(),
                other.rank()
            );
        }

        let (m, k1) = (self.shape()[0], self.shape()[1]);
        let (k2, n) = (other.shape()[0], other.shape()[1]);
        if k1 != k2 {
            anyhow::bail!(
                "Matrix dimensions incompatible: ({}, {}) × ({}, {})",
                m,
                k1,
                k2,
                n
            );
        }

        let lhs = self.data.view().into_dimensionality::<Ix2>()?;
        let rhs = other.data.view().into_dimensionality::<Ix2>()?;
        let product = lhs.dot(&rhs).into_dimensionality::<IxDyn>()?;
        Ok(Self { data: product })
    }
}

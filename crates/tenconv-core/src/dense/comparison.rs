//! Numerical closeness checks between tensors

use super::types::DenseND;
use scirs2_core::numeric::Float;

impl<T> DenseND<T>
where
    T: Float,
{
    /// Largest absolute element-wise difference between two tensors.
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let a = DenseND::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
    /// let b = DenseND::from_vec(vec![1.0, 2.5, 2.0], &[3]).unwrap();
    /// assert_eq!(a.max_abs_diff(&b).unwrap(), 1.0);
    /// ```
    pub fn max_abs_diff(&self, other: &Self) -> anyhow::Result<T> {
        if self.shape() != other.shape() {
            anyhow::bail!("Shape mismatch: {:?} vs {:?}", self.shape(), other.shape());
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc.max((a - b).abs())))
    }

    /// Check that all elements satisfy `|a - b| <= atol + rtol * |b|`.
    ///
    /// Returns `false` when the shapes differ or any element is NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let a = DenseND::from_vec(vec![1.0, 2.0], &[2]).unwrap();
    /// let b = DenseND::from_vec(vec![1.0 + 1e-12, 2.0], &[2]).unwrap();
    /// assert!(a.allclose(&b, 1e-9, 0.0));
    /// assert!(!a.allclose(&DenseND::from_vec(vec![1.0, 2.1], &[2]).unwrap(), 1e-9, 0.0));
    /// ```
    pub fn allclose(&self, other: &Self, rtol: T, atol: T) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(&a, &b)| (a - b).abs() <= atol + rtol * b.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allclose_shape_mismatch() {
        let a = DenseND::<f64>::zeros(&[2, 2]);
        let b = DenseND::<f64>::zeros(&[4]);
        assert!(!a.allclose(&b, 1e-9, 1e-12));
        assert!(a.max_abs_diff(&b).is_err());
    }

    #[test]
    fn test_allclose_rejects_nan() {
        let a = DenseND::<f64>::from_vec(vec![f64::NAN], &[1]).unwrap();
        assert!(!a.allclose(&a.clone(), 1e-9, 1e-12));
    }

    #[test]
    fn test_allclose_across_layouts() {
        let a = DenseND::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let strided = a.permute(&[1, 0]).unwrap().permute(&[1, 0]).unwrap();
        assert!(a.allclose(&strided, 0.0, 0.0));
    }
}

//! Element-wise arithmetic and element type conversion

use super::types::DenseND;
use scirs2_core::numeric::{Num, NumCast, ToPrimitive};

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Element-wise multiplication (Hadamard product) with another tensor.
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes don't match. No broadcasting is performed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let a = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// let b = DenseND::from_vec(vec![2.0, 0.5, -1.0, 0.0], &[2, 2]).unwrap();
    /// let c = a.mul_elementwise(&b).unwrap();
    /// assert_eq!(c.to_vec(), vec![2.0, 1.0, -3.0, 0.0]);
    /// ```
    pub fn mul_elementwise(&self, other: &Self) -> anyhow::Result<Self> {
        if self.shape() != other.shape() {
            anyhow::bail!(
                "Shape mismatch for element-wise multiply: {:?} vs {:?}",
                self.shape(),
                other.shape()
            );
        }
        Ok(Self {
            data: &self.data * &other.data,
        })
    }

    /// Element-wise multiplication with NumPy-style broadcasting.
    ///
    /// Shapes are aligned from the trailing axis; each aligned pair must be
    /// equal or contain a 1. A rank-3 `(C, R, S)` kernel therefore multiplies
    /// every batch item of an `(N, C, R, S)` window.
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes are not broadcast-compatible.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let windows = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// let kernel = DenseND::from_vec(vec![10.0, 100.0], &[2]).unwrap();
    /// let product = windows.mul_broadcast(&kernel).unwrap();
    /// assert_eq!(product.to_vec(), vec![10.0, 200.0, 30.0, 400.0]);
    /// ```
    pub fn mul_broadcast(&self, other: &Self) -> anyhow::Result<Self> {
        if broadcast_shape(self.shape(), other.shape()).is_none() {
            anyhow::bail!(
                "Shapes {:?} and {:?} cannot be broadcast together",
                self.shape(),
                other.shape()
            );
        }
        Ok(Self {
            data: &self.data * &other.data,
        })
    }

    /// Convert every element to another numeric type.
    ///
    /// # Errors
    ///
    /// Returns an error if an element is not representable in `U`
    /// (for example a NaN converted to an integer type).
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let ints = DenseND::<i32>::from_vec(vec![1, -2, 3], &[3]).unwrap();
    /// let floats: DenseND<f64> = ints.cast().unwrap();
    /// assert_eq!(floats.to_vec(), vec![1.0, -2.0, 3.0]);
    /// ```
    pub fn cast<U>(&self) -> anyhow::Result<DenseND<U>>
    where
        T: ToPrimitive,
        U: Clone + Num + NumCast,
    {
        let mut converted = Vec::with_capacity(self.len());
        for value in self.data.iter() {
            let cast = <U as NumCast>::from(value.clone()).ok_or_else(|| {
                anyhow::anyhow!(
                    "Value at position {} is not representable in {}",
                    converted.len(),
                    std::any::type_name::<U>()
                )
            })?;
            converted.push(cast);
        }
        DenseND::from_vec(converted, self.shape())
    }
}

/// Resulting shape of broadcasting `a` against `b`, or `None` if incompatible.
pub(crate) fn broadcast_shape(a: &[usize], b: &[usize]) -> Option<Vec<usize>> {
    let rank = a.len().max(b.len());
    let mut shape = vec![0; rank];
    for i in 0..rank {
        let da = if i < a.len() { a[a.len() - 1 - i] } else { 1 };
        let db = if i < b.len() { b[b.len() - 1 - i] } else { 1 };
        shape[rank - 1 - i] = match (da, db) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            _ => return None,
        };
    }
    Some(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_elementwise_shape_mismatch() {
        let a = DenseND::<f64>::ones(&[2, 3]);
        let b = DenseND::<f64>::ones(&[3, 2]);
        assert!(a.mul_elementwise(&b).is_err());
    }

    #[test]
    fn test_mul_elementwise_with_permuted_operand() {
        let a = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let at = a.permute(&[1, 0]).unwrap();
        let product = a.mul_elementwise(&at).unwrap();
        assert_eq!(product.to_vec(), vec![1.0, 6.0, 6.0, 16.0]);
    }

    #[test]
    fn test_broadcast_shape_rules() {
        assert_eq!(
            broadcast_shape(&[2, 3, 4, 5], &[3, 4, 5]),
            Some(vec![2, 3, 4, 5])
        );
        assert_eq!(broadcast_shape(&[2, 1, 4], &[3, 1]), Some(vec![2, 3, 4]));
        assert_eq!(broadcast_shape(&[2, 3], &[4, 3, 2]), None);
    }

    #[test]
    fn test_mul_broadcast_kernel_over_batch() {
        let window = DenseND::<f64>::from_shape_fn(&[3, 2, 2, 2], |idx| (idx[0] + 1) as f64);
        let kernel = DenseND::<f64>::ones(&[2, 2, 2]);
        let product = window.mul_broadcast(&kernel).unwrap();
        assert_eq!(product.shape(), &[3, 2, 2, 2]);
        assert_eq!(
            product.sum_axes(&[1, 2, 3]).unwrap().to_vec(),
            vec![8.0, 16.0, 24.0]
        );
        assert!(window.mul_broadcast(&DenseND::<f64>::ones(&[3, 2])).is_err());
    }

    #[test]
    fn test_cast_f32_to_f64_is_exact() {
        let a = DenseND::<f32>::from_vec(vec![0.5, 1.25, -3.0], &[3]).unwrap();
        let b: DenseND<f64> = a.cast().unwrap();
        assert_eq!(b.to_vec(), vec![0.5, 1.25, -3.0]);
        assert_eq!(b.shape(), &[3]);
    }

    #[test]
    fn test_cast_nan_to_int_fails() {
        let a = DenseND::<f64>::from_vec(vec![1.0, f64::NAN], &[2]).unwrap();
        let result: anyhow::Result<DenseND<i32>> = a.cast();
        assert!(result.is_err());
    }
}

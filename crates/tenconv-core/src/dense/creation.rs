//! Tensor creation from index functions

use super::types::DenseND;
use scirs2_core::ndarray_ext::{Array, Dimension, IxDyn};
use scirs2_core::numeric::Num;

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Create a tensor whose elements are computed from their multi-index
    ///
    /// `f` is called once per element in row-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::from_shape_fn(&[2, 3], |idx| (idx[0] * 10 + idx[1]) as f64);
    /// assert_eq!(tensor[&[1, 2]], 12.0);
    /// ```
    pub fn from_shape_fn<F>(shape: &[usize], mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> T,
    {
        let data = Array::from_shape_fn(IxDyn(shape), |idx: IxDyn| f(idx.slice()));
        Self { data }
    }
}

//! Sum reductions over all elements or a set of axes

use super::types::DenseND;
use scirs2_core::ndarray_ext::Axis;
use scirs2_core::numeric::Num;

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Sum of all elements
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let tensor = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// assert_eq!(tensor.sum(), 10.0);
    /// ```
    pub fn sum(&self) -> T {
        self.data.sum()
    }

    /// Sum over several axes at once; reduced axes are removed from the shape.
    ///
    /// The order of `axes` does not matter.
    ///
    /// # Errors
    ///
    /// Returns an error if an axis is out of bounds or appears twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// // (N=2, C=2, R=1, S=2) reduced over C, R, S gives one value per batch item
    /// let tensor = DenseND::<f64>::from_vec((1..=8).map(|x| x as f64).collect(), &[2, 2, 1, 2]).unwrap();
    /// let per_batch = tensor.sum_axes(&[1, 2, 3]).unwrap();
    /// assert_eq!(per_batch.shape(), &[2]);
    /// assert_eq!(per_batch.to_vec(), vec![10.0, 26.0]);
    /// ```
    pub fn sum_axes(&self, axes: &[usize]) -> anyhow::Result<Self> {
        let mut seen = vec![false; self.rank()];
        for &axis in axes {
            if axis >= self.rank() {
                anyhow::bail!("Axis {} out of bounds for rank {}", axis, self.rank());
            }
            if seen[axis] {
                anyhow::bail!("Duplicate axis {} in reduction", axis);
            }
            seen[axis] = true;
        }

        // Reduce from the highest axis down so remaining indices stay valid.
        let mut sorted = axes.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let mut data = self.data.clone();
        for axis in sorted {
            data = data.sum_axis(Axis(axis));
        }
        Ok(Self { data })
    }
}

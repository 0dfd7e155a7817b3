//! Element access and rectangular sub-region read/write
//!
//! Sub-regions are described by one half-open `Range<usize>` per axis. Reads
//! return freshly owned tensors; writes copy into the receiver in place.

use super::types::DenseND;
use scirs2_core::ndarray_ext::{Axis, IxDyn};
use scirs2_core::numeric::Num;
use std::ops::Range;

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Get a reference to an element, or `None` if the index is out of bounds
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::ones(&[2, 3]);
    /// assert_eq!(tensor.get(&[1, 2]), Some(&1.0));
    /// assert_eq!(tensor.get(&[2, 0]), None);
    /// assert_eq!(tensor.get(&[0]), None);
    /// ```
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        if index.len() != self.rank() {
            return None;
        }
        self.data.get(IxDyn(index))
    }

    /// Copy out the rectangular sub-region selected by `ranges`
    ///
    /// # Errors
    ///
    /// Returns an error if the number of ranges differs from the rank, or if
    /// any range is reversed or exceeds its axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::from_shape_fn(&[3, 4], |idx| (idx[0] * 4 + idx[1]) as f64);
    /// let window = tensor.slice_ranges(&[1..3, 2..4]).unwrap();
    /// assert_eq!(window.shape(), &[2, 2]);
    /// assert_eq!(window.to_vec(), vec![6.0, 7.0, 10.0, 11.0]);
    /// ```
    pub fn slice_ranges(&self, ranges: &[Range<usize>]) -> anyhow::Result<Self> {
        self.check_ranges(ranges)?;
        let mut view = self.data.view();
        for (axis, range) in ranges.iter().enumerate() {
            let (_, tail) = view.split_at(Axis(axis), range.start);
            let (window, _) = tail.split_at(Axis(axis), range.end - range.start);
            view = window;
        }
        Ok(Self {
            data: view.to_owned(),
        })
    }

    /// Overwrite the rectangular sub-region selected by `ranges` with `values`
    ///
    /// # Errors
    ///
    /// Returns an error if the ranges are invalid for this tensor or if the
    /// selected region's shape differs from `values.shape()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_core::DenseND;
    ///
    /// let mut canvas = DenseND::<f64>::zeros(&[3, 3]);
    /// let patch = DenseND::from_elem(&[1, 2], 7.0);
    /// canvas.assign_ranges(&[1..2, 0..2], &patch).unwrap();
    /// assert_eq!(canvas[&[1, 1]], 7.0);
    /// assert_eq!(canvas[&[1, 2]], 0.0);
    /// ```
    pub fn assign_ranges(&mut self, ranges: &[Range<usize>], values: &Self) -> anyhow::Result<()> {
        self.check_ranges(ranges)?;
        let region: Vec<usize> = ranges.iter().map(|r| r.end - r.start).collect();
        if region.as_slice() != values.shape() {
            anyhow::bail!(
                "Cannot assign tensor of shape {:?} into region of shape {:?}",
                values.shape(),
                region
            );
        }
        let mut view = self.data.view_mut();
        for (axis, range) in ranges.iter().enumerate() {
            let (_, tail) = view.split_at(Axis(axis), range.start);
            let (window, _) = tail.split_at(Axis(axis), range.end - range.start);
            view = window;
        }
        view.assign(&values.data);
        Ok(())
    }

    fn check_ranges(&self, ranges: &[Range<usize>]) -> anyhow::Result<()> {
        if ranges.len() != self.rank() {
            anyhow::bail!(
                "Expected {} ranges for tensor of rank {}, got {}",
                self.rank(),
                self.rank(),
                ranges.len()
            );
        }
        for (axis, (range, &dim)) in ranges.iter().zip(self.shape()).enumerate() {
            if range.start > range.end || range.end > dim {
                anyhow::bail!(
                    "Range {:?} is invalid for axis {} of size {}",
                    range,
                    axis,
                    dim
                );
            }
        }
        Ok(())
    }
}

//! Shape and stride arithmetic shared by both convolution strategies
//!
//! Axis conventions (fixed):
//!
//! ```text
//! Input   (N, C, H, W)      Filter (K, C, R, S)
//! Padded  (N, C, H+2p, W+2p)
//! Output  (N, K, P, Q)      P = (H+2p-R)/stride + 1,  Q = (W+2p-S)/stride + 1
//! Im2col  (N*P*Q, C*R*S)    Flattened filter (K, C*R*S)
//! ```
//!
//! [`ConvGeometry::new`] is the single validation point: both strategies take
//! a geometry and never re-derive these quantities.

use crate::error::{ConvError, ConvResult, SpatialAxis};

/// Rank of every tensor the engine accepts or produces
pub const CONV_RANK: usize = 4;

/// Validated dimensions of one convolution call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConvGeometry {
    /// N
    pub batch: usize,
    /// C, shared by input and filter
    pub in_channels: usize,
    /// H (before padding)
    pub in_height: usize,
    /// W (before padding)
    pub in_width: usize,
    /// K
    pub out_channels: usize,
    /// R
    pub kernel_height: usize,
    /// S
    pub kernel_width: usize,
    pub stride: usize,
    pub padding: usize,
    /// H + 2p
    pub padded_height: usize,
    /// W + 2p
    pub padded_width: usize,
    /// P
    pub out_height: usize,
    /// Q
    pub out_width: usize,
}

impl ConvGeometry {
    /// Validate input/filter shapes against stride and padding and derive all
    /// dimensions.
    ///
    /// Checks run in this order: stride positive, input rank, filter rank,
    /// channel agreement, kernel fits inside the padded input, height then
    /// width divisible by stride.
    ///
    /// # Errors
    ///
    /// - [`ConvError::InvalidStride`] if `stride == 0`
    /// - [`ConvError::ShapeMismatch`] for wrong ranks, channel disagreement, or
    ///   a kernel larger than the padded input
    /// - [`ConvError::StrideAlignment`] if a padded extent is not a multiple of `stride`
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_kernels::ConvGeometry;
    ///
    /// let g = ConvGeometry::new(&[2, 3, 6, 6], &[4, 3, 3, 3], 2, 1).unwrap();
    /// assert_eq!(g.padded_shape(), [2, 3, 8, 8]);
    /// assert_eq!(g.output_shape(), [2, 4, 3, 3]);
    /// assert_eq!(g.im2col_shape(), [18, 27]);
    /// ```
    pub fn new(
        input_shape: &[usize],
        filter_shape: &[usize],
        stride: usize,
        padding: usize,
    ) -> ConvResult<Self> {
        if stride == 0 {
            return Err(ConvError::InvalidStride { stride });
        }
        if input_shape.len() != CONV_RANK {
            return Err(ConvError::shape_mismatch(
                "conv2d",
                format!(
                    "input must be rank 4 (N, C, H, W), got shape {:?}",
                    input_shape
                ),
            ));
        }
        if filter_shape.len() != CONV_RANK {
            return Err(ConvError::shape_mismatch(
                "conv2d",
                format!(
                    "filter must be rank 4 (K, C, R, S), got shape {:?}",
                    filter_shape
                ),
            ));
        }

        let (batch, in_channels, in_height, in_width) = (
            input_shape[0],
            input_shape[1],
            input_shape[2],
            input_shape[3],
        );
        let (out_channels, filter_channels, kernel_height, kernel_width) = (
            filter_shape[0],
            filter_shape[1],
            filter_shape[2],
            filter_shape[3],
        );

        if filter_channels != in_channels {
            return Err(ConvError::shape_mismatch(
                "conv2d",
                format!(
                    "filter has {} input channels but input has {}",
                    filter_channels, in_channels
                ),
            ));
        }

        let (padded_height, padded_width) = match (
            padded_extent(in_height, padding),
            padded_extent(in_width, padding),
        ) {
            (Some(h), Some(w)) => (h, w),
            _ => {
                return Err(ConvError::shape_mismatch(
                    "conv2d",
                    format!(
                        "padding {} overflows input extent {}x{}",
                        padding, in_height, in_width
                    ),
                ))
            }
        };

        if kernel_height > padded_height || kernel_width > padded_width {
            return Err(ConvError::shape_mismatch(
                "conv2d",
                format!(
                    "kernel {}x{} does not fit in padded input {}x{}",
                    kernel_height, kernel_width, padded_height, padded_width
                ),
            ));
        }

        if padded_height % stride != 0 {
            return Err(ConvError::StrideAlignment {
                axis: SpatialAxis::Height,
                extent: padded_height,
                stride,
            });
        }
        if padded_width % stride != 0 {
            return Err(ConvError::StrideAlignment {
                axis: SpatialAxis::Width,
                extent: padded_width,
                stride,
            });
        }

        let out_height = (padded_height - kernel_height) / stride + 1;
        let out_width = (padded_width - kernel_width) / stride + 1;
        let padded_shape = [batch, in_channels, padded_height, padded_width];
        let output_shape = [batch, out_channels, out_height, out_width];
        for shape in [padded_shape, output_shape] {
            if element_count(&shape).is_none() {
                return Err(ConvError::shape_mismatch(
                    "conv2d",
                    format!("tensor of shape {:?} is too large to allocate", shape),
                ));
            }
        }

        Ok(Self {
            batch,
            in_channels,
            in_height,
            in_width,
            out_channels,
            kernel_height,
            kernel_width,
            stride,
            padding,
            padded_height,
            padded_width,
            out_height,
            out_width,
        })
    }

    /// (N, C, H, W)
    pub fn input_shape(&self) -> [usize; 4] {
        [self.batch, self.in_channels, self.in_height, self.in_width]
    }

    /// (K, C, R, S)
    pub fn filter_shape(&self) -> [usize; 4] {
        [
            self.out_channels,
            self.in_channels,
            self.kernel_height,
            self.kernel_width,
        ]
    }

    /// (N, C, H+2p, W+2p)
    pub fn padded_shape(&self) -> [usize; 4] {
        [
            self.batch,
            self.in_channels,
            self.padded_height,
            self.padded_width,
        ]
    }

    /// (N, K, P, Q)
    pub fn output_shape(&self) -> [usize; 4] {
        [
            self.batch,
            self.out_channels,
            self.out_height,
            self.out_width,
        ]
    }

    /// C * R * S, the length of one flattened window or kernel
    pub fn receptive_field(&self) -> usize {
        self.in_channels * self.kernel_height * self.kernel_width
    }

    /// (N * P * Q, C * R * S)
    pub fn im2col_shape(&self) -> [usize; 2] {
        [
            self.batch * self.out_height * self.out_width,
            self.receptive_field(),
        ]
    }

    /// (K, C * R * S)
    pub fn flat_filter_shape(&self) -> [usize; 2] {
        [self.out_channels, self.receptive_field()]
    }

    /// Top-left corners `(i, j)` of every window in the padded input.
    ///
    /// Origins step by `stride` from 0 up to and including `H+2p-R` (rows)
    /// and `W+2p-S` (columns), row-major. The output position of an origin is
    /// `(i / stride, j / stride)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenconv_kernels::ConvGeometry;
    ///
    /// let g = ConvGeometry::new(&[1, 1, 4, 4], &[1, 1, 2, 2], 2, 0).unwrap();
    /// let origins: Vec<_> = g.window_origins().collect();
    /// assert_eq!(origins, vec![(0, 0), (0, 2), (2, 0), (2, 2)]);
    /// ```
    pub fn window_origins(&self) -> impl Iterator<Item = (usize, usize)> {
        let stride = self.stride;
        let last_col = self.padded_width - self.kernel_width;
        (0..=self.padded_height - self.kernel_height)
            .step_by(stride)
            .flat_map(move |i| (0..=last_col).step_by(stride).map(move |j| (i, j)))
    }

    /// Multiply-accumulate count: N * K * P * Q * C * R * S
    ///
    /// Saturates at `usize::MAX`.
    pub fn macs(&self) -> usize {
        [
            self.out_channels,
            self.out_height,
            self.out_width,
            self.receptive_field(),
        ]
        .iter()
        .fold(self.batch, |acc, &d| acc.saturating_mul(d))
    }

    /// Confirm the operands handed to a strategy match this geometry
    pub(crate) fn check_operands(
        &self,
        operation: &'static str,
        padded_shape: &[usize],
        filter_shape: &[usize],
    ) -> ConvResult<()> {
        if padded_shape != self.padded_shape() {
            return Err(ConvError::shape_mismatch(
                operation,
                format!(
                    "padded input shape {:?} does not match expected {:?}",
                    padded_shape,
                    self.padded_shape()
                ),
            ));
        }
        if filter_shape != self.filter_shape() {
            return Err(ConvError::shape_mismatch(
                operation,
                format!(
                    "filter shape {:?} does not match expected {:?}",
                    filter_shape,
                    self.filter_shape()
                ),
            ));
        }
        Ok(())
    }
}

/// `extent + 2 * padding`, or `None` on overflow
pub(crate) fn padded_extent(extent: usize, padding: usize) -> Option<usize> {
    padding.checked_mul(2).and_then(|p| extent.checked_add(p))
}

/// Number of elements of `shape` if an array of that shape can exist
pub(crate) fn element_count(shape: &[usize]) -> Option<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .filter(|&n| n <= isize::MAX as usize)
}

/// Output shape `(N, K, P, Q)` of a convolution, without computing it
///
/// # Examples
///
/// ```
/// use tenconv_kernels::conv_output_shape;
///
/// assert_eq!(conv_output_shape(&[2, 1, 2, 2], &[3, 1, 2, 2], 2, 0).unwrap(), [2, 3, 1, 1]);
/// assert!(conv_output_shape(&[2, 1, 3, 3], &[3, 1, 2, 2], 2, 0).is_err());
/// ```
pub fn conv_output_shape(
    input_shape: &[usize],
    filter_shape: &[usize],
    stride: usize,
    padding: usize,
) -> ConvResult<[usize; 4]> {
    ConvGeometry::new(input_shape, filter_shape, stride, padding).map(|g| g.output_shape())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_padding_preserves_spatial_size() {
        let g = ConvGeometry::new(&[1, 3, 32, 32], &[8, 3, 3, 3], 1, 1).unwrap();
        assert_eq!(g.output_shape(), [1, 8, 32, 32]);
        assert_eq!(g.flat_filter_shape(), [8, 27]);
        assert_eq!(g.macs(), 8 * 32 * 32 * 27);
    }

    #[test]
    fn test_rank_errors() {
        let err = ConvGeometry::new(&[1, 3, 8], &[1, 3, 3, 3], 1, 1).unwrap_err();
        assert!(matches!(err, ConvError::ShapeMismatch { .. }));
        assert!(err.to_string().contains("input"));

        let err = ConvGeometry::new(&[1, 3, 8, 8], &[1, 3, 3, 3, 1], 1, 1).unwrap_err();
        assert!(matches!(err, ConvError::ShapeMismatch { .. }));
        assert!(err.to_string().contains("filter"));
    }

    #[test]
    fn test_channel_mismatch() {
        let err = ConvGeometry::new(&[1, 1, 2, 2], &[2, 2, 2, 2], 2, 1).unwrap_err();
        assert!(matches!(err, ConvError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_kernel_larger_than_padded_input() {
        let err = ConvGeometry::new(&[1, 1, 2, 2], &[1, 1, 5, 1], 1, 1).unwrap_err();
        assert!(matches!(err, ConvError::ShapeMismatch { .. }));
        // A kernel exactly the padded size gives a single output pixel
        let g = ConvGeometry::new(&[1, 1, 2, 2], &[1, 1, 4, 4], 1, 1).unwrap();
        assert_eq!(g.output_shape(), [1, 1, 1, 1]);
    }

    #[test]
    fn test_oversized_padding_is_rejected() {
        let err = ConvGeometry::new(&[1, 1, 1, 1], &[1, 1, 1, 1], 1, usize::MAX / 2 + 1)
            .unwrap_err();
        assert!(matches!(err, ConvError::ShapeMismatch { .. }));

        // Fits in usize but not in an array
        let err = ConvGeometry::new(&[1, 1, 1, 1], &[1, 1, 1, 1], 1, usize::MAX / 8).unwrap_err();
        assert!(matches!(err, ConvError::ShapeMismatch { .. }));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_stride_alignment_reports_axis() {
        // padded 6x7, stride 2: height ok, width misaligned
        let err = ConvGeometry::new(&[1, 1, 4, 5], &[1, 1, 2, 2], 2, 1).unwrap_err();
        assert_eq!(
            err,
            ConvError::StrideAlignment {
                axis: SpatialAxis::Width,
                extent: 7,
                stride: 2,
            }
        );

        let err = ConvGeometry::new(&[1, 1, 5, 4], &[1, 1, 2, 2], 2, 1).unwrap_err();
        assert!(matches!(
            err,
            ConvError::StrideAlignment {
                axis: SpatialAxis::Height,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_stride_checked_first() {
        // Also has a rank error, but the stride check wins
        let err = ConvGeometry::new(&[1, 1, 4], &[1, 1, 2, 2], 0, 0).unwrap_err();
        assert_eq!(err, ConvError::InvalidStride { stride: 0 });
    }

    #[test]
    fn test_window_origin_count_matches_output() {
        for &(h, w, r, s, stride, padding) in &[
            (4, 4, 2, 2, 2, 0),
            (5, 7, 3, 3, 1, 1),
            (6, 6, 3, 1, 2, 1),
            (2, 2, 2, 2, 2, 0),
        ] {
            let g = ConvGeometry::new(&[1, 1, h, w], &[1, 1, r, s], stride, padding).unwrap();
            let origins: Vec<_> = g.window_origins().collect();
            assert_eq!(origins.len(), g.out_height * g.out_width);
            let (last_i, last_j) = *origins.last().unwrap();
            assert!(last_i + r <= g.padded_height);
            assert!(last_j + s <= g.padded_width);
            assert_eq!(last_i / stride, g.out_height - 1);
            assert_eq!(last_j / stride, g.out_width - 1);
        }
    }

    #[test]
    fn test_check_operands() {
        let g = ConvGeometry::new(&[1, 2, 3, 3], &[4, 2, 3, 3], 1, 1).unwrap();
        assert!(g.check_operands("t", &[1, 2, 5, 5], &[4, 2, 3, 3]).is_ok());
        assert!(g.check_operands("t", &[1, 2, 3, 3], &[4, 2, 3, 3]).is_err());
        assert!(g.check_operands("t", &[1, 2, 5, 5], &[4, 2, 1, 1]).is_err());
    }
}

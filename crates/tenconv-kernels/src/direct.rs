//! Direct (sliding-window) convolution
//!
//! For every window origin the `(N, C, R, S)` block of the padded input is
//! multiplied by each `(C, R, S)` kernel, broadcast over the batch axis, and
//! reduced over channel, row and column:
//!
//! ```text
//! Output[n, k, i, j] = Σ_{c,r,s} Padded[n, c, i·stride + r, j·stride + s] · Filter[k, c, r, s]
//! ```
//!
//! This costs N·K·P·Q·C·R·S multiply-adds with poor locality. It is the
//! reference result the im2col strategy is checked against.

use crate::error::{ConvResult, InvariantExt};
use crate::geometry::ConvGeometry;
use scirs2_core::numeric::Float;
use tenconv_core::DenseND;

/// Compute the convolution of an already padded input by direct reduction.
///
/// `padded` must have shape `geometry.padded_shape()` and `filter` must have
/// shape `geometry.filter_shape()`.
///
/// # Errors
///
/// Returns [`ConvError::ShapeMismatch`](crate::ConvError::ShapeMismatch) if the
/// operands do not match `geometry`.
///
/// # Examples
///
/// ```
/// use tenconv_core::DenseND;
/// use tenconv_kernels::{conv2d_direct, ConvGeometry};
///
/// let input = DenseND::<f64>::from_vec(vec![2.0, 3.0, 3.0, 4.0], &[1, 1, 2, 2]).unwrap();
/// let filter = DenseND::<f64>::from_vec(vec![2.0, 1.0, 1.0, 2.0], &[1, 1, 2, 2]).unwrap();
/// let geometry = ConvGeometry::new(input.shape(), filter.shape(), 2, 0).unwrap();
///
/// let output = conv2d_direct(&input, &filter, &geometry).unwrap();
/// assert_eq!(output.shape(), &[1, 1, 1, 1]);
/// assert_eq!(output[&[0, 0, 0, 0]], 18.0);
/// ```
pub fn conv2d_direct<T>(
    padded: &DenseND<T>,
    filter: &DenseND<T>,
    geometry: &ConvGeometry,
) -> ConvResult<DenseND<T>>
where
    T: Float + 'static,
{
    const OP: &str = "conv2d_direct";

    geometry.check_operands(OP, padded.shape(), filter.shape())?;

    let n = geometry.batch;
    let c = geometry.in_channels;
    let (r, s) = (geometry.kernel_height, geometry.kernel_width);
    let stride = geometry.stride;

    // One (C, R, S) kernel per output channel
    let kernels = (0..geometry.out_channels)
        .map(|k| {
            filter
                .slice_ranges(&[k..k + 1, 0..c, 0..r, 0..s])?
                .into_reshape(&[c, r, s])
        })
        .collect::<anyhow::Result<Vec<_>>>()
        .invariant(OP)?;

    let mut output = DenseND::zeros(&geometry.output_shape());

    for (i, j) in geometry.window_origins() {
        let window = padded
            .slice_ranges(&[0..n, 0..c, i..i + r, j..j + s])
            .invariant(OP)?;
        let (x, y) = (i / stride, j / stride);

        for (k, kernel) in kernels.iter().enumerate() {
            let per_batch = window
                .mul_broadcast(kernel)
                .and_then(|product| product.sum_axes(&[1, 2, 3]))
                .and_then(|sums| sums.into_reshape(&[n, 1, 1, 1]))
                .invariant(OP)?;
            output
                .assign_ranges(&[0..n, k..k + 1, x..x + 1, y..y + 1], &per_batch)
                .invariant(OP)?;
        }
    }

    tracing::trace!(output = ?output.shape(), "direct convolution finished");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::padding::pad_input;
    use crate::ConvError;

    /// Six nested loops straight from the definition
    fn reference(padded: &DenseND<f64>, filter: &DenseND<f64>, g: &ConvGeometry) -> DenseND<f64> {
        let mut out = DenseND::zeros(&g.output_shape());
        for n in 0..g.batch {
            for k in 0..g.out_channels {
                for i in 0..g.out_height {
                    for j in 0..g.out_width {
                        let mut acc = 0.0;
                        for c in 0..g.in_channels {
                            for r in 0..g.kernel_height {
                                for s in 0..g.kernel_width {
                                    acc += padded[&[n, c, i * g.stride + r, j * g.stride + s]]
                                        * filter[&[k, c, r, s]];
                                }
                            }
                        }
                        out[&[n, k, i, j]] = acc;
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_matches_definition_multi_channel() {
        let input = DenseND::<f64>::from_shape_fn(&[2, 3, 5, 5], |idx| {
            ((idx[0] * 7 + idx[1] * 5 + idx[2] * 3 + idx[3]) % 11) as f64 - 5.0
        });
        let filter = DenseND::<f64>::from_shape_fn(&[4, 3, 3, 3], |idx| {
            0.5 * ((idx[0] + 2 * idx[1] + idx[2] * idx[3]) % 5) as f64
        });
        let g = ConvGeometry::new(input.shape(), filter.shape(), 1, 1).unwrap();
        let padded = pad_input(&input, 1).unwrap();

        let output = conv2d_direct(&padded, &filter, &g).unwrap();
        assert_eq!(output.shape(), &[2, 4, 5, 5]);
        assert!(output.allclose(&reference(&padded, &filter, &g), 1e-12, 1e-12));
    }

    #[test]
    fn test_stride_two_picks_every_other_window() {
        let input = DenseND::<f64>::from_shape_fn(&[1, 1, 4, 4], |idx| {
            (idx[2] * 4 + idx[3]) as f64
        });
        // 1x1 kernel of ones samples the window origin
        let filter = DenseND::<f64>::ones(&[1, 1, 1, 1]);
        let g = ConvGeometry::new(input.shape(), filter.shape(), 2, 0).unwrap();

        let output = conv2d_direct(&input, &filter, &g).unwrap();
        assert_eq!(output.to_vec(), vec![0.0, 2.0, 8.0, 10.0]);
    }

    #[test]
    fn test_rejects_unpadded_operand() {
        let input = DenseND::<f64>::ones(&[1, 1, 3, 3]);
        let filter = DenseND::<f64>::ones(&[1, 1, 3, 3]);
        let g = ConvGeometry::new(input.shape(), filter.shape(), 1, 1).unwrap();
        let err = conv2d_direct(&input, &filter, &g).unwrap_err();
        assert!(matches!(err, ConvError::ShapeMismatch { .. }));
    }
}

//! im2col + GEMM convolution
//!
//! **im2col (image-to-column)** copies every sliding window of the padded
//! input into one row of a matrix, so the whole convolution becomes a single
//! dense matrix product:
//!
//! 1. Flatten the filter `(K, C, R, S)` to `(K, C·R·S)` (layout-preserving reshape)
//! 2. Write window `(i, j)` of every batch item, flattened to `C·R·S`, at
//!    position `(i/stride, j/stride)` of an `(N, P, Q, C·R·S)` buffer
//! 3. View the buffer as `(N·P·Q, C·R·S)`
//! 4. `Product = Im2col × Filterᵀ`, shape `(N·P·Q, K)`
//! 5. Reshape to `(N, P, Q, K)` and permute to `(N, K, P, Q)`
//!
//! Step 5's permute is required: the GEMM naturally yields channel-last
//! order. It is the only layout-changing copy in the pipeline.
//!
//! The im2col matrix costs N·P·Q·C·R·S elements of scratch memory in exchange
//! for running the reduction through one GEMM instead of K reductions per window.

use crate::error::{ConvError, ConvResult, InvariantExt};
use crate::geometry::ConvGeometry;
use scirs2_core::numeric::Float;
use tenconv_core::DenseND;

/// Flatten a `(K, C, R, S)` filter into a `(K, C·R·S)` matrix.
///
/// Row `k` lists kernel `k` in `(c, r, s)` row-major order, matching the
/// column order produced by [`im2col`].
///
/// # Examples
///
/// ```
/// use tenconv_core::DenseND;
/// use tenconv_kernels::{flatten_filter, ConvGeometry};
///
/// let filter = DenseND::<f64>::ones(&[4, 3, 2, 2]);
/// let geometry = ConvGeometry::new(&[1, 3, 4, 4], filter.shape(), 1, 0).unwrap();
/// assert_eq!(flatten_filter(&filter, &geometry).unwrap().shape(), &[4, 12]);
/// ```
pub fn flatten_filter<T>(filter: &DenseND<T>, geometry: &ConvGeometry) -> ConvResult<DenseND<T>>
where
    T: Float + 'static,
{
    const OP: &str = "flatten_filter";

    if filter.shape() != geometry.filter_shape() {
        return Err(ConvError::shape_mismatch(
            OP,
            format!(
                "filter shape {:?} does not match expected {:?}",
                filter.shape(),
                geometry.filter_shape()
            ),
        ));
    }
    filter.reshape(&geometry.flat_filter_shape()).invariant(OP)
}

/// Rearrange the sliding windows of a padded input into an
/// `(N·P·Q, C·R·S)` matrix.
///
/// Row `n·P·Q + x·Q + y` holds the window whose origin is
/// `(x·stride, y·stride)` in batch item `n`.
///
/// # Examples
///
/// ```
/// use tenconv_core::DenseND;
/// use tenconv_kernels::{im2col, ConvGeometry};
///
/// // 1x1x3x3 image, 2x2 windows, stride 1 -> 4 windows of 4 values
/// let padded = DenseND::<f64>::from_vec((1..=9).map(|v| v as f64).collect(), &[1, 1, 3, 3]).unwrap();
/// let geometry = ConvGeometry::new(padded.shape(), &[1, 1, 2, 2], 1, 0).unwrap();
///
/// let cols = im2col(&padded, &geometry).unwrap();
/// assert_eq!(cols.shape(), &[4, 4]);
/// assert_eq!(cols.slice_ranges(&[3..4, 0..4]).unwrap().to_vec(), vec![5.0, 6.0, 8.0, 9.0]);
/// ```
pub fn im2col<T>(padded: &DenseND<T>, geometry: &ConvGeometry) -> ConvResult<DenseND<T>>
where
    T: Float + 'static,
{
    const OP: &str = "im2col";

    if padded.shape() != geometry.padded_shape() {
        return Err(ConvError::shape_mismatch(
            OP,
            format!(
                "padded input shape {:?} does not match expected {:?}",
                padded.shape(),
                geometry.padded_shape()
            ),
        ));
    }

    let n = geometry.batch;
    let c = geometry.in_channels;
    let (r, s) = (geometry.kernel_height, geometry.kernel_width);
    let (p, q) = (geometry.out_height, geometry.out_width);
    let crs = geometry.receptive_field();
    let stride = geometry.stride;

    let mut buffer = DenseND::zeros(&[n, p, q, crs]);
    for (i, j) in geometry.window_origins() {
        let (x, y) = (i / stride, j / stride);
        let rows = padded
            .slice_ranges(&[0..n, 0..c, i..i + r, j..j + s])
            .and_then(|window| window.into_reshape(&[n, 1, 1, crs]))
            .invariant(OP)?;
        buffer
            .assign_ranges(&[0..n, x..x + 1, y..y + 1, 0..crs], &rows)
            .invariant(OP)?;
    }

    let cols = buffer.into_reshape(&geometry.im2col_shape()).invariant(OP)?;
    tracing::trace!(im2col = ?cols.shape(), "windows restructured");
    Ok(cols)
}

/// Compute the convolution of an already padded input via im2col + GEMM.
///
/// Produces the same output as [`conv2d_direct`](crate::conv2d_direct) up to
/// floating-point rounding.
///
/// # Errors
///
/// - [`ConvError::ShapeMismatch`] if the operands do not match `geometry`
/// - [`ConvError::InternalInvariant`] if the GEMM reports a dimension
///   mismatch, which validated geometry rules out
///
/// # Examples
///
/// ```
/// use tenconv_core::DenseND;
/// use tenconv_kernels::{conv2d_direct, conv2d_im2col, pad_input, ConvGeometry};
///
/// let input = DenseND::<f64>::from_shape_fn(&[2, 3, 4, 4], |idx| (idx[1] + idx[2] * idx[3]) as f64);
/// let filter = DenseND::<f64>::from_shape_fn(&[5, 3, 3, 3], |idx| (idx[0] as f64) - 0.25 * idx[3] as f64);
/// let geometry = ConvGeometry::new(input.shape(), filter.shape(), 1, 1).unwrap();
/// let padded = pad_input(&input, 1).unwrap();
///
/// let fast = conv2d_im2col(&padded, &filter, &geometry).unwrap();
/// let reference = conv2d_direct(&padded, &filter, &geometry).unwrap();
/// assert_eq!(fast.shape(), &[2, 5, 4, 4]);
/// assert!(fast.allclose(&reference, 1e-9, 1e-9));
/// ```
pub fn conv2d_im2col<T>(
    padded: &DenseND<T>,
    filter: &DenseND<T>,
    geometry: &ConvGeometry,
) -> ConvResult<DenseND<T>>
where
    T: Float + 'static,
{
    const OP: &str = "conv2d_im2col";

    geometry.check_operands(OP, padded.shape(), filter.shape())?;

    let cols = im2col(padded, geometry)?;
    let flat_filter = flatten_filter(filter, geometry)?;

    let product = flat_filter
        .transpose()
        .and_then(|filter_t| cols.matmul(&filter_t))
        .invariant(OP)?;

    let rows = geometry.im2col_shape()[0];
    let k = geometry.out_channels;
    if product.shape() != [rows, k] {
        return Err(ConvError::internal(
            OP,
            format!(
                "GEMM produced shape {:?}, expected {:?}",
                product.shape(),
                [rows, k]
            ),
        ));
    }

    let [n, _, p, q] = geometry.output_shape();
    let output = product
        .into_reshape(&[n, p, q, k])
        .and_then(|nhwc| nhwc.permute(&[0, 3, 1, 2]))
        .invariant(OP)?
        .to_contiguous();

    tracing::trace!(output = ?output.shape(), "im2col convolution finished");
    Ok(output)
}

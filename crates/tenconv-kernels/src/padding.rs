//! Zero padding of NCHW tensors on the spatial axes

use crate::error::{ConvError, ConvResult, InvariantExt};
use crate::geometry::{element_count, padded_extent, CONV_RANK};
use scirs2_core::numeric::Num;
use tenconv_core::DenseND;

/// Embed `input` in a zero tensor with `padding` extra pixels on every
/// spatial border.
///
/// Output shape is `(N, C, H + 2p, W + 2p)`; the region starting at `(p, p)`
/// on the height/width axes is a verbatim copy of `input`. `padding == 0`
/// yields a plain copy.
///
/// # Errors
///
/// Returns [`ConvError::ShapeMismatch`] if `input` is not rank 4.
///
/// # Examples
///
/// ```
/// use tenconv_core::DenseND;
/// use tenconv_kernels::pad_input;
///
/// let input = DenseND::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[1, 1, 2, 2]).unwrap();
/// let padded = pad_input(&input, 1).unwrap();
/// assert_eq!(padded.shape(), &[1, 1, 4, 4]);
/// assert_eq!(padded[&[0, 0, 0, 0]], 0.0);
/// assert_eq!(padded[&[0, 0, 1, 1]], 1.0);
/// assert_eq!(padded[&[0, 0, 2, 2]], 4.0);
/// assert_eq!(padded[&[0, 0, 3, 3]], 0.0);
/// ```
pub fn pad_input<T>(input: &DenseND<T>, padding: usize) -> ConvResult<DenseND<T>>
where
    T: Clone + Num,
{
    const OP: &str = "pad_input";

    if input.rank() != CONV_RANK {
        return Err(ConvError::shape_mismatch(
            OP,
            format!(
                "input must be rank 4 (N, C, H, W), got shape {:?}",
                input.shape()
            ),
        ));
    }
    if padding == 0 {
        return Ok(input.clone());
    }

    let shape = input.shape();
    let (n, c, h, w) = (shape[0], shape[1], shape[2], shape[3]);
    let (padded_h, padded_w) = match (padded_extent(h, padding), padded_extent(w, padding)) {
        (Some(ph), Some(pw)) => (ph, pw),
        _ => {
            return Err(ConvError::shape_mismatch(
                OP,
                format!("padding {} overflows input extent {}x{}", padding, h, w),
            ))
        }
    };
    let padded_shape = [n, c, padded_h, padded_w];
    if element_count(&padded_shape).is_none() {
        return Err(ConvError::shape_mismatch(
            OP,
            format!("padded shape {:?} is too large to allocate", padded_shape),
        ));
    }
    let mut padded = DenseND::zeros(&padded_shape);
    padded
        .assign_ranges(
            &[0..n, 0..c, padding..padding + h, padding..padding + w],
            input,
        )
        .invariant(OP)?;

    tracing::trace!(input = ?shape, padded = ?padded.shape(), "padded input");
    Ok(padded)
}

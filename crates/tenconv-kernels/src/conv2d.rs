//! Public convolution entry points
//!
//! Every call follows the same pipeline: validate the configuration, derive a
//! [`ConvGeometry`] (which performs all shape/stride checks), pad the input,
//! then hand the padded input to the selected strategy. Both strategies see
//! identical validation.

use crate::config::{Conv2dConfig, ConvStrategy};
use crate::direct::conv2d_direct;
use crate::error::{ConvResult, InvariantExt};
use crate::geometry::ConvGeometry;
use crate::im2col::conv2d_im2col;
use crate::padding::pad_input;
use crate::promote::Promote;
use scirs2_core::numeric::{Float, Num, ToPrimitive};
use tenconv_core::DenseND;

/// 2D cross-correlation of an `(N, C, H, W)` input with a `(K, C, R, S)`
/// filter, using the direct strategy.
///
/// Returns an `(N, K, P, Q)` tensor with `P = (H + 2·padding - R) / stride + 1`
/// and `Q = (W + 2·padding - S) / stride + 1`. The usual defaults are
/// `stride = 1, padding = 1` (see [`Conv2dConfig::default`]).
///
/// # Errors
///
/// - [`ConvError::InvalidStride`](crate::ConvError::InvalidStride) if `stride == 0`
/// - [`ConvError::ShapeMismatch`](crate::ConvError::ShapeMismatch) for wrong ranks or channel counts
/// - [`ConvError::StrideAlignment`](crate::ConvError::StrideAlignment) if a padded extent is not a multiple of `stride`
///
/// # Examples
///
/// ```
/// use tenconv_core::DenseND;
/// use tenconv_kernels::convolve2d;
///
/// let input = DenseND::<f64>::ones(&[1, 2, 4, 4]);
/// let filter = DenseND::<f64>::ones(&[3, 2, 3, 3]);
///
/// let output = convolve2d(&input, &filter, 1, 1).unwrap();
/// assert_eq!(output.shape(), &[1, 3, 4, 4]);
/// // Interior pixels see a full 2x3x3 window of ones
/// assert_eq!(output[&[0, 0, 1, 1]], 18.0);
/// // Corners see 2x2x2 ones, the rest is padding
/// assert_eq!(output[&[0, 0, 0, 0]], 8.0);
/// ```
pub fn convolve2d<T>(
    input: &DenseND<T>,
    filter: &DenseND<T>,
    stride: usize,
    padding: usize,
) -> ConvResult<DenseND<T>>
where
    T: Float + 'static,
{
    convolve2d_with(input, filter, &Conv2dConfig::new(stride, padding))
}

/// 2D cross-correlation with explicit configuration, including the strategy.
///
/// # Examples
///
/// ```
/// use tenconv_core::DenseND;
/// use tenconv_kernels::{convolve2d_with, Conv2dConfig, ConvStrategy};
///
/// let input = DenseND::<f64>::from_shape_fn(&[2, 3, 6, 6], |idx| (idx[2] * 6 + idx[3]) as f64);
/// let filter = DenseND::<f64>::from_shape_fn(&[4, 3, 2, 2], |idx| (idx[0] + idx[1]) as f64);
///
/// let config = Conv2dConfig::new(2, 0);
/// let direct = convolve2d_with(&input, &filter, &config).unwrap();
/// let gemm = convolve2d_with(&input, &filter, &config.with_strategy(ConvStrategy::Im2col)).unwrap();
/// assert!(direct.allclose(&gemm, 1e-9, 1e-9));
/// ```
pub fn convolve2d_with<T>(
    input: &DenseND<T>,
    filter: &DenseND<T>,
    config: &Conv2dConfig,
) -> ConvResult<DenseND<T>>
where
    T: Float + 'static,
{
    config.validate()?;
    let geometry = ConvGeometry::new(input.shape(), filter.shape(), config.stride, config.padding)?;

    tracing::debug!(
        strategy = %config.strategy,
        input = ?geometry.input_shape(),
        filter = ?geometry.filter_shape(),
        output = ?geometry.output_shape(),
        stride = geometry.stride,
        padding = geometry.padding,
        macs = geometry.macs(),
        "conv2d"
    );

    let padded = pad_input(input, geometry.padding)?;
    match config.strategy {
        ConvStrategy::Direct => conv2d_direct(&padded, filter, &geometry),
        ConvStrategy::Im2col => conv2d_im2col(&padded, filter, &geometry),
    }
}

/// 2D cross-correlation of tensors with different element types.
///
/// Both operands are converted to their common type (see [`Promote`]) before
/// the convolution runs.
///
/// # Examples
///
/// ```
/// use tenconv_core::DenseND;
/// use tenconv_kernels::{convolve2d_mixed, Conv2dConfig};
///
/// let input = DenseND::<i32>::from_vec(vec![2, 3, 3, 4], &[1, 1, 2, 2]).unwrap();
/// let filter = DenseND::<f64>::from_vec(vec![0.5, 0.5, 0.5, 0.5], &[1, 1, 2, 2]).unwrap();
///
/// let output: DenseND<f64> = convolve2d_mixed(&input, &filter, &Conv2dConfig::new(2, 0)).unwrap();
/// assert_eq!(output[&[0, 0, 0, 0]], 6.0);
/// ```
pub fn convolve2d_mixed<A, B>(
    input: &DenseND<A>,
    filter: &DenseND<B>,
    config: &Conv2dConfig,
) -> ConvResult<DenseND<<A as Promote<B>>::Output>>
where
    A: Promote<B> + Clone + Num + ToPrimitive,
    B: Clone + Num + ToPrimitive,
{
    const OP: &str = "convolve2d_mixed";

    // Reject bad shapes before paying for the conversion
    config.validate()?;
    ConvGeometry::new(input.shape(), filter.shape(), config.stride, config.padding)?;

    let input = input.cast::<<A as Promote<B>>::Output>().invariant(OP)?;
    let filter = filter.cast::<<A as Promote<B>>::Output>().invariant(OP)?;
    convolve2d_with(&input, &filter, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvError;

    fn scenario() -> (DenseND<f64>, DenseND<f64>) {
        let input =
            DenseND::from_vec(vec![2.0, 3.0, 3.0, 4.0, 2.0, 1.0, 3.0, 2.0], &[2, 1, 2, 2]).unwrap();
        let filter = DenseND::from_vec(
            vec![
                2.0, 1.0, 1.0, 2.0, // k = 0
                1.0, 1.0, 2.0, 2.0, // k = 1
                3.0, 4.0, 3.0, 2.0, // k = 2
            ],
            &[3, 1, 2, 2],
        )
        .unwrap();
        (input, filter)
    }

    #[test]
    fn test_scenario_both_strategies() {
        let (input, filter) = scenario();
        // Hand-computed sums of products
        let expected = DenseND::from_vec(
            vec![
                18.0, 19.0, 35.0, // n = 0
                12.0, 13.0, 23.0, // n = 1
            ],
            &[2, 3, 1, 1],
        )
        .unwrap();

        for strategy in ConvStrategy::ALL {
            let config = Conv2dConfig::new(2, 0).with_strategy(strategy);
            let output = convolve2d_with(&input, &filter, &config).unwrap();
            assert_eq!(output.shape(), &[2, 3, 1, 1]);
            assert!(output.allclose(&expected, 0.0, 1e-12), "{}", strategy);
        }
    }

    #[test]
    fn test_default_arguments_match_config_default() {
        let (input, filter) = scenario();
        let a = convolve2d(&input, &filter, 1, 1).unwrap();
        let b = convolve2d_with(&input, &filter, &Conv2dConfig::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.shape(), &[2, 3, 3, 3]);
    }

    #[test]
    fn test_errors_surface_before_work() {
        let (input, filter) = scenario();
        assert_eq!(
            convolve2d(&input, &filter, 0, 0).unwrap_err(),
            ConvError::InvalidStride { stride: 0 }
        );
        // padded 4x4 with stride 3
        assert!(matches!(
            convolve2d(&input, &filter, 3, 1),
            Err(ConvError::StrideAlignment { .. })
        ));
        let flat = input.reshape(&[2, 4]).unwrap();
        assert!(matches!(
            convolve2d(&flat, &filter, 1, 1),
            Err(ConvError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_mixed_matches_promoted() {
        let input = DenseND::<f32>::from_shape_fn(&[1, 2, 4, 4], |idx| {
            0.25 * (idx[1] + idx[2] + idx[3]) as f32
        });
        let filter = DenseND::<f64>::from_shape_fn(&[2, 2, 3, 3], |idx| {
            0.1 * (idx[0] * 9 + idx[2] * 3 + idx[3]) as f64
        });
        let config = Conv2dConfig::default().with_strategy(ConvStrategy::Im2col);

        let mixed = convolve2d_mixed(&input, &filter, &config).unwrap();
        let widened: DenseND<f64> = input.cast().unwrap();
        let expected = convolve2d_with(&widened, &filter, &config).unwrap();
        assert_eq!(mixed, expected);
    }

    #[test]
    fn test_mixed_i32_with_f32_keeps_every_integer() {
        // 2^24 + 1 has no f32 representation
        let input = DenseND::<i32>::from_vec(vec![16_777_217], &[1, 1, 1, 1]).unwrap();
        let filter = DenseND::<f32>::ones(&[1, 1, 1, 1]);

        let output: DenseND<f64> =
            convolve2d_mixed(&input, &filter, &Conv2dConfig::new(1, 0)).unwrap();
        assert_eq!(output.to_vec(), vec![16_777_217.0]);
    }

    #[test]
    fn test_mixed_validates_before_cast() {
        let input = DenseND::<u8>::ones(&[1, 2, 4, 4]);
        let filter = DenseND::<f32>::ones(&[1, 3, 3, 3]);
        assert!(matches!(
            convolve2d_mixed(&input, &filter, &Conv2dConfig::default()),
            Err(ConvError::ShapeMismatch { .. })
        ));
    }
}

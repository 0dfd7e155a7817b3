//! # tenconv-kernels
//!
//! 2D convolution (cross-correlation) kernels over dense NCHW tensors.
//!
//! ## Overview
//!
//! A convolution call runs three stages:
//!
//! 1. **Validation** - [`ConvGeometry::new`] checks ranks, channel agreement
//!    and stride alignment, and derives every output dimension
//! 2. **Padding** - [`pad_input`] surrounds the spatial axes with zeros
//! 3. **Reduction** - one of two interchangeable strategies:
//!    - [`ConvStrategy::Direct`]: slide each kernel over the padded input and
//!      reduce every window ([`conv2d_direct`])
//!    - [`ConvStrategy::Im2col`]: lay all windows out as rows of a matrix and
//!      run one GEMM against the flattened filter ([`conv2d_im2col`])
//!
//! Both strategies accept and reject exactly the same inputs and agree up to
//! floating-point rounding.
//!
//! ## Quick Start
//!
//! ```rust
//! use tenconv_core::DenseND;
//! use tenconv_kernels::{convolve2d, convolve2d_with, Conv2dConfig, ConvStrategy};
//!
//! // Batch of 2 single-channel 2x2 images, three 2x2 kernels
//! let input = DenseND::<f64>::from_vec(
//!     vec![2.0, 3.0, 3.0, 4.0, 2.0, 1.0, 3.0, 2.0],
//!     &[2, 1, 2, 2],
//! ).unwrap();
//! let filter = DenseND::<f64>::ones(&[3, 1, 2, 2]);
//!
//! // stride = 1, padding = 1
//! let same = convolve2d(&input, &filter, 1, 1).unwrap();
//! assert_eq!(same.shape(), &[2, 3, 3, 3]);
//!
//! let config = Conv2dConfig::new(2, 0).with_strategy(ConvStrategy::Im2col);
//! let pooled = convolve2d_with(&input, &filter, &config).unwrap();
//! assert_eq!(pooled.shape(), &[2, 3, 1, 1]);
//! assert_eq!(pooled[&[0, 0, 0, 0]], 12.0);
//! assert_eq!(pooled[&[1, 2, 0, 0]], 8.0);
//! ```
//!
//! ## Errors
//!
//! All fallible operations return [`ConvResult`]. Caller mistakes surface as
//! [`ConvError::ShapeMismatch`], [`ConvError::StrideAlignment`] or
//! [`ConvError::InvalidStride`] before any output is computed.
//! [`ConvError::InternalInvariant`] is reserved for failures inside the
//! pipeline after validation passed.
//!
//! ## Logging
//!
//! Each call emits a `tracing` debug event with the strategy, shapes and
//! multiply-add count, and trace events per stage. Install any subscriber
//! (see `examples/conv2d_demo.rs`) to see them.
//!
//! ## Features
//!
//! - `serde` - `Serialize`/`Deserialize` for [`Conv2dConfig`] and [`ConvStrategy`]

pub mod config;
pub mod conv2d;
pub mod direct;
pub mod error;
pub mod geometry;
pub mod im2col;
pub mod padding;
pub mod promote;


// Re-exports
pub use config::{Conv2dConfig, ConvStrategy, ParseStrategyError};
pub use conv2d::*;
pub use direct::conv2d_direct;
pub use error::{ConvError, ConvResult, SpatialAxis};
pub use geometry::{conv_output_shape, ConvGeometry, CONV_RANK};
pub use im2col::{conv2d_im2col, flatten_filter, im2col};
pub use padding::pad_input;
pub use promote::Promote;

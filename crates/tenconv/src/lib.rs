//! # tenconv - 2D convolution over dense tensors
//!
//! This is the **meta crate** that re-exports the tenconv components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use tenconv::prelude::*;
//!
//! let input = DenseND::<f64>::ones(&[1, 3, 8, 8]);
//! let filter = DenseND::<f64>::ones(&[4, 3, 3, 3]);
//!
//! let output = convolve2d(&input, &filter, 1, 1)?;
//! assert_eq!(output.shape(), &[1, 4, 8, 8]);
//! assert_eq!(output[&[0, 0, 4, 4]], 27.0);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Dense Tensors ([`core`])
//!
//! N-dimensional dense tensor with reshape, permute, sub-region slicing and
//! assignment, broadcast multiply, axis reductions and matrix product.
//!
//! ```
//! use tenconv::core::DenseND;
//!
//! let tensor = DenseND::<f64>::ones(&[2, 3, 4]);
//! let reshaped = tensor.reshape(&[6, 4]).unwrap();
//! assert_eq!(reshaped.shape(), &[6, 4]);
//! ```
//!
//! ### Convolution Kernels ([`kernels`])
//!
//! Padding, shape validation, and the direct and im2col + GEMM strategies.
//!
//! ```
//! use tenconv::core::DenseND;
//! use tenconv::kernels::{convolve2d_with, Conv2dConfig, ConvStrategy};
//!
//! let input = DenseND::<f64>::ones(&[2, 1, 4, 4]);
//! let filter = DenseND::<f64>::ones(&[1, 1, 2, 2]);
//! let config = Conv2dConfig::new(2, 0).with_strategy(ConvStrategy::Im2col);
//!
//! let output = convolve2d_with(&input, &filter, &config).unwrap();
//! assert_eq!(output.shape(), &[2, 1, 2, 2]);
//! ```
//!
//! ## Features
//!
//! - `serde`: Serialize/deserialize `Conv2dConfig` and `ConvStrategy`

pub use tenconv_core as core;
pub use tenconv_kernels as kernels;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use tenconv::prelude::*;
    //!
    //! let config = Conv2dConfig::default();
    //! assert_eq!(config.strategy, ConvStrategy::Direct);
    //! ```

    // Core types
    pub use crate::core::DenseND;

    // Convolution
    pub use crate::kernels::{
        convolve2d, convolve2d_mixed, convolve2d_with, Conv2dConfig, ConvError, ConvGeometry,
        ConvResult, ConvStrategy,
    };
}

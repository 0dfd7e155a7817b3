//! # tenconv-core
//!
//! Dense tensor container for the tenconv convolution stack.
//!
//! [`DenseND`] wraps a dynamic-rank `scirs2_core` ndarray and exposes the
//! small set of operations the convolution engine is written against:
//!
//! - **Allocation**: zeros / ones / filled / from a row-major `Vec`
//! - **Rectangular regions**: [`DenseND::slice_ranges`] and [`DenseND::assign_ranges`]
//! - **Arithmetic**: element-wise multiply, multi-axis sum, 2D `matmul`
//! - **Layout**: layout-preserving `reshape`, layout-changing `permute` + `to_contiguous`
//! - **Conversion and comparison**: `cast`, `max_abs_diff`, `allclose`
//!
//! ## SciRS2 Integration
//!
//! All array and numeric-trait access goes through `scirs2-core`
//! (`ndarray_ext`, `numeric`). Direct use of `ndarray` or `num-traits` is not
//! permitted.
//!
//! ## Memory Layout
//!
//! Tensors are created C-contiguous (row-major). Only `permute` produces a
//! strided tensor.
//!
//! ## Quick Start
//!
//! ```
//! use tenconv_core::DenseND;
//!
//! // An (N, C, H, W) = (1, 1, 2, 3) image
//! let image = DenseND::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[1, 1, 2, 3]).unwrap();
//!
//! // Read a 2x2 window
//! let window = image.slice_ranges(&[0..1, 0..1, 0..2, 1..3]).unwrap();
//! assert_eq!(window.to_vec(), vec![2.0, 3.0, 5.0, 6.0]);
//!
//! // Flatten it into a row
//! let row = window.reshape(&[1, 4]).unwrap();
//! assert_eq!(row.shape(), &[1, 4]);
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return `anyhow::Result`:
//!
//! ```
//! use tenconv_core::DenseND;
//!
//! let tensor = DenseND::<f64>::zeros(&[2, 3]);
//! assert!(tensor.reshape(&[7]).is_err());
//! assert!(tensor.matmul(&tensor).is_err());
//! ```

pub mod dense;


pub use dense::DenseND;

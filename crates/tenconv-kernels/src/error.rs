//! Error types for convolution operations
//!
//! Every failure is fatal to the convolution call that raised it; no partial
//! output is ever returned. Validation errors (`ShapeMismatch`,
//! `StrideAlignment`, `InvalidStride`) are raised before any computation and
//! must be fixed by the caller. `InternalInvariant` signals a defect in the
//! engine: it is only produced when the tensor container rejects an operation
//! after validation has already passed.
//!
//! # Examples
//!
//! ```
//! use tenconv_kernels::{ConvError, ConvGeometry};
//!
//! let err = ConvGeometry::new(&[1, 3, 8, 8], &[4, 2, 3, 3], 1, 1).unwrap_err();
//! assert!(matches!(err, ConvError::ShapeMismatch { .. }));
//! assert!(err.is_validation());
//! ```

use std::fmt;
use thiserror::Error;

/// Spatial axis named in stride alignment errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialAxis {
    /// Height (axis 2 of an NCHW tensor)
    Height,
    /// Width (axis 3 of an NCHW tensor)
    Width,
}

impl fmt::Display for SpatialAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpatialAxis::Height => write!(f, "height"),
            SpatialAxis::Width => write!(f, "width"),
        }
    }
}

/// Error type for convolution operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvError {
    /// Rank or channel disagreement between input and filter
    #[error("{operation}: shape mismatch - {reason}")]
    ShapeMismatch {
        operation: &'static str,
        reason: String,
    },

    /// Padded spatial extent not divisible by the stride
    #[error("padded {axis} {extent} is not divisible by stride {stride}")]
    StrideAlignment {
        axis: SpatialAxis,
        extent: usize,
        stride: usize,
    },

    /// Stride of zero
    #[error("invalid stride {stride}: stride must be a positive integer")]
    InvalidStride { stride: usize },

    /// The engine reached a state validation should have ruled out
    #[error("{operation}: internal invariant violated - {message}")]
    InternalInvariant {
        operation: &'static str,
        message: String,
    },
}

/// Result type for convolution operations
pub type ConvResult<T> = Result<T, ConvError>;

impl ConvError {
    /// Create a shape mismatch error
    pub fn shape_mismatch(operation: &'static str, reason: impl Into<String>) -> Self {
        ConvError::ShapeMismatch {
            operation,
            reason: reason.into(),
        }
    }

    /// Create an internal invariant violation
    pub fn internal(operation: &'static str, message: impl Into<String>) -> Self {
        ConvError::InternalInvariant {
            operation,
            message: message.into(),
        }
    }

    /// True for errors the caller can fix by changing shapes, stride or padding
    pub fn is_validation(&self) -> bool {
        !matches!(self, ConvError::InternalInvariant { .. })
    }
}

/// Map container errors raised after validation to [`ConvError::InternalInvariant`]
pub(crate) trait InvariantExt<T> {
    fn invariant(self, operation: &'static str) -> ConvResult<T>;
}

impl<T> InvariantExt<T> for anyhow::Result<T> {
    fn invariant(self, operation: &'static str) -> ConvResult<T> {
        self.map_err(|e| ConvError::internal(operation, format!("{:#}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ConvError::shape_mismatch("conv2d", "input rank 3 != 4");
        assert_eq!(
            err.to_string(),
            "conv2d: shape mismatch - input rank 3 != 4"
        );

        let err = ConvError::StrideAlignment {
            axis: SpatialAxis::Width,
            extent: 7,
            stride: 2,
        };
        assert_eq!(
            err.to_string(),
            "padded width 7 is not divisible by stride 2"
        );

        let err = ConvError::InvalidStride { stride: 0 };
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_validation_classification() {
        assert!(ConvError::InvalidStride { stride: 0 }.is_validation());
        assert!(!ConvError::internal("im2col", "matmul failed").is_validation());
    }

    #[test]
    fn test_invariant_ext_maps_anyhow() {
        let failed: anyhow::Result<()> = Err(anyhow::anyhow!("boom"));
        let err = failed.invariant("conv2d_direct").unwrap_err();
        assert_eq!(
            err,
            ConvError::InternalInvariant {
                operation: "conv2d_direct",
                message: "boom".to_string(),
            }
        );
    }
}

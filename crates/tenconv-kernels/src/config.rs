//! Convolution parameters and strategy selection

use crate::error::{ConvError, ConvResult};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which algorithm computes the convolution
///
/// Both strategies produce the same output up to floating-point rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConvStrategy {
    /// Slide the filter over the padded input and reduce each window (reference)
    #[default]
    Direct,
    /// Restructure windows into a matrix and run a single GEMM
    Im2col,
}

impl ConvStrategy {
    /// All strategies, in declaration order
    pub const ALL: [ConvStrategy; 2] = [ConvStrategy::Direct, ConvStrategy::Im2col];

    /// Lowercase name, as accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            ConvStrategy::Direct => "direct",
            ConvStrategy::Im2col => "im2col",
        }
    }
}

impl fmt::Display for ConvStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised strategy name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown convolution strategy '{0}' (expected 'direct' or 'im2col')")]
pub struct ParseStrategyError(pub String);

impl FromStr for ConvStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" | "naive" => Ok(ConvStrategy::Direct),
            "im2col" | "gemm" => Ok(ConvStrategy::Im2col),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Parameters of a 2D convolution call
///
/// # Examples
///
/// ```
/// use tenconv_kernels::{Conv2dConfig, ConvStrategy};
///
/// let config = Conv2dConfig::default();
/// assert_eq!((config.stride, config.padding), (1, 1));
///
/// let config = Conv2dConfig::new(2, 0).with_strategy(ConvStrategy::Im2col);
/// assert_eq!(config.strategy, ConvStrategy::Im2col);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Conv2dConfig {
    /// Step between window origins on both spatial axes; must be positive
    pub stride: usize,
    /// Zero pixels added on each spatial border
    pub padding: usize,
    /// Algorithm used to compute the output
    pub strategy: ConvStrategy,
}

impl Default for Conv2dConfig {
    fn default() -> Self {
        Self {
            stride: 1,
            padding: 1,
            strategy: ConvStrategy::Direct,
        }
    }
}

impl Conv2dConfig {
    /// Config with the given stride and padding and the default strategy
    pub fn new(stride: usize, padding: usize) -> Self {
        Self {
            stride,
            padding,
            ..Self::default()
        }
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_strategy(mut self, strategy: ConvStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Reject parameters that are invalid regardless of tensor shapes
    pub fn validate(&self) -> ConvResult<()> {
        if self.stride == 0 {
            return Err(ConvError::InvalidStride {
                stride: self.stride,
            });
        }
        Ok(())
    }
}

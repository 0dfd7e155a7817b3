//! Example running a small convolution through both strategies
//!
//! Run with: cargo run --example conv2d_demo -p tenconv-kernels [direct|im2col]
//!
//! Set `RUST_LOG=tenconv_kernels=trace` to see every pipeline stage.

use tenconv_core::DenseND;
use tenconv_kernels::{convolve2d_with, Conv2dConfig, ConvGeometry, ConvStrategy};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("tenconv_kernels=debug"))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let strategies = match std::env::args().nth(1) {
        Some(name) => vec![name.parse::<ConvStrategy>()?],
        None => ConvStrategy::ALL.to_vec(),
    };

    println!("=== 2D Convolution Example ===\n");

    // Two single-channel 2x2 images, three 2x2 kernels
    let input = DenseND::<f64>::from_vec(
        vec![2.0, 3.0, 3.0, 4.0, 2.0, 1.0, 3.0, 2.0],
        &[2, 1, 2, 2],
    )?;
    let kernels = DenseND::<f64>::from_vec(
        vec![
            2.0, 1.0, 1.0, 2.0, //
            1.0, 1.0, 2.0, 2.0, //
            3.0, 4.0, 3.0, 2.0,
        ],
        &[3, 1, 2, 2],
    )?;

    println!("Input {:?}:\n{}\n", input.shape(), input);
    println!("Filter {:?}:\n{}\n", kernels.shape(), kernels);

    for (stride, padding) in [(2, 0), (1, 1)] {
        let geometry = ConvGeometry::new(input.shape(), kernels.shape(), stride, padding)?;
        println!(
            "stride={} padding={} -> output {:?}, {} multiply-adds",
            stride,
            padding,
            geometry.output_shape(),
            geometry.macs()
        );

        for &strategy in &strategies {
            let config = Conv2dConfig::new(stride, padding).with_strategy(strategy);
            let output = convolve2d_with(&input, &kernels, &config)?;
            println!("[{}]\n{}\n", strategy, output);
        }
    }

    // A misaligned stride is reported, not computed
    match convolve2d_with(&input, &kernels, &Conv2dConfig::new(3, 1)) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("stride=3 padding=1 rejected: {}", e),
    }

    Ok(())
}

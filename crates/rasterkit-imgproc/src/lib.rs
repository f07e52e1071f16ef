#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// frame cropping transform.
pub mod crop;

/// convolution kernels and kernel-backed transforms.
pub mod filter;

/// module containing parallelization utilities.
pub mod parallel;

/// two-phase frame transform pipeline.
pub mod processor;

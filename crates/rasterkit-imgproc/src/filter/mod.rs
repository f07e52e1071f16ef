//! Filter operations
//!
//! This module provides convolution kernels and kernel-backed frame
//! transforms.

/// Dense kernel matrix
mod kernel;
pub use kernel::*;

/// Filter kernels
pub mod kernels;

/// Convolution engine
mod convolution;
pub use convolution::*;

/// Filter transforms
mod ops;
pub use ops::*;

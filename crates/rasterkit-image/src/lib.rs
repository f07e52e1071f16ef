#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// rectangular pixel buffer representation.
pub mod buffer;

/// 4-component float colour and premultiplied-alpha ops.
pub mod color;

/// Error types for the image module.
pub mod error;

/// frame and per-frame metadata types.
pub mod frame;

/// pixel sample trait and concrete encodings.
pub mod pixel;

/// rectangular working areas.
pub mod rect;

pub use crate::buffer::{ImageSize, PixelBuffer};
pub use crate::color::Color;
pub use crate::error::ImageError;
pub use crate::frame::{Frame, FrameMeta};
pub use crate::pixel::{Pixel, Rgba8, Rgbaf32};
pub use crate::rect::Rect;

use std::ops;

use crate::buffer::PixelBuffer;
use crate::pixel::Pixel;

/// Per-frame metadata, deep-cloned when a transform allocates its
/// destination frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameMeta {
    /// Display delay of the frame in milliseconds, for animated sources.
    pub delay_ms: u32,
}

/// A pixel buffer together with its per-frame metadata.
///
/// Frames are the unit the two-phase transform pipeline allocates and
/// fills: one source frame in, one destination frame out.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<P: Pixel> {
    /// The pixel store of the frame.
    pub buffer: PixelBuffer<P>,
    /// Cloneable per-frame metadata.
    pub meta: FrameMeta,
}

impl<P: Pixel> Frame<P> {
    /// Create a new frame with default metadata.
    pub fn new(buffer: PixelBuffer<P>) -> Self {
        Self {
            buffer,
            meta: FrameMeta::default(),
        }
    }

    /// Create a new frame with explicit metadata.
    pub fn with_meta(buffer: PixelBuffer<P>, meta: FrameMeta) -> Self {
        Self { buffer, meta }
    }
}

/// helper to dereference the inner buffer
impl<P: Pixel> ops::Deref for Frame<P> {
    type Target = PixelBuffer<P>;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

/// helper to dereference the inner buffer
impl<P: Pixel> ops::DerefMut for Frame<P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

use crate::color::Color;

/// A pixel sample convertible to and from a 4-component float colour.
///
/// The convolution engine and the frame transforms are generic over this
/// capability and never depend on a concrete pixel encoding: everything
/// flows through [`Color`]. Conversions must be lossless for in-range
/// colours to single precision fidelity for the round trip
/// sample -> colour -> sample.
pub trait Pixel: Copy + Default + Send + Sync {
    /// Convert the sample to a float colour.
    fn to_color(&self) -> Color;

    /// Convert a float colour back into a sample.
    fn from_color(color: Color) -> Self;
}

/// An RGBA pixel sample with 8 bits per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Create a new sample from its channels.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

fn to_u8(x: f32) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

impl Pixel for Rgba8 {
    fn to_color(&self) -> Color {
        Color::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }

    fn from_color(color: Color) -> Self {
        Self {
            r: to_u8(color.r),
            g: to_u8(color.g),
            b: to_u8(color.b),
            a: to_u8(color.a),
        }
    }
}

/// An RGBA pixel sample with 32-bit float channels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgbaf32 {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Rgbaf32 {
    /// Create a new sample from its channels.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Pixel for Rgbaf32 {
    fn to_color(&self) -> Color {
        Color::new(self.r, self.g, self.b, self.a)
    }

    fn from_color(color: Color) -> Self {
        Self {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

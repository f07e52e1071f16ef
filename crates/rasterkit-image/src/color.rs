use std::ops;

/// A 4-component floating point colour sample.
///
/// Components are nominally in `[0.0, 1.0]`, though convolution may move
/// them transiently out of that range before the result is written back.
///
/// # Examples
///
/// ```
/// use rasterkit_image::Color;
///
/// let mut color = Color::new(0.5, 0.25, 1.0, 0.5);
/// color.premultiply();
///
/// assert_eq!(color, Color::new(0.25, 0.125, 0.5, 0.5));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha (opacity) component.
    pub a: f32,
}

impl Color {
    /// Create a new colour from its components.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Scale the colour channels by the alpha channel, in place.
    ///
    /// Premultiplied colours blend and filter linearly without separate
    /// alpha weighting.
    pub fn premultiply(&mut self) {
        self.r *= self.a;
        self.g *= self.a;
        self.b *= self.a;
    }

    /// Reverse a premultiplication, in place.
    ///
    /// When alpha is zero the colour channels are left unchanged (the
    /// divisor is defined as 1.0), so fully transparent samples round-trip
    /// losslessly. For any alpha greater than zero this is the exact
    /// inverse of [`Color::premultiply`] up to floating point rounding.
    pub fn unpremultiply(&mut self) {
        if self.a != 0.0 {
            self.r /= self.a;
            self.g /= self.a;
            self.b /= self.a;
        }
    }
}

impl ops::Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

impl ops::AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
        self.a += rhs.a;
    }
}

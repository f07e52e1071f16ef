use crate::error::ImageError;
use crate::pixel::Pixel;

/// Buffer size in pixels.
///
/// # Examples
///
/// ```
/// use rasterkit_image::ImageSize;
///
/// let size = ImageSize {
///     width: 10,
///     height: 20,
/// };
///
/// assert_eq!(size.width, 10);
/// assert_eq!(size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the buffer in pixels.
    pub width: usize,
    /// Height of the buffer in pixels.
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A rectangular, row-addressable store of pixel samples.
///
/// The buffer owns a contiguous row-major `Vec` of samples and keeps its
/// width and height fixed for its lifetime. Rows are accessed by index
/// through [`PixelBuffer::row`] and [`PixelBuffer::row_mut`], which fail
/// with [`ImageError::RowOutOfBounds`] for indices outside `[0, height)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer<P: Pixel> {
    size: ImageSize,
    data: Vec<P>,
}

impl<P: Pixel> PixelBuffer<P> {
    /// Create a new buffer from its size and row-major pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidDataLength`] if the data length does
    /// not equal `width * height`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rasterkit_image::{ImageSize, PixelBuffer, Rgba8};
    ///
    /// let buffer = PixelBuffer::new(
    ///     ImageSize { width: 2, height: 2 },
    ///     vec![Rgba8::default(); 4],
    /// ).unwrap();
    ///
    /// assert_eq!(buffer.width(), 2);
    /// assert_eq!(buffer.height(), 2);
    /// ```
    pub fn new(size: ImageSize, data: Vec<P>) -> Result<Self, ImageError> {
        if data.len() != size.width * size.height {
            return Err(ImageError::InvalidDataLength(
                data.len(),
                size.width * size.height,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new buffer filled with a single sample value.
    pub fn from_size_val(size: ImageSize, val: P) -> Result<Self, ImageError> {
        Self::new(size, vec![val; size.width * size.height])
    }

    /// The size of the buffer in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Width of the buffer in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Height of the buffer in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Number of pixel rows, an alias for the height.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Number of pixel columns, an alias for the width.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// A view of the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::RowOutOfBounds`] if `index >= height`.
    pub fn row(&self, index: usize) -> Result<&[P], ImageError> {
        if index >= self.size.height {
            return Err(ImageError::RowOutOfBounds(index, self.size.height));
        }

        let offset = index * self.size.width;
        Ok(&self.data[offset..offset + self.size.width])
    }

    /// A mutable view of the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::RowOutOfBounds`] if `index >= height`.
    pub fn row_mut(&mut self, index: usize) -> Result<&mut [P], ImageError> {
        if index >= self.size.height {
            return Err(ImageError::RowOutOfBounds(index, self.size.height));
        }

        let offset = index * self.size.width;
        Ok(&mut self.data[offset..offset + self.size.width])
    }

    /// The whole pixel store as a row-major slice.
    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    /// The whole pixel store as a mutable row-major slice.
    pub fn as_slice_mut(&mut self) -> &mut [P] {
        &mut self.data
    }
}

use rasterkit_image::ImageError;

/// An immutable dense grid of convolution weights.
///
/// Rows and columns are fixed at construction and typically odd, so the
/// kernel has a centre element and a symmetric radius on each axis. A
/// kernel is built once per convolution configuration and reused across
/// every output sample of a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct KernelMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl KernelMatrix {
    /// Create a new kernel from its dimensions and row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidKernelShape`] if either dimension is
    /// zero, and [`ImageError::InvalidKernelLength`] if the weight count
    /// does not equal `rows * cols`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rasterkit_imgproc::filter::KernelMatrix;
    ///
    /// let kernel = KernelMatrix::new(3, 3, vec![1.0 / 9.0; 9]).unwrap();
    ///
    /// assert_eq!(kernel.rows(), 3);
    /// assert_eq!(kernel.radius_x(), 1);
    /// ```
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self, ImageError> {
        if rows == 0 || cols == 0 {
            return Err(ImageError::InvalidKernelShape(rows, cols));
        }
        if data.len() != rows * cols {
            return Err(ImageError::InvalidKernelLength(data.len(), rows * cols));
        }

        Ok(Self { rows, cols, data })
    }

    /// Create a horizontal `1 x N` kernel from a weight vector.
    pub fn row_vector(weights: &[f32]) -> Result<Self, ImageError> {
        Self::new(1, weights.len(), weights.to_vec())
    }

    /// Create a vertical `N x 1` kernel from a weight vector.
    pub fn column_vector(weights: &[f32]) -> Result<Self, ImageError> {
        Self::new(weights.len(), 1, weights.to_vec())
    }

    /// Number of weight rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of weight columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Vertical radius of the kernel.
    pub fn radius_y(&self) -> usize {
        self.rows >> 1
    }

    /// Horizontal radius of the kernel.
    pub fn radius_x(&self) -> usize {
        self.cols >> 1
    }

    /// The weight at (`row`, `col`).
    ///
    /// Indices must lie inside the kernel's dimensions; the convolution
    /// engine derives its indices from the kernel's own shape and never
    /// exceeds them.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dims() {
        assert_eq!(
            KernelMatrix::new(0, 3, vec![]).unwrap_err(),
            ImageError::InvalidKernelShape(0, 3)
        );
        assert_eq!(
            KernelMatrix::new(3, 0, vec![]).unwrap_err(),
            ImageError::InvalidKernelShape(3, 0)
        );
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert_eq!(
            KernelMatrix::new(2, 2, vec![1.0; 3]).unwrap_err(),
            ImageError::InvalidKernelLength(3, 4)
        );
    }

    #[test]
    fn test_get_and_radius() -> Result<(), ImageError> {
        let kernel = KernelMatrix::new(3, 5, (0..15).map(|x| x as f32).collect())?;

        assert_eq!(kernel.get(0, 0), 0.0);
        assert_eq!(kernel.get(1, 2), 7.0);
        assert_eq!(kernel.get(2, 4), 14.0);
        assert_eq!(kernel.radius_y(), 1);
        assert_eq!(kernel.radius_x(), 2);
        Ok(())
    }

    #[test]
    fn test_vectors() -> Result<(), ImageError> {
        let row = KernelMatrix::row_vector(&[1.0, 2.0, 1.0])?;
        assert_eq!((row.rows(), row.cols()), (1, 3));

        let col = KernelMatrix::column_vector(&[1.0, 2.0, 1.0])?;
        assert_eq!((col.rows(), col.cols()), (3, 1));
        assert_eq!(col.get(1, 0), 2.0);
        Ok(())
    }
}

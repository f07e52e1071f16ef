/// An error type for buffer, kernel, and transform operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the pixel data length does not match the buffer size.
    #[error("Data length ({0}) does not match the buffer size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when a row index is outside the buffer's height.
    #[error("Row index {0} is out of range for a buffer of height {1}")]
    RowOutOfBounds(usize, usize),

    /// Error when source and destination sizes do not match.
    #[error("Source size ({0}x{1}) does not match destination size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when kernel dimensions are not positive.
    #[error("Invalid kernel shape: {0}x{1}")]
    InvalidKernelShape(usize, usize),

    /// Error when the kernel weight count does not match its dimensions.
    #[error("Kernel weight count ({0}) does not match its shape ({1})")]
    InvalidKernelLength(usize, usize),

    /// Error when paired kernels do not share the same dimensions.
    #[error("Kernel pair dimensions differ: {0}x{1} vs {2}x{3}")]
    KernelPairMismatch(usize, usize, usize, usize),

    /// Error when a working rectangle is empty or not contained in the frame.
    #[error(
        "Rectangle ({left}, {top}, {width}x{height}) is not contained in a {frame_width}x{frame_height} frame"
    )]
    InvalidRect {
        /// Left edge of the rejected rectangle.
        left: usize,
        /// Top edge of the rejected rectangle.
        top: usize,
        /// Width of the rejected rectangle.
        width: usize,
        /// Height of the rejected rectangle.
        height: usize,
        /// Width of the frame it was checked against.
        frame_width: usize,
        /// Height of the frame it was checked against.
        frame_height: usize,
    },
}

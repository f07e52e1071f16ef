use rasterkit_image::{Frame, ImageError, Pixel, PixelBuffer, Rect};

use super::convolution::{compute_sample, compute_sample_xy, ConvolutionPass};
use super::kernel::KernelMatrix;
use super::kernels;
use crate::parallel::{for_each_row_chunk, ParallelSettings};
use crate::processor::{run_transform, FrameTransform};

fn check_same_size<P: Pixel>(src: &Frame<P>, dst: &Frame<P>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}

/// Convolve a frame with a single dense kernel.
///
/// The destination keeps the source shape and starts as a clone of the
/// source, so the alpha each output sample preserves is the source alpha.
#[derive(Clone, Debug)]
pub struct ConvolutionTransform {
    kernel: KernelMatrix,
    settings: ParallelSettings,
}

impl ConvolutionTransform {
    /// Create a transform applying `kernel` to every output sample.
    pub fn new(kernel: KernelMatrix) -> Self {
        Self {
            kernel,
            settings: ParallelSettings::default(),
        }
    }

    /// Replace the parallel execution settings.
    pub fn with_settings(mut self, settings: ParallelSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl<P: Pixel> FrameTransform<P> for ConvolutionTransform {
    fn create_destination(&self, src: &Frame<P>) -> Result<Frame<P>, ImageError> {
        Ok(src.clone())
    }

    fn apply(&self, src: &Frame<P>, dst: &mut Frame<P>) -> Result<(), ImageError> {
        check_same_size(src, dst)?;
        if src.size().width == 0 || src.size().height == 0 {
            return Ok(());
        }

        let cols = src.cols();
        let max_row = src.rows() - 1;
        let max_col = cols - 1;
        let kernel = &self.kernel;
        let src_buf = &src.buffer;

        for_each_row_chunk(
            dst.buffer.as_slice_mut(),
            cols,
            Rect::full(src.size()),
            &self.settings,
            |chunk, slab| {
                for (i, dst_row) in slab.chunks_exact_mut(cols).enumerate() {
                    let row = chunk.start + i;
                    for col in 0..cols {
                        compute_sample(
                            kernel,
                            src_buf,
                            dst_row,
                            row,
                            col,
                            max_row,
                            max_col,
                            0,
                            ConvolutionPass::Single,
                        );
                    }
                }
            },
        );

        Ok(())
    }
}

/// Convolve a frame with a paired-kernel gradient operator, writing the
/// per-channel gradient magnitude.
#[derive(Clone, Debug)]
pub struct EdgeDetectTransform {
    kernel_x: KernelMatrix,
    kernel_y: KernelMatrix,
    settings: ParallelSettings,
}

impl EdgeDetectTransform {
    /// Create a transform from two oriented kernels.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::KernelPairMismatch`] if the kernels do not
    /// share the same dimensions.
    pub fn new(kernel_x: KernelMatrix, kernel_y: KernelMatrix) -> Result<Self, ImageError> {
        if kernel_x.rows() != kernel_y.rows() || kernel_x.cols() != kernel_y.cols() {
            return Err(ImageError::KernelPairMismatch(
                kernel_x.rows(),
                kernel_x.cols(),
                kernel_y.rows(),
                kernel_y.cols(),
            ));
        }

        Ok(Self {
            kernel_x,
            kernel_y,
            settings: ParallelSettings::default(),
        })
    }

    /// Replace the parallel execution settings.
    pub fn with_settings(mut self, settings: ParallelSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl<P: Pixel> FrameTransform<P> for EdgeDetectTransform {
    fn create_destination(&self, src: &Frame<P>) -> Result<Frame<P>, ImageError> {
        Ok(src.clone())
    }

    fn apply(&self, src: &Frame<P>, dst: &mut Frame<P>) -> Result<(), ImageError> {
        check_same_size(src, dst)?;
        if src.size().width == 0 || src.size().height == 0 {
            return Ok(());
        }

        let cols = src.cols();
        let max_row = src.rows() - 1;
        let max_col = cols - 1;
        let kernel_x = &self.kernel_x;
        let kernel_y = &self.kernel_y;
        let src_buf = &src.buffer;

        for_each_row_chunk(
            dst.buffer.as_slice_mut(),
            cols,
            Rect::full(src.size()),
            &self.settings,
            |chunk, slab| {
                for (i, dst_row) in slab.chunks_exact_mut(cols).enumerate() {
                    let row = chunk.start + i;
                    for col in 0..cols {
                        compute_sample_xy(
                            kernel_x, kernel_y, src_buf, dst_row, row, col, max_row, max_col, 0,
                        );
                    }
                }
            },
        );

        Ok(())
    }
}

/// Convolve a frame with a separable kernel as two stages: a horizontal
/// `First` pass into an intermediate frame, then a vertical `Second` pass
/// into the destination.
///
/// The intermediate holds the first stage's premultiplied output and the
/// second stage consumes it verbatim.
#[derive(Clone, Debug)]
pub struct SeparableTransform {
    kernel_x: KernelMatrix,
    kernel_y: KernelMatrix,
    settings: ParallelSettings,
}

impl SeparableTransform {
    /// Build from 1-D horizontal and vertical weight vectors.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidKernelShape`] if either vector is
    /// empty.
    pub fn new(kernel_x: &[f32], kernel_y: &[f32]) -> Result<Self, ImageError> {
        Ok(Self {
            kernel_x: KernelMatrix::row_vector(kernel_x)?,
            kernel_y: KernelMatrix::column_vector(kernel_y)?,
            settings: ParallelSettings::default(),
        })
    }

    /// Replace the parallel execution settings.
    pub fn with_settings(mut self, settings: ParallelSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl<P: Pixel> FrameTransform<P> for SeparableTransform {
    fn create_destination(&self, src: &Frame<P>) -> Result<Frame<P>, ImageError> {
        Ok(src.clone())
    }

    fn apply(&self, src: &Frame<P>, dst: &mut Frame<P>) -> Result<(), ImageError> {
        check_same_size(src, dst)?;
        if src.size().width == 0 || src.size().height == 0 {
            return Ok(());
        }

        let cols = src.cols();
        let max_row = src.rows() - 1;
        let max_col = cols - 1;
        let work = Rect::full(src.size());

        let mut mid = PixelBuffer::from_size_val(src.size(), P::default())?;

        // horizontal stage, output left premultiplied for the next stage
        {
            let kernel_x = &self.kernel_x;
            let src_buf = &src.buffer;
            for_each_row_chunk(
                mid.as_slice_mut(),
                cols,
                work,
                &self.settings,
                |chunk, slab| {
                    for (i, dst_row) in slab.chunks_exact_mut(cols).enumerate() {
                        let row = chunk.start + i;
                        for col in 0..cols {
                            compute_sample(
                                kernel_x,
                                src_buf,
                                dst_row,
                                row,
                                col,
                                max_row,
                                max_col,
                                0,
                                ConvolutionPass::First,
                            );
                        }
                    }
                },
            );
        }

        // vertical stage consumes the premultiplied intermediate
        let kernel_y = &self.kernel_y;
        let mid_ref = &mid;
        for_each_row_chunk(
            dst.buffer.as_slice_mut(),
            cols,
            work,
            &self.settings,
            |chunk, slab| {
                for (i, dst_row) in slab.chunks_exact_mut(cols).enumerate() {
                    let row = chunk.start + i;
                    for col in 0..cols {
                        compute_sample(
                            kernel_y,
                            mid_ref,
                            dst_row,
                            row,
                            col,
                            max_row,
                            max_col,
                            0,
                            ConvolutionPass::Second,
                        );
                    }
                }
            },
        );

        Ok(())
    }
}

/// Convolve a frame with a dense kernel.
pub fn convolve<P: Pixel>(src: &Frame<P>, kernel: KernelMatrix) -> Result<Frame<P>, ImageError> {
    run_transform(&ConvolutionTransform::new(kernel), src)
}

/// Blur a frame with a normalized gaussian kernel, run as two separable
/// stages.
///
/// # Arguments
///
/// * `src` - The source frame.
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
pub fn gaussian_blur<P: Pixel>(
    src: &Frame<P>,
    kernel_size: usize,
    sigma: f32,
) -> Result<Frame<P>, ImageError> {
    let kernel = kernels::gaussian_kernel_1d(kernel_size, sigma);
    run_transform(&SeparableTransform::new(&kernel, &kernel)?, src)
}

/// Blur a frame with a box kernel, run as two separable stages.
///
/// # Arguments
///
/// * `src` - The source frame.
/// * `kernel_size` - The size of the kernel.
pub fn box_blur<P: Pixel>(src: &Frame<P>, kernel_size: usize) -> Result<Frame<P>, ImageError> {
    let kernel = kernels::box_blur_kernel_1d(kernel_size);
    run_transform(&SeparableTransform::new(&kernel, &kernel)?, src)
}

/// Detect edges with the paired 3x3 sobel kernels, writing the gradient
/// magnitude per channel.
pub fn sobel<P: Pixel>(src: &Frame<P>) -> Result<Frame<P>, ImageError> {
    let (kernel_x, kernel_y) = kernels::sobel_kernels_3x3()?;
    run_transform(&EdgeDetectTransform::new(kernel_x, kernel_y)?, src)
}

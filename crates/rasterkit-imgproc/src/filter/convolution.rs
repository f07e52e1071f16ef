use rasterkit_image::{Color, Pixel, PixelBuffer};

use super::kernel::KernelMatrix;

/// How premultiplied-alpha handling is applied across a convolution pass.
///
/// Separable convolutions run as two stages; the tag keeps the three
/// premultiply/unpremultiply policies explicit in one parameterized
/// algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvolutionPass {
    /// A self-contained pass: samples are premultiplied going in and the
    /// accumulated colour is unpremultiplied before it is written.
    Single,

    /// The first stage of a two-stage pipeline: samples are premultiplied
    /// and the accumulated colour is written as-is, still premultiplied,
    /// for the second stage to consume.
    First,

    /// The second stage: samples are already-premultiplied first-stage
    /// output and are accumulated verbatim; the result is unpremultiplied
    /// before it is written.
    Second,
}

/// Unpremultiply by the accumulated alpha, then carry the alpha already
/// present at the destination slot. Convolution never alters alpha.
fn finish_sample(mut sum: Color, dst_alpha: f32) -> Color {
    sum.unpremultiply();
    sum.a = dst_alpha;
    sum
}

/// Compute one convolved output sample.
///
/// Samples the source around (`target_row`, `target_col + col_offset`)
/// with clamp-to-edge boundary handling (the nearest valid row and column
/// are replicated rather than wrapped or zero-padded), accumulates the
/// kernel-weighted colour sum, and writes the finished sample into
/// `dst_row[target_col]`.
///
/// `target_col` is relative to the working area whose left edge in source
/// coordinates is `col_offset`; `max_row` and `max_col` are the inclusive
/// sampling bounds. All index arithmetic is clamp-protected, so the call
/// cannot fail for well-formed inputs.
///
/// For `Single` and `Second` passes the alpha already present in the
/// destination slot is preserved; a `First` pass writes its premultiplied
/// accumulation unprocessed.
#[allow(clippy::too_many_arguments)]
pub fn compute_sample<P: Pixel>(
    kernel: &KernelMatrix,
    src: &PixelBuffer<P>,
    dst_row: &mut [P],
    target_row: usize,
    target_col: usize,
    max_row: usize,
    max_col: usize,
    col_offset: usize,
    pass: ConvolutionPass,
) {
    let radius_y = kernel.radius_y();
    let radius_x = kernel.radius_x();
    let src_cols = src.cols();
    let src_data = src.as_slice();

    let mut sum = Color::default();
    for y in 0..kernel.rows() {
        let sample_row = (target_row + y).clamp(radius_y, max_row + radius_y) - radius_y;
        let row_data = &src_data[sample_row * src_cols..(sample_row + 1) * src_cols];

        for x in 0..kernel.cols() {
            let sample_col = (target_col + col_offset + x)
                .clamp(col_offset + radius_x, max_col + radius_x)
                - radius_x;

            let mut color = row_data[sample_col].to_color();
            if pass != ConvolutionPass::Second {
                color.premultiply();
            }
            sum += color * kernel.get(y, x);
        }
    }

    dst_row[target_col] = match pass {
        ConvolutionPass::First => P::from_color(sum),
        ConvolutionPass::Single | ConvolutionPass::Second => {
            let dst_alpha = dst_row[target_col].to_color().a;
            P::from_color(finish_sample(sum, dst_alpha))
        }
    };
}

/// Compute one output sample of a paired-kernel gradient operator.
///
/// Runs the sampling loop of [`compute_sample`] once, accumulating two
/// weighted sums from the same fetched and premultiplied samples
/// (premultiplication is destructive, so each sample feeds both
/// accumulators rather than being fetched twice), then combines them
/// per channel as `sqrt(x^2 + y^2)`. The alpha already present in the
/// destination slot is preserved.
///
/// Both kernels must share the same dimensions; transform constructors
/// validate this before any per-sample work.
#[allow(clippy::too_many_arguments)]
pub fn compute_sample_xy<P: Pixel>(
    kernel_x: &KernelMatrix,
    kernel_y: &KernelMatrix,
    src: &PixelBuffer<P>,
    dst_row: &mut [P],
    target_row: usize,
    target_col: usize,
    max_row: usize,
    max_col: usize,
    col_offset: usize,
) {
    debug_assert_eq!(kernel_x.rows(), kernel_y.rows());
    debug_assert_eq!(kernel_x.cols(), kernel_y.cols());

    let radius_y = kernel_x.radius_y();
    let radius_x = kernel_x.radius_x();
    let src_cols = src.cols();
    let src_data = src.as_slice();

    let mut sum_x = Color::default();
    let mut sum_y = Color::default();
    for y in 0..kernel_x.rows() {
        let sample_row = (target_row + y).clamp(radius_y, max_row + radius_y) - radius_y;
        let row_data = &src_data[sample_row * src_cols..(sample_row + 1) * src_cols];

        for x in 0..kernel_x.cols() {
            let sample_col = (target_col + col_offset + x)
                .clamp(col_offset + radius_x, max_col + radius_x)
                - radius_x;

            let mut color = row_data[sample_col].to_color();
            color.premultiply();
            sum_x += color * kernel_x.get(y, x);
            sum_y += color * kernel_y.get(y, x);
        }
    }

    let magnitude = Color::new(
        (sum_x.r * sum_x.r + sum_y.r * sum_y.r).sqrt(),
        (sum_x.g * sum_x.g + sum_y.g * sum_y.g).sqrt(),
        (sum_x.b * sum_x.b + sum_y.b * sum_y.b).sqrt(),
        (sum_x.a * sum_x.a + sum_y.a * sum_y.a).sqrt(),
    );

    let dst_alpha = dst_row[target_col].to_color().a;
    dst_row[target_col] = P::from_color(finish_sample(magnitude, dst_alpha));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rasterkit_image::{ImageError, ImageSize, Rgba8, Rgbaf32};

    #[test]
    fn test_identity_kernel_reproduces_source() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let src = PixelBuffer::new(
            size,
            vec![
                Rgba8::new(200, 100, 50, 128),
                Rgba8::new(10, 20, 30, 255),
                Rgba8::new(0, 0, 0, 0),
                Rgba8::new(90, 80, 70, 60),
            ],
        )?;
        let kernel = KernelMatrix::new(1, 1, vec![1.0])?;

        for row in 0..2 {
            let mut dst_row = src.row(row)?.to_vec();
            for col in 0..2 {
                compute_sample(
                    &kernel,
                    &src,
                    &mut dst_row,
                    row,
                    col,
                    1,
                    1,
                    0,
                    ConvolutionPass::Single,
                );
            }
            assert_eq!(dst_row.as_slice(), src.row(row)?);
        }
        Ok(())
    }

    #[test]
    fn test_boundary_clamps_to_edge_rows() -> Result<(), ImageError> {
        // single-column buffer: all column taps clamp to column 0, so the
        // output isolates the row clamping
        let size = ImageSize {
            width: 1,
            height: 3,
        };
        let src = PixelBuffer::new(
            size,
            vec![
                Rgbaf32::new(10.0, 0.0, 0.0, 1.0),
                Rgbaf32::new(20.0, 0.0, 0.0, 1.0),
                Rgbaf32::new(30.0, 0.0, 0.0, 1.0),
            ],
        )?;
        let kernel = KernelMatrix::new(3, 3, vec![1.0 / 9.0; 9])?;

        // top row: taps above the frame replicate row 0
        let mut dst_row = [Rgbaf32::new(0.0, 0.0, 0.0, 1.0)];
        compute_sample(
            &kernel,
            &src,
            &mut dst_row,
            0,
            0,
            2,
            0,
            0,
            ConvolutionPass::Single,
        );
        assert_relative_eq!(dst_row[0].r, (10.0 + 10.0 + 20.0) / 3.0, max_relative = 1e-6);

        // bottom row: taps below the frame replicate the last row
        let mut dst_row = [Rgbaf32::new(0.0, 0.0, 0.0, 1.0)];
        compute_sample(
            &kernel,
            &src,
            &mut dst_row,
            2,
            0,
            2,
            0,
            0,
            ConvolutionPass::Single,
        );
        assert_relative_eq!(dst_row[0].r, (20.0 + 30.0 + 30.0) / 3.0, max_relative = 1e-6);
        Ok(())
    }

    #[test]
    fn test_column_offset_clamps_to_working_area() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 1,
        };
        let src = PixelBuffer::new(
            size,
            (1..=5)
                .map(|v| Rgbaf32::new(v as f32, 0.0, 0.0, 1.0))
                .collect(),
        )?;
        let kernel = KernelMatrix::new(1, 3, vec![1.0; 3])?;

        // working area covers columns [2, 5); the left tap of the first
        // output column clamps to column 2, not column 1
        let mut dst_row = [Rgbaf32::new(0.0, 0.0, 0.0, 1.0); 3];
        compute_sample(
            &kernel,
            &src,
            &mut dst_row,
            0,
            0,
            0,
            4,
            2,
            ConvolutionPass::Single,
        );

        // accumulated (3 + 3 + 4), unpremultiplied by the accumulated
        // alpha of 3.0
        assert_relative_eq!(dst_row[0].r, 10.0 / 3.0, max_relative = 1e-6);
        Ok(())
    }

    #[test]
    fn test_first_pass_writes_premultiplied() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 1,
            height: 1,
        };
        let src = PixelBuffer::new(size, vec![Rgbaf32::new(0.5, 0.5, 0.5, 0.5)])?;
        let kernel = KernelMatrix::new(1, 1, vec![1.0])?;

        let mut mid_row = [Rgbaf32::default()];
        compute_sample(
            &kernel,
            &src,
            &mut mid_row,
            0,
            0,
            0,
            0,
            0,
            ConvolutionPass::First,
        );
        assert_eq!(mid_row[0], Rgbaf32::new(0.25, 0.25, 0.25, 0.5));

        // the second stage consumes the premultiplied output verbatim and
        // restores the original colour
        let mid = PixelBuffer::new(size, mid_row.to_vec())?;
        let mut dst_row = [Rgbaf32::new(0.0, 0.0, 0.0, 0.5)];
        compute_sample(
            &kernel,
            &mid,
            &mut dst_row,
            0,
            0,
            0,
            0,
            0,
            ConvolutionPass::Second,
        );
        assert_eq!(dst_row[0], Rgbaf32::new(0.5, 0.5, 0.5, 0.5));
        Ok(())
    }

    #[test]
    fn test_zero_kernel_pair_yields_zero_and_preserves_alpha() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let src = PixelBuffer::from_size_val(size, Rgbaf32::new(0.8, 0.4, 0.2, 1.0))?;
        let zero_x = KernelMatrix::new(3, 3, vec![0.0; 9])?;
        let zero_y = KernelMatrix::new(3, 3, vec![0.0; 9])?;

        let mut dst_row = [Rgbaf32::new(0.9, 0.9, 0.9, 0.6); 3];
        for col in 0..3 {
            compute_sample_xy(&zero_x, &zero_y, &src, &mut dst_row, 1, col, 2, 2, 0);
        }

        for sample in dst_row {
            assert_eq!(sample, Rgbaf32::new(0.0, 0.0, 0.0, 0.6));
        }
        Ok(())
    }
}

use rasterkit_image::{Frame, ImageError, ImageSize, Pixel, PixelBuffer, Rect};

use crate::parallel::{for_each_row_chunk, ParallelSettings};
use crate::processor::{run_transform, FrameTransform};

/// Crop a frame to a rectangle expressed in source coordinates.
///
/// The destination takes the rectangle's shape and every destination row
/// is a verbatim slice copy of the matching source row segment; cropping
/// never resamples. When the rectangle covers the full source frame the
/// whole pixel store is copied in one bulk operation instead of row by
/// row.
#[derive(Clone, Debug)]
pub struct CropTransform {
    area: Rect,
    settings: ParallelSettings,
}

impl CropTransform {
    /// Create a crop for `area`.
    ///
    /// Row copies are cheap per pixel, so the partitioner's per-task
    /// minimum is raised 4x relative to the defaults.
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            settings: ParallelSettings::default().multiply_min_pixels_per_task(4),
        }
    }

    /// Replace the parallel execution settings, used as given.
    pub fn with_settings(mut self, settings: ParallelSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The crop rectangle in source coordinates.
    pub fn area(&self) -> Rect {
        self.area
    }

    fn check_area<P: Pixel>(&self, src: &Frame<P>) -> Result<(), ImageError> {
        if !self.area.fits_within(src.size()) {
            return Err(ImageError::InvalidRect {
                left: self.area.left,
                top: self.area.top,
                width: self.area.width,
                height: self.area.height,
                frame_width: src.width(),
                frame_height: src.height(),
            });
        }
        Ok(())
    }
}

impl<P: Pixel> FrameTransform<P> for CropTransform {
    fn create_destination(&self, src: &Frame<P>) -> Result<Frame<P>, ImageError> {
        self.check_area(src)?;

        let buffer = PixelBuffer::from_size_val(
            ImageSize {
                width: self.area.width,
                height: self.area.height,
            },
            P::default(),
        )?;
        Ok(Frame::with_meta(buffer, src.meta))
    }

    fn apply(&self, src: &Frame<P>, dst: &mut Frame<P>) -> Result<(), ImageError> {
        self.check_area(src)?;
        if dst.width() != self.area.width || dst.height() != self.area.height {
            return Err(ImageError::InvalidImageSize(
                self.area.width,
                self.area.height,
                dst.width(),
                dst.height(),
            ));
        }

        // fast path: the working rectangle is the full source frame, so
        // the whole store is copied at once
        if self.area == Rect::full(src.size()) {
            dst.buffer.as_slice_mut().copy_from_slice(src.as_slice());
            return Ok(());
        }

        let src_cols = src.cols();
        let dst_cols = dst.cols();
        let left = self.area.left;
        let top = self.area.top;
        let src_data = src.as_slice();

        let work = Rect::full(dst.size());
        for_each_row_chunk(
            dst.buffer.as_slice_mut(),
            dst_cols,
            work,
            &self.settings,
            |chunk, slab| {
                for (i, dst_row) in slab.chunks_exact_mut(dst_cols).enumerate() {
                    // get the slice at the matching source row segment
                    let offset = (top + chunk.start + i) * src_cols + left;
                    dst_row.copy_from_slice(&src_data[offset..offset + dst_cols]);
                }
            },
        );

        Ok(())
    }
}

/// Crop `src` to `area`, running the two-phase transform.
///
/// # Examples
///
/// ```rust
/// use rasterkit_image::{Frame, ImageSize, PixelBuffer, Rect, Rgba8};
/// use rasterkit_imgproc::crop::crop_frame;
///
/// let buffer = PixelBuffer::new(
///     ImageSize { width: 4, height: 4 },
///     (0..16).map(|v| Rgba8::new(v, 0, 0, 255)).collect(),
/// )?;
///
/// let cropped = crop_frame(&Frame::new(buffer), Rect::new(1, 1, 2, 2))?;
///
/// assert_eq!(
///     cropped.as_slice(),
///     &[
///         Rgba8::new(5, 0, 0, 255),
///         Rgba8::new(6, 0, 0, 255),
///         Rgba8::new(9, 0, 0, 255),
///         Rgba8::new(10, 0, 0, 255),
///     ]
/// );
/// # Ok::<(), rasterkit_image::ImageError>(())
/// ```
pub fn crop_frame<P: Pixel>(src: &Frame<P>, area: Rect) -> Result<Frame<P>, ImageError> {
    run_transform(&CropTransform::new(area), src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterkit_image::{FrameMeta, Rgbaf32};

    fn pattern_frame(width: usize, height: usize) -> Result<Frame<Rgbaf32>, ImageError> {
        // pixel value = row * width + col, encoded into the red channel
        let data = (0..width * height)
            .map(|v| Rgbaf32::new(v as f32, 0.0, 0.0, 1.0))
            .collect();
        let buffer = PixelBuffer::new(
            ImageSize { width, height },
            data,
        )?;
        Ok(Frame::with_meta(buffer, FrameMeta { delay_ms: 25 }))
    }

    #[test]
    fn test_crop_identity_fast_path() -> Result<(), ImageError> {
        let src = pattern_frame(6, 4)?;

        let dst = crop_frame(&src, Rect::new(0, 0, 6, 4))?;

        assert_eq!(dst.size(), src.size());
        assert_eq!(dst.as_slice(), src.as_slice());
        Ok(())
    }

    #[test]
    fn test_crop_sub_rectangle() -> Result<(), ImageError> {
        let width = 8;
        let src = pattern_frame(width, 9)?;
        let area = Rect::new(2, 3, 4, 5);

        let dst = crop_frame(&src, area)?;

        assert_eq!(
            dst.size(),
            ImageSize {
                width: 4,
                height: 5
            }
        );
        for r in 0..5 {
            for c in 0..4 {
                let expected = ((area.top + r) * width + area.left + c) as f32;
                assert_eq!(dst.row(r)?[c].r, expected);
            }
        }
        Ok(())
    }

    #[test]
    fn test_crop_clones_metadata() -> Result<(), ImageError> {
        let src = pattern_frame(4, 4)?;
        let dst = crop_frame(&src, Rect::new(1, 1, 2, 2))?;
        assert_eq!(dst.meta, FrameMeta { delay_ms: 25 });
        Ok(())
    }

    #[test]
    fn test_crop_rejects_out_of_frame_rect() -> Result<(), ImageError> {
        let src = pattern_frame(4, 4)?;

        let res = crop_frame(&src, Rect::new(2, 2, 4, 4));
        assert_eq!(
            res.unwrap_err(),
            ImageError::InvalidRect {
                left: 2,
                top: 2,
                width: 4,
                height: 4,
                frame_width: 4,
                frame_height: 4,
            }
        );

        let res = crop_frame(&src, Rect::new(0, 0, 0, 4));
        assert!(matches!(res.unwrap_err(), ImageError::InvalidRect { .. }));
        Ok(())
    }

    #[test]
    fn test_crop_single_row_chunks() -> Result<(), ImageError> {
        // force many tiny chunks to exercise the partitioned path
        let src = pattern_frame(8, 9)?;
        let area = Rect::new(1, 2, 5, 6);
        let transform = CropTransform::new(area)
            .with_settings(ParallelSettings::new(1, 4).expect("valid settings"));

        let dst = run_transform(&transform, &src)?;

        for r in 0..6 {
            for c in 0..5 {
                let expected = ((area.top + r) * 8 + area.left + c) as f32;
                assert_eq!(dst.row(r)?[c].r, expected);
            }
        }
        Ok(())
    }
}

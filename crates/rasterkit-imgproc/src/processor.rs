use log::debug;

use rasterkit_image::{Frame, ImageError, Pixel};

/// A two-phase frame transform: allocate the destination, then fill it.
///
/// Each phase runs once per source frame, in order. Concrete transforms
/// decide the destination shape (cropping changes it, convolution keeps
/// it) and how rows are produced: a bulk fast path when the whole store
/// can be copied at once, or a row-chunk partitioned general path.
pub trait FrameTransform<P: Pixel> {
    /// Allocate the destination frame for `src`, cloning its per-frame
    /// metadata. Must not mutate the source.
    ///
    /// # Errors
    ///
    /// Configuration problems (an out-of-frame working rectangle, a
    /// malformed kernel) are rejected here, before any per-pixel work.
    fn create_destination(&self, src: &Frame<P>) -> Result<Frame<P>, ImageError>;

    /// Fill `dst` from `src`.
    ///
    /// The source is read-only for the duration of the call; the
    /// destination rows are written exactly once each.
    fn apply(&self, src: &Frame<P>, dst: &mut Frame<P>) -> Result<(), ImageError>;
}

/// Run a transform's two phases over one source frame and return the
/// filled destination.
///
/// Neither phase is retried or re-entered: a failed phase aborts this
/// frame's transform.
pub fn run_transform<P, T>(transform: &T, src: &Frame<P>) -> Result<Frame<P>, ImageError>
where
    P: Pixel,
    T: FrameTransform<P>,
{
    let mut dst = transform.create_destination(src)?;
    debug!(
        "transform destination allocated: {} -> {}",
        src.size(),
        dst.size()
    );

    transform.apply(src, &mut dst)?;
    Ok(dst)
}

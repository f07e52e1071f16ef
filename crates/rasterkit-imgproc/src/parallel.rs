use rayon::prelude::*;
use thiserror::Error;

use rasterkit_image::Rect;

const DEFAULT_MIN_PIXELS_PER_TASK: usize = 4096;

/// Errors that can occur configuring parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The requested degree of parallelism is invalid.
    #[error("degree of parallelism must be > 0, got {0}")]
    InvalidParallelism(usize),

    /// The per-task pixel minimum is invalid.
    #[error("minimum pixels per task must be > 0, got {0}")]
    InvalidMinPixelsPerTask(usize),
}

/// Tunables for row-partitioned parallel execution.
///
/// The per-task pixel minimum balances per-task overhead against
/// parallelism: work with cheap per-pixel cost (bulk copies) favors larger
/// chunks, per-sample convolution favors more of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelSettings {
    min_pixels_per_task: usize,
    max_parallelism: usize,
}

impl Default for ParallelSettings {
    fn default() -> Self {
        Self {
            min_pixels_per_task: DEFAULT_MIN_PIXELS_PER_TASK,
            max_parallelism: rayon::current_num_threads(),
        }
    }
}

impl ParallelSettings {
    /// Create settings from an explicit per-task pixel minimum and degree
    /// of parallelism.
    ///
    /// # Errors
    ///
    /// Both values must be positive.
    pub fn new(min_pixels_per_task: usize, max_parallelism: usize) -> Result<Self, ParallelError> {
        if min_pixels_per_task == 0 {
            return Err(ParallelError::InvalidMinPixelsPerTask(min_pixels_per_task));
        }
        if max_parallelism == 0 {
            return Err(ParallelError::InvalidParallelism(max_parallelism));
        }

        Ok(Self {
            min_pixels_per_task,
            max_parallelism,
        })
    }

    /// The minimum number of pixels a single task should process.
    pub fn min_pixels_per_task(&self) -> usize {
        self.min_pixels_per_task
    }

    /// The upper bound on concurrently executing chunks.
    pub fn max_parallelism(&self) -> usize {
        self.max_parallelism
    }

    /// Scale the per-task pixel minimum by `factor`.
    pub fn multiply_min_pixels_per_task(self, factor: usize) -> Self {
        Self {
            min_pixels_per_task: self.min_pixels_per_task * factor.max(1),
            ..self
        }
    }
}

/// A contiguous half-open range `[start, end)` of rows assigned to one
/// unit of parallel work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowChunk {
    /// First row of the chunk.
    pub start: usize,
    /// One past the last row of the chunk.
    pub end: usize,
}

impl RowChunk {
    /// Number of rows in the chunk.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the chunk contains no rows.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

fn chunk_rows(area: Rect, settings: &ParallelSettings) -> usize {
    let chunk_count = (area.pixels() / settings.min_pixels_per_task)
        .clamp(1, settings.max_parallelism);
    area.height.div_ceil(chunk_count)
}

/// Split the rows of a working area into contiguous row chunks.
///
/// The chunks are pairwise disjoint and their union is exactly
/// `[area.top, area.bottom())`, so each row belongs to exactly one chunk.
/// The number of chunks never exceeds the configured degree of
/// parallelism, and each chunk covers at least the per-task pixel minimum
/// whenever the area is large enough to allow it.
pub fn row_chunks(area: Rect, settings: &ParallelSettings) -> Vec<RowChunk> {
    if area.is_empty() {
        return Vec::new();
    }

    let rows = chunk_rows(area, settings);
    (area.top..area.bottom())
        .step_by(rows)
        .map(|start| RowChunk {
            start,
            end: (start + rows).min(area.bottom()),
        })
        .collect()
}

/// Partition `area`'s rows into chunks and invoke `f` once per chunk,
/// concurrently, handing each invocation its chunk and the destination
/// slab covering exactly that chunk's rows.
///
/// `dst` is the destination's full row-major pixel store and `dst_cols`
/// its row stride in pixels. Chunk disjointness is enforced by slice
/// partitioning, so every destination row in the area is written by at
/// most one invocation and the chunks need no synchronization. Chunk
/// execution order is unspecified.
pub fn for_each_row_chunk<T, F>(
    dst: &mut [T],
    dst_cols: usize,
    area: Rect,
    settings: &ParallelSettings,
    f: F,
) where
    T: Send,
    F: Fn(RowChunk, &mut [T]) + Send + Sync,
{
    if area.is_empty() {
        return;
    }

    let rows = chunk_rows(area, settings);
    let bottom = area.bottom();
    let slab = &mut dst[area.top * dst_cols..bottom * dst_cols];

    if rows >= area.height {
        f(
            RowChunk {
                start: area.top,
                end: bottom,
            },
            slab,
        );
        return;
    }

    slab.par_chunks_mut(rows * dst_cols)
        .enumerate()
        .for_each(|(i, chunk_slab)| {
            let start = area.top + i * rows;
            let chunk = RowChunk {
                start,
                end: (start + rows).min(bottom),
            };
            f(chunk, chunk_slab);
        });
}

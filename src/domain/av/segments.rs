use std::path::Path;
use tracing::{debug, error};

use crate::domain::jobs::{OutputLayout, SegmentJob};
use crate::error::SplitError;
use crate::ports::media::{check_output, MediaToolRunner};

/// Split `duration` seconds of `source` into `count` equal windows.
///
/// Every window has length `duration / count`. No remainder handling: the
/// windows never extend past `duration`.
pub fn plan_segments(
    source: &Path,
    duration: f64,
    count: usize,
    layout: &OutputLayout,
) -> Vec<SegmentJob> {
    if count == 0 {
        return Vec::new();
    }

    let segment_duration = duration / count as f64;
    (1..=count)
        .map(|index| SegmentJob {
            index,
            source_path: source.to_path_buf(),
            output_path: layout.segment_path(index),
            start_time: (index - 1) as f64 * segment_duration,
            duration: segment_duration,
        })
        .collect()
}

/// Run ffmpeg for one segment window.
pub async fn split_segment(job: &SegmentJob, runner: &impl MediaToolRunner) -> Result<(), SplitError> {
    debug!(
        index = job.index,
        start = job.start_time,
        duration = job.duration,
        "splitting segment"
    );

    let result = runner
        .run_ffmpeg_segment(&job.source_path, job.start_time, job.duration, &job.output_path)
        .await;

    check_output("ffmpeg", result).map_err(|source| {
        error!(index = job.index, error = %source, "error splitting video");
        SplitError::Segment {
            index: job.index,
            source,
        }
    })?;

    debug!(index = job.index, path = ?job.output_path, "segment written");
    Ok(())
}

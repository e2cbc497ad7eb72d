use serde::Serialize;
use std::path::{Path, PathBuf};

/// Every upload is cut into this many segments.
pub const SEGMENT_COUNT: usize = 5;

/// Where uploads, segments and thumbnails are written.
///
/// Built once from configuration and handed to every job, so concurrent
/// requests never observe each other's directories.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputLayout {
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
    pub thumbnail_dir: PathBuf,
}

impl OutputLayout {
    pub fn new(upload_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        let output_dir = output_dir.as_ref().to_path_buf();
        Self {
            upload_dir: upload_dir.as_ref().to_path_buf(),
            thumbnail_dir: output_dir.join("thumbnails"),
            output_dir,
        }
    }

    /// `part<index>.mp4` in the output directory, 1-based.
    pub fn segment_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!("part{}.mp4", index))
    }

    /// `thumbnail<index>.png` in the thumbnail directory, 1-based.
    pub fn thumbnail_path(&self, index: usize) -> PathBuf {
        self.thumbnail_dir.join(format!("thumbnail{}.png", index))
    }
}

/// A received upload, moved from its staging file to a stable name.
#[derive(Debug, Clone)]
pub struct UploadedVideo {
    pub original_name: String,
    pub staging_path: PathBuf,
    pub stored_path: PathBuf,
}

/// Cut one time window out of the source video.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentJob {
    /// Segment index (1-based)
    pub index: usize,
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    /// Start time in seconds
    pub start_time: f64,
    /// Duration in seconds
    pub duration: f64,
}

impl SegmentJob {
    /// The thumbnail job that runs once this segment exists.
    pub fn thumbnail_job(&self, layout: &OutputLayout) -> ThumbnailJob {
        ThumbnailJob {
            segment_index: self.index,
            segment_path: self.output_path.clone(),
            output_path: layout.thumbnail_path(self.index),
            seek: self.duration / 2.0,
        }
    }
}

/// Grab one frame from the middle of a finished segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailJob {
    pub segment_index: usize,
    pub segment_path: PathBuf,
    pub output_path: PathBuf,
    /// Offset inside the segment, in seconds
    pub seek: f64,
}

/// How one segment job ended.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentOutcome {
    pub index: usize,
    pub segment_path: PathBuf,
    /// `None` when the thumbnail could not be captured
    pub thumbnail_path: Option<PathBuf>,
}

/// Summary of a fully processed upload.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub duration: f64,
    /// Ordered by segment index
    pub segments: Vec<SegmentOutcome>,
}

impl PipelineReport {
    pub fn thumbnail_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| segment.thumbnail_path.is_some())
            .count()
    }
}

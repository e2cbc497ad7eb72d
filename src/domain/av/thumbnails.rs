use tracing::debug;

use crate::domain::jobs::ThumbnailJob;
use crate::error::ThumbnailError;
use crate::ports::media::{check_output, MediaToolRunner};

/// Extract one frame from a finished segment into the thumbnail directory.
///
/// Thumbnails are best-effort. Callers log the error and carry on; it never
/// decides the outcome of a request.
pub async fn capture_thumbnail(
    job: &ThumbnailJob,
    runner: &impl MediaToolRunner,
) -> Result<(), ThumbnailError> {
    let result = runner
        .run_ffmpeg_frame(&job.segment_path, job.seek, &job.output_path)
        .await;

    check_output("ffmpeg", result).map_err(|source| ThumbnailError {
        index: job.segment_index,
        source,
    })?;

    debug!(index = job.segment_index, path = ?job.output_path, "thumbnail captured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MediaToolError;
    use crate::ports::media::MockMediaToolRunner;
    use crate::test_support::process_output;
    use std::path::{Path, PathBuf};

    fn job() -> ThumbnailJob {
        ThumbnailJob {
            segment_index: 3,
            segment_path: PathBuf::from("output/part3.mp4"),
            output_path: PathBuf::from("output/thumbnails/thumbnail3.png"),
            seek: 1.5,
        }
    }

    #[tokio::test]
    async fn test_capture_thumbnail_success() {
        let mut mock_runner = MockMediaToolRunner::new();
        mock_runner
            .expect_run_ffmpeg_frame()
            .withf(|source, seek, output| {
                source == Path::new("output/part3.mp4")
                    && *seek == 1.5
                    && output == Path::new("output/thumbnails/thumbnail3.png")
            })
            .times(1)
            .returning(|_, _, _| Ok(process_output(true, "", "")));

        assert!(capture_thumbnail(&job(), &mock_runner).await.is_ok());
    }

    #[tokio::test]
    async fn test_capture_thumbnail_failure_keeps_index() {
        let mut mock_runner = MockMediaToolRunner::new();
        mock_runner
            .expect_run_ffmpeg_frame()
            .times(1)
            .returning(|_, _, _| Ok(process_output(false, "", "Output file is empty")));

        let err = capture_thumbnail(&job(), &mock_runner).await.unwrap_err();
        assert_eq!(err.index, 3);
        assert!(matches!(err.source, MediaToolError::Failed { .. }));
        assert!(err.to_string().contains("thumbnail 3"));
    }
}

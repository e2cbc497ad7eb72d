use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Output;

use crate::error::MediaToolError;

/// The external media tool. Every operation is one process invocation; the
/// raw `Output` is returned so callers decide what a failure means.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaToolRunner: Send + Sync {
    /// Read container metadata as ffprobe JSON.
    async fn run_ffprobe_for_format(&self, media_path: &Path) -> io::Result<Output>;

    /// Cut `duration` seconds starting at `start_at` into a standalone file.
    async fn run_ffmpeg_segment(
        &self,
        source: &Path,
        start_at: f64,
        duration: f64,
        output_path: &Path,
    ) -> io::Result<Output>;

    /// Write the single frame found `seek` seconds into `source` as an image.
    async fn run_ffmpeg_frame(&self, source: &Path, seek: f64, output_path: &Path) -> io::Result<Output>;
}

/// Turn a process result into an error unless it ran and exited with 0.
pub fn check_output(tool: &'static str, result: io::Result<Output>) -> Result<Output, MediaToolError> {
    let output = result.map_err(|source| MediaToolError::Spawn { tool, source })?;
    if !output.status.success() {
        return Err(MediaToolError::Failed {
            tool,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::process_output;

    #[test]
    fn test_check_output_success() {
        let output = check_output("ffprobe", Ok(process_output(true, "{}", ""))).unwrap();
        assert_eq!(output.stdout, b"{}");
    }

    #[test]
    fn test_check_output_non_zero_exit() {
        let err = check_output("ffmpeg", Ok(process_output(false, "", "  No such file\n"))).unwrap_err();
        match err {
            MediaToolError::Failed { tool, stderr, .. } => {
                assert_eq!(tool, "ffmpeg");
                assert_eq!(stderr, "No such file");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_check_output_spawn_error() {
        let err = check_output(
            "ffprobe",
            Err(io::Error::new(io::ErrorKind::NotFound, "ffprobe not found")),
        )
        .unwrap_err();
        assert!(matches!(err, MediaToolError::Spawn { tool: "ffprobe", .. }));
        assert!(err.to_string().contains("ffprobe not found"));
    }
}

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command as TokioCommand;

use crate::ports::media::MediaToolRunner;

/// Runs the `ffmpeg` and `ffprobe` executables.
#[derive(Debug, Clone)]
pub struct FfmpegCli {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl FfmpegCli {
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    fn ffprobe_command(&self, media_path: &Path) -> TokioCommand {
        let mut command = TokioCommand::new(&self.ffprobe);
        command
            .arg("-v")
            .arg("error")
            .arg("-show_format")
            .arg("-print_format")
            .arg("json")
            .arg(media_path)
            .stdin(Stdio::null());
        command
    }

    // Concurrent ffmpeg processes must not fight over the server's stdin.
    fn ffmpeg_command(&self) -> TokioCommand {
        let mut command = TokioCommand::new(&self.ffmpeg);
        command
            .arg("-nostdin")
            .arg("-y")
            .arg("-v")
            .arg("error")
            .stdin(Stdio::null());
        command
    }

    fn segment_command(&self, source: &Path, start_at: f64, duration: f64, output_path: &Path) -> TokioCommand {
        let mut command = self.ffmpeg_command();
        command
            .arg("-ss")
            .arg(start_at.to_string())
            .arg("-i")
            .arg(source)
            .arg("-t")
            .arg(duration.to_string())
            .arg(output_path);
        command
    }

    fn frame_command(&self, source: &Path, seek: f64, output_path: &Path) -> TokioCommand {
        let mut command = self.ffmpeg_command();
        command
            .arg("-ss")
            .arg(seek.to_string())
            .arg("-i")
            .arg(source)
            .arg("-frames:v")
            .arg("1")
            .arg(output_path);
        command
    }
}

impl Default for FfmpegCli {
    fn default() -> Self {
        Self::new("ffmpeg", "ffprobe")
    }
}

#[async_trait]
impl MediaToolRunner for FfmpegCli {
    async fn run_ffprobe_for_format(&self, media_path: &Path) -> io::Result<Output> {
        self.ffprobe_command(media_path).output().await
    }

    async fn run_ffmpeg_segment(
        &self,
        source: &Path,
        start_at: f64,
        duration: f64,
        output_path: &Path,
    ) -> io::Result<Output> {
        self.segment_command(source, start_at, duration, output_path)
            .output()
            .await
    }

    async fn run_ffmpeg_frame(&self, source: &Path, seek: f64, output_path: &Path) -> io::Result<Output> {
        self.frame_command(source, seek, output_path).output().await
    }
}

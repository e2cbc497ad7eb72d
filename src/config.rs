//! Configuration loaded from the environment.

use crate::domain::jobs::OutputLayout;
use std::env;
use std::path::PathBuf;

/// Media-tool invocations allowed to run at the same time, across all requests.
pub const DEFAULT_MAX_CONCURRENT_JOBS: usize = 4;

/// Configuration for the upload server.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// Directory receiving uploaded videos
    pub upload_dir: PathBuf,
    /// Directory receiving segments (thumbnails go in `thumbnails/` below it)
    pub output_dir: PathBuf,
    /// Directory served as-is at `/`
    pub public_dir: PathBuf,
    /// ffmpeg executable
    pub ffmpeg_path: PathBuf,
    /// ffprobe executable
    pub ffprobe_path: PathBuf,
    /// Size of the worker pool bounding concurrent ffmpeg processes
    pub max_concurrent_jobs: usize,
}

impl AppConfig {
    /// Load configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| String::from(default));

        let max_concurrent_jobs = lookup("MAX_CONCURRENT_JOBS")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_CONCURRENT_JOBS)
            .max(1);

        Self {
            addr: var("ADDR", "127.0.0.1"),
            port: var("PORT", "3000"),
            upload_dir: PathBuf::from(var("UPLOAD_DIR", "uploads")),
            output_dir: PathBuf::from(var("OUTPUT_DIR", "output")),
            public_dir: PathBuf::from(var("PUBLIC_DIR", "public")),
            ffmpeg_path: PathBuf::from(var("FFMPEG_PATH", "ffmpeg")),
            ffprobe_path: PathBuf::from(var("FFPROBE_PATH", "ffprobe")),
            max_concurrent_jobs,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(&self.upload_dir, &self.output_dir)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

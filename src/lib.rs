//! vidsplit - upload a video, cut it into equal segments, thumbnail each one.
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (jobs, probing, segments, thumbnails)
//! - ports/: Trait definitions (the external media tool)
//! - adapters/: Concrete implementations (ffmpeg CLI, filesystem, HTTP)
//! - application/: The split pipeline service
//! - config: Environment configuration
//!
//! All media work is delegated to the `ffmpeg` and `ffprobe` executables;
//! this crate only computes their arguments and coordinates the jobs.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use adapters::local::ffmpeg::FfmpegCli;
pub use adapters::local::http::router;
pub use application::pipeline::SplitPipeline;
pub use config::AppConfig;
pub use domain::jobs::{OutputLayout, SEGMENT_COUNT};
pub use error::PipelineError;

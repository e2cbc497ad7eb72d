//! Test helpers shared by unit tests: fake process outputs and a scripted media tool.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{ExitStatus, Output};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::ports::media::MediaToolRunner;

pub fn process_output(success: bool, stdout: &str, stderr: &str) -> Output {
    Output {
        // wait status 256 is exit code 1
        status: if success { ExitStatus::from_raw(0) } else { ExitStatus::from_raw(256) },
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Index encoded in `part<i>.mp4` / `thumbnail<i>.png`.
fn index_of(path: &Path) -> usize {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.trim_start_matches(|c: char| !c.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

/// A media tool that writes placeholder files instead of running ffmpeg.
#[derive(Default)]
pub struct FakeMediaTool {
    /// Duration reported by the probe; `None` makes the probe fail
    pub duration: Option<f64>,
    pub failing_segments: Vec<usize>,
    pub failing_thumbnails: Vec<usize>,
    /// Per-index artificial runtime for segment cuts
    pub segment_delays: HashMap<usize, Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    probes: AtomicUsize,
    segment_calls: Mutex<Vec<(usize, f64, f64)>>,
    finished_segments: Mutex<Vec<usize>>,
    thumbnail_calls: Mutex<Vec<usize>>,
}

impl FakeMediaTool {
    pub fn with_duration(duration: f64) -> Self {
        Self {
            duration: Some(duration),
            ..Default::default()
        }
    }

    pub fn unprobeable() -> Self {
        Self::default()
    }

    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    /// `(index, start, duration)` of every segment invocation.
    pub fn segment_calls(&self) -> Vec<(usize, f64, f64)> {
        self.segment_calls.lock().unwrap().clone()
    }

    /// Segment indices in the order their processes finished.
    pub fn finished_segments(&self) -> Vec<usize> {
        self.finished_segments.lock().unwrap().clone()
    }

    pub fn thumbnail_calls(&self) -> Vec<usize> {
        self.thumbnail_calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MediaToolRunner for FakeMediaTool {
    async fn run_ffprobe_for_format(&self, _media_path: &Path) -> io::Result<Output> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        Ok(match self.duration {
            Some(duration) => process_output(
                true,
                &format!(r#"{{"format": {{"duration": "{:.6}"}}}}"#, duration),
                "",
            ),
            None => process_output(false, "", "Invalid data found when processing input"),
        })
    }

    async fn run_ffmpeg_segment(
        &self,
        _source: &Path,
        start_at: f64,
        duration: f64,
        output_path: &Path,
    ) -> io::Result<Output> {
        let index = index_of(output_path);
        self.segment_calls
            .lock()
            .unwrap()
            .push((index, start_at, duration));

        self.enter();
        if let Some(delay) = self.segment_delays.get(&index) {
            tokio::time::sleep(*delay).await;
        } else {
            tokio::task::yield_now().await;
        }
        self.leave();

        self.finished_segments.lock().unwrap().push(index);
        if self.failing_segments.contains(&index) {
            return Ok(process_output(false, "", "Error while decoding stream"));
        }
        tokio::fs::write(output_path, b"segment").await?;
        Ok(process_output(true, "", ""))
    }

    async fn run_ffmpeg_frame(&self, source: &Path, _seek: f64, output_path: &Path) -> io::Result<Output> {
        let index = index_of(source);
        self.thumbnail_calls.lock().unwrap().push(index);

        if self.failing_thumbnails.contains(&index) {
            return Ok(process_output(false, "", "Output file is empty, nothing was encoded"));
        }
        tokio::fs::write(output_path, b"png").await?;
        Ok(process_output(true, "", ""))
    }
}

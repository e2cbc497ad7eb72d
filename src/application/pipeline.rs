use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::adapters::local::fs::prepare_directories;
use crate::domain::av::probe::probe_duration;
use crate::domain::av::segments::{plan_segments, split_segment};
use crate::domain::av::thumbnails::capture_thumbnail;
use crate::domain::jobs::{
    OutputLayout, PipelineReport, SegmentJob, SegmentOutcome, UploadedVideo, SEGMENT_COUNT,
};
use crate::error::{PipelineError, SplitError};
use crate::ports::media::MediaToolRunner;

/// Probe, split and thumbnail a stored upload.
///
/// Segment jobs run concurrently on a worker pool shared by every request:
/// the semaphore caps how many media-tool processes are alive at once and
/// the rest wait for a permit.
pub struct SplitPipeline<R> {
    runner: Arc<R>,
    layout: OutputLayout,
    workers: Arc<Semaphore>,
}

impl<R> SplitPipeline<R>
where
    R: MediaToolRunner + 'static,
{
    pub fn new(runner: Arc<R>, layout: OutputLayout, max_concurrent_jobs: usize) -> Self {
        Self {
            runner,
            layout,
            workers: Arc::new(Semaphore::new(max_concurrent_jobs.max(1))),
        }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Runs the whole pipeline for one upload and returns once every
    /// segment job has finished, whatever order they finish in.
    pub async fn process(&self, video: &UploadedVideo) -> Result<PipelineReport, PipelineError> {
        prepare_directories(&[&self.layout.thumbnail_dir])
            .await
            .map_err(PipelineError::Storage)?;

        let duration = probe_duration(&video.stored_path, self.runner.as_ref()).await?;
        info!(duration, file = %video.original_name, "video probed");

        let jobs = plan_segments(&video.stored_path, duration, SEGMENT_COUNT, &self.layout);
        let total = jobs.len();

        let mut running = JoinSet::new();
        for job in jobs {
            running.spawn(run_segment_job(
                job,
                self.runner.clone(),
                self.workers.clone(),
                self.layout.clone(),
            ));
        }

        // Completion barrier: nothing is reported until all `total` jobs are done.
        let mut completed = 0;
        let mut segments = Vec::with_capacity(total);
        let mut first_failure = None;
        while let Some(joined) = running.join_next().await {
            completed += 1;
            match joined.map_err(SplitError::from).and_then(|outcome| outcome) {
                Ok(outcome) => {
                    info!(index = outcome.index, completed, total, "segment job finished");
                    segments.push(outcome);
                }
                Err(err) => {
                    warn!(error = %err, completed, total, "segment job failed");
                    first_failure.get_or_insert(err);
                }
            }
        }

        if let Some(err) = first_failure {
            return Err(PipelineError::Split(err));
        }

        segments.sort_by_key(|outcome| outcome.index);
        Ok(PipelineReport { duration, segments })
    }
}

/// Cut one segment, then thumbnail it. Each step holds a worker permit only
/// while its process runs.
async fn run_segment_job<R>(
    job: SegmentJob,
    runner: Arc<R>,
    workers: Arc<Semaphore>,
    layout: OutputLayout,
) -> Result<SegmentOutcome, SplitError>
where
    R: MediaToolRunner,
{
    {
        let _permit = workers.acquire().await?;
        split_segment(&job, runner.as_ref()).await?;
    }

    let thumbnail = job.thumbnail_job(&layout);
    let captured = {
        let _permit = workers.acquire().await?;
        capture_thumbnail(&thumbnail, runner.as_ref()).await
    };

    let thumbnail_path = match captured {
        Ok(()) => Some(thumbnail.output_path),
        Err(err) => {
            warn!(index = err.index, error = %err.source, "error capturing thumbnail");
            None
        }
    };

    Ok(SegmentOutcome {
        index: job.index,
        segment_path: job.output_path,
        thumbnail_path,
    })
}

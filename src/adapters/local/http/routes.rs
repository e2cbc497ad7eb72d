use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::post;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::upload::receive_upload;
use crate::application::pipeline::SplitPipeline;
use crate::error::PipelineError;
use crate::ports::media::MediaToolRunner;

pub const SUCCESS_MESSAGE: &str = "Video uploaded, divided, and thumbnails generated.";

/// `POST /upload` plus static files from `public_dir` for everything else.
pub fn router<R>(pipeline: Arc<SplitPipeline<R>>, public_dir: &Path) -> Router
where
    R: MediaToolRunner + 'static,
{
    Router::new()
        .route("/upload", post(upload_video::<R>))
        .layer(DefaultBodyLimit::disable())
        .with_state(pipeline)
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
}

/// Store the uploaded video, then split and thumbnail it. Exactly one
/// response is produced, after every segment job has finished.
pub async fn upload_video<R>(
    State(pipeline): State<Arc<SplitPipeline<R>>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<&'static str, PipelineError>
where
    R: MediaToolRunner + 'static,
{
    let request_id = Uuid::new_v4();

    async move {
        let mut multipart = multipart.map_err(|rejection| {
            warn!(error = %rejection, "not a multipart request");
            PipelineError::BadRequest
        })?;

        let video = receive_upload(&mut multipart, &pipeline.layout().upload_dir).await?;
        let report = pipeline.process(&video).await?;

        info!(
            file = %video.original_name,
            segments = report.segments.len(),
            thumbnails = report.thumbnail_count(),
            "video divided"
        );
        if let Ok(summary) = serde_json::to_string(&report) {
            debug!(report = %summary, "pipeline report");
        }
        Ok(SUCCESS_MESSAGE)
    }
    .instrument(info_span!("upload", %request_id))
    .await
}

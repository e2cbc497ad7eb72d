use axum::body::Bytes;
use axum::extract::Multipart;
use axum::BoxError;
use futures::{Stream, TryStreamExt};
use std::io;
use std::path::Path;
use tokio::{fs::File, io::AsyncWriteExt, io::BufWriter};
use tokio_util::io::StreamReader;
use tracing::{debug, info, warn};

use crate::adapters::local::fs::{persist_upload, staging_path, stored_file_name};
use crate::domain::jobs::UploadedVideo;
use crate::error::PipelineError;

/// Multipart field carrying the video.
pub const UPLOAD_FIELD: &str = "videoFile";

/// Read the `videoFile` field into the upload directory.
///
/// The body is streamed to a staging file, then renamed to
/// `<upload_dir>/<original name>`. Fields with another name, or without a
/// filename, are skipped.
pub async fn receive_upload(
    multipart: &mut Multipart,
    upload_dir: &Path,
) -> Result<UploadedVideo, PipelineError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "malformed multipart body");
                return Err(PipelineError::BadRequest);
            }
        };

        if field.name() != Some(UPLOAD_FIELD) {
            debug!(field = ?field.name(), "skipping multipart field");
            continue;
        }
        let raw_name = match field.file_name() {
            Some(name) => name.to_owned(),
            None => continue,
        };

        let original_name =
            stored_file_name(&raw_name).ok_or(PipelineError::InvalidFileName(raw_name))?;
        let staging = staging_path(upload_dir);
        let stored_path = upload_dir.join(&original_name);

        if let Err(err) = stream_to_file(&staging, field).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(PipelineError::FileMove(err));
        }
        if let Err(err) = persist_upload(&staging, &stored_path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(PipelineError::FileMove(err));
        }

        info!(file = %original_name, path = ?stored_path, "video stored");
        return Ok(UploadedVideo {
            original_name,
            staging_path: staging,
            stored_path,
        });
    }

    Err(PipelineError::BadRequest)
}

// Save a `Stream` to a file
pub async fn stream_to_file<S, E>(path: &Path, stream: S) -> io::Result<()>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    let body_with_io_error = stream.map_err(|err| io::Error::new(io::ErrorKind::Other, err));
    let body_reader = StreamReader::new(body_with_io_error);
    futures::pin_mut!(body_reader);

    let mut file = BufWriter::new(File::create(path).await?);
    tokio::io::copy(&mut body_reader, &mut file).await?;
    file.flush().await?;

    Ok(())
}

use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vidsplit::adapters::local::fs::prepare_directories;
use vidsplit::{router, AppConfig, FfmpegCli, SplitPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vidsplit=info,tower_http=info")),
        )
        .init();

    // 1. Storage
    let layout = config.layout();
    prepare_directories(&[&layout.upload_dir, &layout.output_dir])
        .await
        .context("Failed to prepare upload and output directories")?;

    // 2. Media tool + pipeline
    let runner = Arc::new(FfmpegCli::new(&config.ffmpeg_path, &config.ffprobe_path));
    let pipeline = Arc::new(SplitPipeline::new(
        runner,
        layout,
        config.max_concurrent_jobs,
    ));
    info!(
        workers = config.max_concurrent_jobs,
        "media worker pool ready"
    );

    // 3. HTTP
    let app = router(pipeline, &config.public_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind TCP listener on {}", config.bind_address()))?;
    info!("Server is running on http://{}", config.bind_address());
    axum::serve(listener, app)
        .await
        .context("Server failed")?;

    Ok(())
}

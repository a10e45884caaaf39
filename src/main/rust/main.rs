use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info};

use camview::infrastructure::gstreamer::{GStreamerCapabilities, GStreamerPipelineFactory};
use camview::infrastructure::logging::TracingObserver;
use camview::infrastructure::metrics::{serve_metrics, PrometheusReporter};
use camview::infrastructure::simulated::{SimulatedPipelineFactory, StaticCapabilities};
use camview::infrastructure::storage::{load_or_default, JsonFileConfigStore};
use camview::{Config, GridOrchestrator, PipelineFactory, PlaybackCapabilities};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();
    config.validate()?;

    // Initialize logging
    let filter = if config.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    // Load the stored viewer configuration
    let store = JsonFileConfigStore::new(&config.config);
    let mut app_config = load_or_default(&store, config.legacy_config.as_deref()).await;
    config.apply_overrides(&mut app_config);

    if config.export {
        println!("{}", app_config.export_json()?);
        return Ok(());
    }

    let cameras = app_config
        .camera_list()
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let proxy = app_config
        .proxy_config()
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let layout = app_config
        .layout()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    // Initialize GStreamer (infrastructure concern)
    if !config.dry_run {
        gstreamer::init()?;
    }

    // Initialize metrics
    PrometheusReporter::init_metrics()?;

    info!("Starting camera grid");
    info!("  Config: {}", store.path().display());
    info!("  Cameras: {}", cameras.len());
    info!("  Grid columns: {}", layout.columns());
    info!(
        "  RTSP proxy: {}",
        proxy.as_ref().map_or("none", |p| p.base_url())
    );
    info!("  Metrics port: {}", config.metrics_port);

    // Create infrastructure implementations (dependency injection)
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let (factory, capabilities): (Box<dyn PipelineFactory>, Arc<dyn PlaybackCapabilities>) =
        if config.dry_run {
            info!("  Dry run: pipelines are simulated");
            (
                Box::new(
                    SimulatedPipelineFactory::new()
                        .with_events(events_tx)
                        .with_auto_ready(true),
                ),
                Arc::new(StaticCapabilities::new(true, true)),
            )
        } else {
            (
                Box::new(GStreamerPipelineFactory::new(events_tx)),
                Arc::new(GStreamerCapabilities::new()),
            )
        };

    // Create application service
    let mut grid = GridOrchestrator::new(
        factory,
        capabilities,
        Arc::new(TracingObserver::new()),
        Arc::new(PrometheusReporter::new()),
    )
    .with_proxy(proxy)
    .with_layout(layout);

    // GStreamer state changes block, keep them off the async worker
    let summary = tokio::task::block_in_place(|| grid.apply_cameras(cameras.cameras()));
    info!(sessions = summary.created, "Camera list applied");

    // Start metrics server
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let metrics_server = tokio::spawn(serve_metrics(config.metrics_port, async move {
        shutdown_rx.await.ok();
    }));

    // Dispatch pipeline events until Ctrl+C, then tear down every pipeline
    grid.run_until(&mut events_rx, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl+c: {}", e);
        }
        info!("Received shutdown signal");
    })
    .await;

    // Signal shutdown to metrics server
    let _ = shutdown_tx.send(());
    metrics_server.await?;

    info!("Camera grid shutdown complete");
    Ok(())
}

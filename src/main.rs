//! SegmentForge: travel customer segmentation served from pre-trained artifacts
//!
//! Loads the scaler and K-Means model once, then either answers a single
//! `--predict` query or serves the web front end.

use anyhow::{Context, Result};
use clap::Parser;
use segmentforge::{server, ArtifactStore, Args, FeatureVector, PredictionService};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Without both artifacts nothing can be served.
    let artifacts = ArtifactStore::load(&args.model, &args.scaler)
        .context("Failed to load clustering artifacts")?;

    if let Some(features) = args.parse_feature_values()? {
        return run_prediction_mode(&artifacts, &features);
    }

    server::serve(artifacts, args.bind_addr()).await
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Run prediction mode for a single customer
fn run_prediction_mode(artifacts: &ArtifactStore, features: &FeatureVector) -> Result<()> {
    println!("=== Prediction Mode ===");
    println!(
        "Input: views={}, check-ins={}, minutes={}",
        features.yearly_avg_views, features.yearly_avg_checkins, features.daily_avg_minutes
    );

    let prediction = PredictionService::new(artifacts).predict(features)?;

    println!("\n{}", prediction.headline());
    println!("{}", prediction.description);

    Ok(())
}

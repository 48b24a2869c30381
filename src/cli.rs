//! Command-line interface definitions and argument parsing

use crate::data::FeatureVector;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Travel customer segmentation app serving a pre-trained K-Means model
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the persisted K-Means model artifact
    #[arg(short, long, env = "SEGMENT_MODEL", default_value = "kmeans_model.bin")]
    pub model: PathBuf,

    /// Path to the persisted feature scaler artifact
    #[arg(short, long, env = "SEGMENT_SCALER", default_value = "scaler.bin")]
    pub scaler: PathBuf,

    /// Address to bind the web server to
    #[arg(long, env = "SEGMENT_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to bind the web server to
    #[arg(long, env = "SEGMENT_PORT", default_value = "8501")]
    pub port: u16,

    /// Prediction mode: provide views,check-ins,minutes as comma-separated string
    /// Example: --predict "300,5,30"
    #[arg(short, long)]
    pub predict: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Parse feature values from the predict string
    /// Expected format: "views,checkins,minutes"
    pub fn parse_feature_values(&self) -> crate::Result<Option<FeatureVector>> {
        let Some(ref predict_str) = self.predict else {
            return Ok(None);
        };

        let parts: Vec<&str> = predict_str.split(',').collect();
        if parts.len() != 3 {
            anyhow::bail!("Predict values must be in format 'views,checkins,minutes'");
        }

        let views: f64 = parts[0]
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid yearly views value: {}", parts[0]))?;
        let checkins: f64 = parts[1]
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid yearly check-ins value: {}", parts[1]))?;
        let minutes: f64 = parts[2]
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid daily minutes value: {}", parts[2]))?;

        Ok(Some(FeatureVector::new(views, checkins, minutes)))
    }
}

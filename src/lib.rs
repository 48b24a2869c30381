//! SegmentForge: travel customer segmentation with a pre-trained K-Means model
//!
//! This library loads a persisted feature scaler and cluster model, predicts
//! the behavioural segment of a customer from three features, and renders the
//! pages of the web front end.

pub mod artifacts;
pub mod cli;
pub mod data;
pub mod error;
pub mod model;
pub mod nav;
pub mod predict;
pub mod segments;
pub mod server;
pub mod viz;

// Re-export public items for easier access
pub use artifacts::ArtifactStore;
pub use cli::Args;
pub use data::{FeatureVector, ScalingTransform};
pub use error::SegmentError;
pub use model::ClusterModel;
pub use nav::{Navigator, Page, View};
pub use predict::{Prediction, PredictionService};
pub use segments::describe;
pub use viz::render_elbow_chart;

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;

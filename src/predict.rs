//! Prediction service: raw features to cluster assignment and description

use crate::artifacts::ArtifactStore;
use crate::data::FeatureVector;
use crate::error::SegmentError;
use crate::segments::describe;
use ndarray::Array1;
use std::fmt;
use tracing::debug;

/// Cluster assignment for one customer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub cluster_id: usize,
    pub description: &'static str,
}

impl Prediction {
    /// Headline shown above the description
    pub fn headline(&self) -> String {
        format!("Predicted Segment (Cluster): {}", self.cluster_id)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.headline(), self.description)
    }
}

/// Scales features with the loaded transform and assigns them with the
/// loaded model. Stateless apart from the borrowed artifacts.
#[derive(Debug, Clone, Copy)]
pub struct PredictionService<'a> {
    artifacts: &'a ArtifactStore,
}

impl<'a> PredictionService<'a> {
    pub fn new(artifacts: &'a ArtifactStore) -> Self {
        Self { artifacts }
    }

    /// Predict the segment for `features`.
    ///
    /// Input is validated before any model evaluation. The scaler is only
    /// applied, never refitted.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, SegmentError> {
        features.validate()?;

        let scaler = self.artifacts.scaler();
        let model = self.artifacts.model();
        if scaler.n_features() != model.n_features() {
            return Err(SegmentError::ModelShape {
                expected: model.n_features(),
                actual: scaler.n_features(),
            });
        }

        let raw = Array1::from(features.as_array().to_vec());
        let scaled = scaler.transform(raw.view())?;
        let cluster_id = model.predict(scaled.view())?;

        debug!(?features, cluster_id, "Predicted segment");

        Ok(Prediction {
            cluster_id,
            description: describe(cluster_id),
        })
    }
}

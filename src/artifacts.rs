//! Loading and saving the persisted scaler and cluster model
//!
//! Each artifact file starts with a four byte tag identifying its kind,
//! followed by a postcard-encoded record:
//!
//! | artifact | tag    | record                                   |
//! |----------|--------|------------------------------------------|
//! | scaler   | `TSCL` | `format_version`, `mean`, `scale`        |
//! | model    | `TKMM` | `format_version`, `centroids` (row-major) |

use crate::data::{ScalingTransform, N_FEATURES};
use crate::error::SegmentError;
use crate::model::ClusterModel;
use ndarray::{Array1, Array2};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Current on-disk format version for both artifacts
pub const FORMAT_VERSION: u16 = 1;

const SCALER_TAG: &[u8; 4] = b"TSCL";
const MODEL_TAG: &[u8; 4] = b"TKMM";

#[derive(Debug, Serialize, Deserialize)]
struct ScalerRecord {
    format_version: u16,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ModelRecord {
    format_version: u16,
    centroids: Vec<Vec<f64>>,
}

/// The two pre-fitted artifacts, loaded once and shared read-only
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    scaler: ScalingTransform,
    model: ClusterModel,
}

impl ArtifactStore {
    /// Load both artifacts from disk.
    ///
    /// Fails if either file is missing, corrupt, of the wrong kind or
    /// version, or not fitted on exactly three features.
    pub fn load(model_path: &Path, scaler_path: &Path) -> Result<Self, SegmentError> {
        let scaler = load_scaler(scaler_path)?;
        let model = load_model(model_path)?;

        if scaler.n_features() != N_FEATURES {
            return Err(SegmentError::artifact_load(
                scaler_path,
                format!(
                    "scaler expects {} features, this application supplies {}",
                    scaler.n_features(),
                    N_FEATURES
                ),
            ));
        }
        if model.n_features() != N_FEATURES {
            return Err(SegmentError::artifact_load(
                model_path,
                format!(
                    "model expects {} features, this application supplies {}",
                    model.n_features(),
                    N_FEATURES
                ),
            ));
        }

        info!(
            model = %model_path.display(),
            scaler = %scaler_path.display(),
            n_clusters = model.n_clusters(),
            "Loaded clustering artifacts"
        );

        Ok(Self { scaler, model })
    }

    /// Build a store from in-memory artifacts without the feature-count check
    pub fn from_parts(scaler: ScalingTransform, model: ClusterModel) -> Self {
        Self { scaler, model }
    }

    pub fn scaler(&self) -> &ScalingTransform {
        &self.scaler
    }

    pub fn model(&self) -> &ClusterModel {
        &self.model
    }
}

/// Read a scaler artifact
pub fn load_scaler(path: &Path) -> Result<ScalingTransform, SegmentError> {
    let record: ScalerRecord = read_record(path, SCALER_TAG)?;
    check_version(path, record.format_version)?;

    ScalingTransform::new(Array1::from(record.mean), Array1::from(record.scale))
        .map_err(|e| SegmentError::artifact_load(path, e.to_string()))
}

/// Read a cluster model artifact
pub fn load_model(path: &Path) -> Result<ClusterModel, SegmentError> {
    let record: ModelRecord = read_record(path, MODEL_TAG)?;
    check_version(path, record.format_version)?;

    let n_clusters = record.centroids.len();
    let n_features = record.centroids.first().map_or(0, Vec::len);
    if record.centroids.iter().any(|row| row.len() != n_features) {
        return Err(SegmentError::artifact_load(
            path,
            "centroid rows have differing lengths",
        ));
    }

    let flat: Vec<f64> = record.centroids.into_iter().flatten().collect();
    let centroids = Array2::from_shape_vec((n_clusters, n_features), flat)
        .map_err(|e| SegmentError::artifact_load(path, e.to_string()))?;

    ClusterModel::new(centroids).map_err(|e| SegmentError::artifact_load(path, e.to_string()))
}

/// Write a scaler artifact
pub fn save_scaler(scaler: &ScalingTransform, path: &Path) -> crate::Result<()> {
    let record = ScalerRecord {
        format_version: FORMAT_VERSION,
        mean: scaler.mean().to_vec(),
        scale: scaler.scale().to_vec(),
    };
    write_record(path, SCALER_TAG, &record)
}

/// Write a cluster model artifact
pub fn save_model(model: &ClusterModel, path: &Path) -> crate::Result<()> {
    let record = ModelRecord {
        format_version: FORMAT_VERSION,
        centroids: model
            .centroids()
            .outer_iter()
            .map(|row| row.to_vec())
            .collect(),
    };
    write_record(path, MODEL_TAG, &record)
}

fn read_record<T: DeserializeOwned>(path: &Path, tag: &[u8; 4]) -> Result<T, SegmentError> {
    let bytes =
        std::fs::read(path).map_err(|e| SegmentError::artifact_load(path, e.to_string()))?;

    let payload = bytes.strip_prefix(tag.as_slice()).ok_or_else(|| {
        SegmentError::artifact_load(
            path,
            format!(
                "not a {} artifact",
                String::from_utf8_lossy(tag.as_slice())
            ),
        )
    })?;

    postcard::from_bytes(payload)
        .map_err(|e| SegmentError::artifact_load(path, format!("corrupt artifact: {}", e)))
}

fn write_record<T: Serialize>(path: &Path, tag: &[u8; 4], record: &T) -> crate::Result<()> {
    let mut bytes = tag.to_vec();
    bytes.extend(postcard::to_stdvec(record)?);
    std::fs::write(path, bytes)?;
    Ok(())
}

fn check_version(path: &Path, version: u16) -> Result<(), SegmentError> {
    if version != FORMAT_VERSION {
        return Err(SegmentError::artifact_load(
            path,
            format!(
                "unsupported format version {} (expected {})",
                version, FORMAT_VERSION
            ),
        ));
    }
    Ok(())
}

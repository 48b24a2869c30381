//! Pre-fitted K-Means cluster model

use crate::error::SegmentError;
use ndarray::{Array2, ArrayView1};

/// K-Means model reduced to its fitted centroids
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterModel {
    /// Cluster centroids in standardized feature space, one row per cluster
    centroids: Array2<f64>,
}

impl ClusterModel {
    /// Wrap fitted centroids. At least one centroid is required and all
    /// coordinates must be finite.
    pub fn new(centroids: Array2<f64>) -> Result<Self, SegmentError> {
        if centroids.nrows() == 0 || centroids.ncols() == 0 {
            return Err(SegmentError::InvalidInput(
                "cluster model needs at least one centroid".to_string(),
            ));
        }
        if centroids.iter().any(|c| !c.is_finite()) {
            return Err(SegmentError::InvalidInput(
                "centroid coordinates must be finite".to_string(),
            ));
        }
        Ok(Self { centroids })
    }

    pub fn n_clusters(&self) -> usize {
        self.centroids.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.centroids.ncols()
    }

    pub fn centroids(&self) -> &Array2<f64> {
        &self.centroids
    }

    /// Assign a standardized sample to its nearest centroid.
    ///
    /// Ties resolve to the lowest cluster id, so the result is deterministic.
    pub fn predict(&self, features: ArrayView1<'_, f64>) -> Result<usize, SegmentError> {
        if features.len() != self.n_features() {
            return Err(SegmentError::ModelShape {
                expected: self.n_features(),
                actual: features.len(),
            });
        }

        let mut min_distance = f64::INFINITY;
        let mut closest_cluster = 0;

        for (cluster_idx, centroid) in self.centroids.outer_iter().enumerate() {
            let distance = squared_distance(&features, &centroid);
            if distance < min_distance {
                min_distance = distance;
                closest_cluster = cluster_idx;
            }
        }

        Ok(closest_cluster)
    }
}

fn squared_distance(a: &ArrayView1<'_, f64>, b: &ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn three_cluster_model() -> ClusterModel {
        ClusterModel::new(array![
            [-1.0, -1.0, -1.0],
            [0.3, -0.8, 1.5],
            [1.5, 1.5, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_predict_nearest_centroid() {
        let model = three_cluster_model();

        assert_eq!(model.predict(array![-0.9, -1.2, -0.8].view()).unwrap(), 0);
        assert_eq!(model.predict(array![0.4, -1.15, 1.97].view()).unwrap(), 1);
        assert_eq!(model.predict(array![2.0, 1.0, 1.0].view()).unwrap(), 2);
    }

    #[test]
    fn test_predict_tie_picks_lowest_id() {
        let model = ClusterModel::new(array![[1.0, 0.0], [-1.0, 0.0]]).unwrap();
        assert_eq!(model.predict(array![0.0, 0.0].view()).unwrap(), 0);
    }

    #[test]
    fn test_predict_shape_mismatch() {
        let model = three_cluster_model();
        let result = model.predict(array![0.0, 0.0].view());
        assert!(matches!(
            result,
            Err(SegmentError::ModelShape {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_new_rejects_empty_and_non_finite() {
        assert!(ClusterModel::new(Array2::zeros((0, 3))).is_err());
        assert!(ClusterModel::new(array![[0.0, f64::NAN, 0.0]]).is_err());
    }

    #[test]
    fn test_dimensions() {
        let model = three_cluster_model();
        assert_eq!(model.n_clusters(), 3);
        assert_eq!(model.n_features(), 3);
        assert_eq!(model.centroids().shape(), &[3, 3]);
    }
}

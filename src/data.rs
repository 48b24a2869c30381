//! Behavioural feature vectors and the pre-fitted standard scaler

use crate::error::SegmentError;
use ndarray::{Array1, ArrayView1};

/// Number of behavioural features the artifacts are trained on
pub const N_FEATURES: usize = 3;

/// Feature names in model column order
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "Yearly Average Views on Travel Page",
    "Yearly Average Outstation Check-ins",
    "Daily Average Minutes Spent on Traveling Page",
];

/// Raw behavioural features for one customer, as entered by the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub yearly_avg_views: f64,
    pub yearly_avg_checkins: f64,
    pub daily_avg_minutes: f64,
}

impl FeatureVector {
    pub fn new(yearly_avg_views: f64, yearly_avg_checkins: f64, daily_avg_minutes: f64) -> Self {
        Self {
            yearly_avg_views,
            yearly_avg_checkins,
            daily_avg_minutes,
        }
    }

    /// Components in model column order
    pub fn as_array(&self) -> [f64; N_FEATURES] {
        [
            self.yearly_avg_views,
            self.yearly_avg_checkins,
            self.daily_avg_minutes,
        ]
    }

    /// Reject negative or non-finite components
    pub fn validate(&self) -> Result<(), SegmentError> {
        for (name, value) in FEATURE_NAMES.iter().zip(self.as_array()) {
            if !value.is_finite() {
                return Err(SegmentError::InvalidInput(format!(
                    "{} must be a finite number",
                    name
                )));
            }
            if value < 0.0 {
                return Err(SegmentError::InvalidInput(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for FeatureVector {
    /// Form defaults shown on the prediction page
    fn default() -> Self {
        Self::new(300.0, 5.0, 30.0)
    }
}

/// Standard scaler fitted on the training distribution.
///
/// Holds the per-feature mean and scale (standard deviation) learned at
/// training time. Inference only ever applies the transform; it is never
/// refitted on incoming samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingTransform {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl ScalingTransform {
    /// Build a transform from fitted parameters.
    ///
    /// `mean` and `scale` must have the same length, and every scale entry
    /// must be finite and strictly positive.
    pub fn new(mean: Array1<f64>, scale: Array1<f64>) -> Result<Self, SegmentError> {
        if mean.len() != scale.len() {
            return Err(SegmentError::ModelShape {
                expected: mean.len(),
                actual: scale.len(),
            });
        }
        if mean.iter().any(|m| !m.is_finite()) {
            return Err(SegmentError::InvalidInput(
                "scaler mean must be finite".to_string(),
            ));
        }
        if scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(SegmentError::InvalidInput(
                "scaler scale must be finite and positive".to_string(),
            ));
        }
        Ok(Self { mean, scale })
    }

    /// Build a transform from fitted per-feature variances
    pub fn from_variance(mean: Array1<f64>, variance: Array1<f64>) -> Result<Self, SegmentError> {
        Self::new(mean, variance.mapv(f64::sqrt))
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn scale(&self) -> &Array1<f64> {
        &self.scale
    }

    /// Standardize a sample with the fitted statistics
    pub fn transform(&self, sample: ArrayView1<'_, f64>) -> Result<Array1<f64>, SegmentError> {
        if sample.len() != self.n_features() {
            return Err(SegmentError::ModelShape {
                expected: self.n_features(),
                actual: sample.len(),
            });
        }
        Ok((&sample - &self.mean) / &self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn travel_scaler() -> ScalingTransform {
        ScalingTransform::new(array![276.0, 9.6, 15.2], array![60.0, 4.0, 7.4]).unwrap()
    }

    #[test]
    fn test_validate_accepts_zero() {
        assert!(FeatureVector::new(0.0, 0.0, 0.0).validate().is_ok());
        assert!(FeatureVector::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        let negative = FeatureVector::new(300.0, -1.0, 30.0);
        match negative.validate() {
            Err(SegmentError::InvalidInput(msg)) => assert!(msg.contains("Check-ins")),
            other => panic!("expected invalid input, got {:?}", other),
        }

        let nan = FeatureVector::new(f64::NAN, 5.0, 30.0);
        assert!(matches!(nan.validate(), Err(SegmentError::InvalidInput(_))));

        let inf = FeatureVector::new(300.0, 5.0, f64::INFINITY);
        assert!(matches!(inf.validate(), Err(SegmentError::InvalidInput(_))));
    }

    #[test]
    fn test_transform_uses_fitted_statistics() {
        let scaler = travel_scaler();
        let scaled = scaler.transform(array![336.0, 9.6, 0.4].view()).unwrap();

        assert!((scaled[0] - 1.0).abs() < 1e-12);
        assert!(scaled[1].abs() < 1e-12);
        assert!((scaled[2] + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_single_sample_is_not_degenerate() {
        // A refit on one sample would map everything to zero.
        let scaler = travel_scaler();
        let scaled = scaler.transform(array![300.0, 5.0, 30.0].view()).unwrap();
        assert!(scaled.iter().any(|v| v.abs() > 0.1));
    }

    #[test]
    fn test_transform_shape_mismatch() {
        let scaler = travel_scaler();
        let result = scaler.transform(array![1.0, 2.0].view());
        assert!(matches!(
            result,
            Err(SegmentError::ModelShape {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_new_rejects_bad_scale() {
        assert!(ScalingTransform::new(array![0.0, 0.0], array![1.0, 0.0]).is_err());
        assert!(ScalingTransform::new(array![0.0, 0.0], array![1.0, f64::NAN]).is_err());
        assert!(ScalingTransform::new(array![0.0, 0.0, 0.0], array![1.0, 1.0]).is_err());
    }

    #[test]
    fn test_from_variance() {
        let scaler =
            ScalingTransform::from_variance(array![0.0, 0.0, 0.0], array![4.0, 9.0, 16.0]).unwrap();
        assert_eq!(scaler.scale(), &array![2.0, 3.0, 4.0]);
    }
}

//! Fixed segment descriptions and display data baked in at build time

/// Returned when the model yields a cluster id with no written description
pub const FALLBACK_DESCRIPTION: &str = "Cluster description not available";

const CLUSTER_DESCRIPTIONS: [&str; 3] = [
    "Cluster 0 - 'Casual Browsers': Few page views, rare outstation check-ins and short \
     daily sessions. These customers look at travel content now and then but seldom act \
     on it; broad awareness campaigns suit them best.",
    "Cluster 1 - 'Occasional Travelers': Moderate page views and a handful of check-ins \
     a year, with above-average time on the travel page. They plan a few trips a year \
     and respond well to targeted seasonal offers.",
    "Cluster 2 - 'Frequent Explorers': Heavy page views, frequent outstation check-ins \
     and long daily sessions. The most engaged segment and the natural audience for \
     loyalty programs and premium packages.",
];

/// Description for a cluster id, falling back to [`FALLBACK_DESCRIPTION`]
pub fn describe(cluster_id: usize) -> &'static str {
    CLUSTER_DESCRIPTIONS
        .get(cluster_id)
        .copied()
        .unwrap_or(FALLBACK_DESCRIPTION)
}

/// Per-cluster averages of the training data in original units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterSummary {
    pub cluster_id: usize,
    pub label: &'static str,
    pub customers: usize,
    pub avg_views: f64,
    pub avg_checkins: f64,
    pub avg_minutes: f64,
}

pub const CLUSTER_SUMMARIES: [ClusterSummary; 3] = [
    ClusterSummary {
        cluster_id: 0,
        label: "Casual Browsers",
        customers: 4_612,
        avg_views: 214.8,
        avg_checkins: 5.1,
        avg_minutes: 9.3,
    },
    ClusterSummary {
        cluster_id: 1,
        label: "Occasional Travelers",
        customers: 3_947,
        avg_views: 293.5,
        avg_checkins: 6.4,
        avg_minutes: 26.1,
    },
    ClusterSummary {
        cluster_id: 2,
        label: "Frequent Explorers",
        customers: 3_201,
        avg_views: 341.2,
        avg_checkins: 19.7,
        avg_minutes: 21.6,
    },
];

/// One point of the elbow curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElbowPoint {
    pub k: u32,
    pub inertia: f64,
}

/// Within-cluster sum of squares for K = 1..5 on the standardized training set
pub const ELBOW_CURVE: [ElbowPoint; 5] = [
    ElbowPoint { k: 1, inertia: 35_280.0 },
    ElbowPoint { k: 2, inertia: 21_904.6 },
    ElbowPoint { k: 3, inertia: 12_417.3 },
    ElbowPoint { k: 4, inertia: 10_268.9 },
    ElbowPoint { k: 5, inertia: 8_935.2 },
];

/// A column of the customer behaviour dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetColumn {
    pub name: &'static str,
    pub description: &'static str,
}

pub const DATASET_ROWS: usize = 11_760;

pub const DATASET_COLUMNS: [DatasetColumn; 4] = [
    DatasetColumn {
        name: "UserID",
        description: "Unique identifier of the customer",
    },
    DatasetColumn {
        name: "Yearly_avg_view_on_travel_page",
        description: "Average number of times the customer viewed travel pages per year",
    },
    DatasetColumn {
        name: "Yearly_avg_Outstation_checkins",
        description: "Average number of outstation check-ins the customer made per year",
    },
    DatasetColumn {
        name: "Daily_Avg_mins_spend_on_traveling_page",
        description: "Average minutes per day the customer spent on the traveling page",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_known_clusters() {
        assert!(describe(0).starts_with("Cluster 0 - 'Casual Browsers':"));
        assert!(describe(1).starts_with("Cluster 1 - 'Occasional Travelers':"));
        assert!(describe(2).starts_with("Cluster 2 - 'Frequent Explorers':"));
    }

    #[test]
    fn test_describe_falls_back() {
        assert_eq!(describe(3), FALLBACK_DESCRIPTION);
        assert_eq!(describe(usize::MAX), FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_summaries_match_descriptions() {
        for summary in CLUSTER_SUMMARIES {
            assert!(describe(summary.cluster_id).contains(summary.label));
        }
        let total: usize = CLUSTER_SUMMARIES.iter().map(|s| s.customers).sum();
        assert_eq!(total, DATASET_ROWS);
    }

    #[test]
    fn test_elbow_curve_is_decreasing() {
        for pair in ELBOW_CURVE.windows(2) {
            assert_eq!(pair[1].k, pair[0].k + 1);
            assert!(pair[1].inertia < pair[0].inertia);
        }
    }
}

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::statistics::{BucketStat, ModeCounts, ScholarStatRecord};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StatisticsQuery {
    /// Faculty bucket to drill into, e.g. `Engineering`
    pub faculty: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    /// Buckets sorted by total, largest first
    pub faculty_stats: Vec<BucketStat>,
    pub mode_stats: ModeCounts,
    pub total: u64,
    /// Per-department breakdown of the requested faculty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_stats: Option<Vec<BucketStat>>,
    /// Scholars in the requested faculty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_records: Option<Vec<ScholarStatRecord>>,
}

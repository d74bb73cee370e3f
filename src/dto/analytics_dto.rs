use crate::models::analytics::{DemographicKey, ResultMetric};
use crate::utils::stats::MeanInterval;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistogramBucket {
    pub value: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DemographicsResponse {
    pub key: DemographicKey,
    pub buckets: Vec<HistogramBucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricPoint {
    pub taken_at: NaiveDateTime,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricSeriesResponse {
    pub metric: ResultMetric,
    pub points: Vec<MetricPoint>,
}

/// Mean and 95% interval half-width, truncated to whole units for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WindowSummary {
    pub samples: usize,
    pub mean: i64,
    pub ci_half_width: i64,
}

impl From<MeanInterval> for WindowSummary {
    fn from(ci: MeanInterval) -> Self {
        Self {
            samples: ci.samples,
            mean: ci.mean.trunc() as i64,
            ci_half_width: ci.half_width.trunc() as i64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimeOfDayWindow {
    pub points: Vec<MetricPoint>,
    pub summary: Option<WindowSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimeOfDayResponse {
    pub metric: ResultMetric,
    pub morning: TimeOfDayWindow,
    pub evening: TimeOfDayWindow,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TimeOfDayQuery {
    pub metric: Option<ResultMetric>,
}

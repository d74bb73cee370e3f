use crate::dto::analytics_dto::{
    DemographicsResponse, HistogramBucket, MetricPoint, MetricSeriesResponse, TimeOfDayResponse,
    TimeOfDayWindow,
};
use crate::error::Result;
use crate::models::analytics::{DemographicKey, ResultMetric};
use crate::utils::stats::mean_confidence_interval;
use crate::utils::time::{age_in_years, parse_test_timestamp, today};
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

pub const MORNING_HOURS: RangeInclusive<u32> = 6..=11;
pub const EVENING_HOURS: RangeInclusive<u32> = 17..=22;

/// Read-only projections behind the dashboard charts.
#[derive(Clone)]
pub struct AnalyticsService {
    pool: PgPool,
}

impl AnalyticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn demographics(&self, key: DemographicKey) -> Result<DemographicsResponse> {
        let buckets = match key.column() {
            Some(column) => {
                let sql = format!(
                    "SELECT {column} AS value, COUNT(*) AS count FROM clients \
                     WHERE {column} IS NOT NULL GROUP BY {column} ORDER BY count DESC, value ASC"
                );
                sqlx::query_as::<_, (String, i64)>(&sql)
                    .fetch_all(&self.pool)
                    .await?
                    .into_iter()
                    .map(|(value, count)| HistogramBucket { value, count })
                    .collect()
            }
            None => {
                let dobs: Vec<NaiveDate> =
                    sqlx::query_scalar(r#"SELECT date_of_birth FROM clients"#)
                        .fetch_all(&self.pool)
                        .await?;
                age_histogram(&dobs, today())
            }
        };
        Ok(DemographicsResponse { key, buckets })
    }

    pub async fn metric_series(
        &self,
        client_id: &str,
        metric: ResultMetric,
    ) -> Result<MetricSeriesResponse> {
        let sql = format!(
            "SELECT date, created_at, CAST({} AS DOUBLE PRECISION) AS value \
             FROM cogspeed_test_results WHERE client_id = $1",
            metric.column()
        );
        let rows = sqlx::query_as::<_, (String, DateTime<Utc>, f64)>(&sql)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;

        let mut points: Vec<MetricPoint> = rows
            .into_iter()
            .map(|(date, created_at, value)| MetricPoint {
                taken_at: parse_test_timestamp(&date).unwrap_or_else(|| created_at.naive_utc()),
                value,
            })
            .collect();
        points.sort_by_key(|p| p.taken_at);

        Ok(MetricSeriesResponse { metric, points })
    }

    pub async fn time_of_day(
        &self,
        client_id: &str,
        metric: ResultMetric,
    ) -> Result<TimeOfDayResponse> {
        let series = self.metric_series(client_id, metric).await?;
        Ok(compare_time_of_day(metric, series.points))
    }
}

/// Age histogram ordered by age, with ages under 13 reported as 13.
pub fn age_histogram(dates_of_birth: &[NaiveDate], on: NaiveDate) -> Vec<HistogramBucket> {
    let mut counts: BTreeMap<i32, i64> = BTreeMap::new();
    for dob in dates_of_birth {
        *counts.entry(age_in_years(*dob, on)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(age, count)| HistogramBucket {
            value: age.to_string(),
            count,
        })
        .collect()
}

pub fn compare_time_of_day(metric: ResultMetric, points: Vec<MetricPoint>) -> TimeOfDayResponse {
    let (morning, rest): (Vec<_>, Vec<_>) = points
        .into_iter()
        .partition(|p| MORNING_HOURS.contains(&p.taken_at.hour()));
    let evening = rest
        .into_iter()
        .filter(|p| EVENING_HOURS.contains(&p.taken_at.hour()))
        .collect();

    TimeOfDayResponse {
        metric,
        morning: summarize_window(morning),
        evening: summarize_window(evening),
    }
}

fn summarize_window(points: Vec<MetricPoint>) -> TimeOfDayWindow {
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    TimeOfDayWindow {
        summary: mean_confidence_interval(&values).map(Into::into),
        points,
    }
}

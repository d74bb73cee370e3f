use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

pub const NOT_AVAILABLE: &str = "n/a";

/// Rolling-mean ratio reported per round. The test client sends the literal
/// string `"n/a"` until enough rounds exist to compute it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Numeric(f64),
    NotAvailable,
}

impl Ratio {
    /// NaN and infinities have no JSON form, so they are refused on input.
    fn finite(v: f64) -> Result<Self, String> {
        if v.is_finite() {
            Ok(Ratio::Numeric(v))
        } else {
            Err(format!("ratio must be a finite number, got {}", v))
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Numeric(v) => write!(f, "{}", v),
            Ratio::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl FromStr for Ratio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == NOT_AVAILABLE {
            return Ok(Ratio::NotAvailable);
        }
        match s.parse::<f64>() {
            Ok(v) => Ratio::finite(v),
            Err(_) => Err(format!(
                "expected a number or \"{}\", got {:?}",
                NOT_AVAILABLE, s
            )),
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ratio::Numeric(v) => serializer.serialize_f64(*v),
            Ratio::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Ratio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(v) => Ratio::finite(v).map_err(serde::de::Error::custom),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CogspeedTestResult {
    pub client_id: String,
    pub id: String,
    pub status_code: i32,
    pub status: String,
    pub success: bool,
    pub message: String,
    pub test_duration: i32,
    pub number_of_rounds: i32,
    pub blocking_round_duration: i32,
    pub cognitive_processing_index: i32,
    pub machine_paced_baseline: f64,
    pub version: String,
    pub fatigue_level: i32,
    pub number_of_roll_mean_limit_exceedences: i32,
    pub final_ratio: f64,
    pub block_count: i32,
    pub lowest_block_time: f64,
    pub highest_block_time: f64,
    pub block_range: f64,
    pub final_block_diff: f64,
    pub total_machine_paced_answers: i32,
    pub total_machine_paced_correct_answers: i32,
    pub total_machine_paced_incorrect_answers: i32,
    pub total_machine_paced_no_response_answers: i32,
    pub quickest_response: f64,
    pub quickest_correct_response: f64,
    pub slowest_response: f64,
    pub slowest_correct_response: f64,
    pub mean_machine_paced_answer_time: f64,
    pub mean_correct_machine_paced_answer_time: f64,
    pub date: String,
    pub date_minute_offset: i32,
    pub normalized_location: String,
    pub local_date: String,
    pub local_time: String,
    pub config_version: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CogspeedTestRound {
    pub client_id: String,
    pub test_id: String,
    pub num: i32,
    pub round_type: String,
    pub duration: f64,
    pub response: f64,
    pub status: String,
    pub ratio: f64,
    /// Text form of [`Ratio`].
    pub rm: String,
    pub query: String,
    pub location: String,
    pub clicked: bool,
    pub previous: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct TestResultSummary {
    pub id: String,
    pub date: String,
    pub number_of_rounds: i32,
    pub blocking_round_duration: i32,
    pub test_duration: i32,
    pub fatigue_level: i32,
    pub created_at: DateTime<Utc>,
}

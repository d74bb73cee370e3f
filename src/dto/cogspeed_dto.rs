use crate::error::{Error, Result};
use crate::models::cogspeed::{CogspeedTestResult, CogspeedTestRound, Ratio};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One round as sent by the Cogspeed test client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CogspeedTestRoundPayload {
    pub num: i32,
    #[serde(rename = "Type")]
    #[schema(example = "user_paced")]
    pub round_type: String,
    pub duration: f64,
    pub response: f64,
    #[schema(example = "no_response")]
    pub status: String,
    pub ratio: f64,
    #[schema(value_type = Object, example = "n/a")]
    pub rm: Ratio,
    pub query: String,
    pub location: String,
    pub clicked: bool,
    pub previous: String,
}

/// Completed test session. Field names follow the test client's camelCase
/// wire format; the stored columns are snake_case.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CogspeedTestResultPayload {
    pub id: String,
    #[serde(rename = "client_id")]
    pub client_id: String,
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
    #[serde(rename = "_date")]
    #[schema(example = "29/06/2025, 21:14:21")]
    pub date: String,
    #[serde(rename = "_date_minute_offset")]
    pub date_minute_offset: i32,
    pub normalized_location: String,
    pub local_date: String,
    pub local_time: String,
    pub config_version: Option<String>,
    pub rounds: Vec<CogspeedTestRoundPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CogspeedTestResultResponse {
    #[serde(flatten)]
    pub result: CogspeedTestResultPayload,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CogspeedTestRound> for CogspeedTestRoundPayload {
    type Error = Error;

    fn try_from(r: CogspeedTestRound) -> Result<Self> {
        let rm = r.rm.parse::<Ratio>().map_err(|e| {
            Error::Internal(format!(
                "Stored round {} of test {} has an unreadable rm value: {}",
                r.num, r.test_id, e
            ))
        })?;
        Ok(Self {
            num: r.num,
            round_type: r.round_type,
            duration: r.duration,
            response: r.response,
            status: r.status,
            ratio: r.ratio,
            rm,
            query: r.query,
            location: r.location,
            clicked: r.clicked,
            previous: r.previous,
        })
    }
}

impl CogspeedTestResultResponse {
    pub fn from_stored(result: CogspeedTestResult, rounds: Vec<CogspeedTestRound>) -> Result<Self> {
        let rounds = rounds
            .into_iter()
            .map(CogspeedTestRoundPayload::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            created_at: result.created_at,
            result: CogspeedTestResultPayload {
                id: result.id,
                client_id: result.client_id,
                status_code: result.status_code,
                status: result.status,
                success: result.success,
                message: result.message,
                test_duration: result.test_duration,
                number_of_rounds: result.number_of_rounds,
                blocking_round_duration: result.blocking_round_duration,
                cognitive_processing_index: result.cognitive_processing_index,
                machine_paced_baseline: result.machine_paced_baseline,
                version: result.version,
                fatigue_level: result.fatigue_level,
                number_of_roll_mean_limit_exceedences: result
                    .number_of_roll_mean_limit_exceedences,
                final_ratio: result.final_ratio,
                block_count: result.block_count,
                lowest_block_time: result.lowest_block_time,
                highest_block_time: result.highest_block_time,
                block_range: result.block_range,
                final_block_diff: result.final_block_diff,
                total_machine_paced_answers: result.total_machine_paced_answers,
                total_machine_paced_correct_answers: result.total_machine_paced_correct_answers,
                total_machine_paced_incorrect_answers: result
                    .total_machine_paced_incorrect_answers,
                total_machine_paced_no_response_answers: result
                    .total_machine_paced_no_response_answers,
                quickest_response: result.quickest_response,
                quickest_correct_response: result.quickest_correct_response,
                slowest_response: result.slowest_response,
                slowest_correct_response: result.slowest_correct_response,
                mean_machine_paced_answer_time: result.mean_machine_paced_answer_time,
                mean_correct_machine_paced_answer_time: result
                    .mean_correct_machine_paced_answer_time,
                date: result.date,
                date_minute_offset: result.date_minute_offset,
                normalized_location: result.normalized_location,
                local_date: result.local_date,
                local_time: result.local_time,
                config_version: result.config_version,
                rounds,
            },
        })
    }
}

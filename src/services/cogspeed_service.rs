use crate::dto::cogspeed_dto::{CogspeedTestResultPayload, CogspeedTestResultResponse};
use crate::error::{unique_violation, Error, Result};
use crate::models::cogspeed::{CogspeedTestResult, CogspeedTestRound, TestResultSummary};
use sqlx::{PgPool, Postgres, QueryBuilder};

const RESULT_PRIMARY_KEY: &str = "cogspeed_test_results_pkey";

/// Postgres caps one statement at `u16::MAX` bind parameters.
const MAX_BIND_PARAMS: usize = u16::MAX as usize;
const ROUND_COLUMNS: usize = 13;
const ROUNDS_PER_INSERT: usize = MAX_BIND_PARAMS / ROUND_COLUMNS;

#[derive(Clone)]
pub struct CogspeedService {
    pool: PgPool,
}

impl CogspeedService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Stores a completed test and all of its rounds in one transaction.
    /// The payload must belong to the authenticated caller.
    pub async fn submit(
        &self,
        authenticated_client_id: &str,
        submission: CogspeedTestResultPayload,
    ) -> Result<()> {
        if submission.client_id != authenticated_client_id {
            return Err(Error::BadRequest(format!(
                "The client ID in the header ('{}') does not match the client ID in the body ('{}').",
                authenticated_client_id, submission.client_id
            )));
        }

        if submission.rounds.len() != submission.number_of_rounds.max(0) as usize {
            tracing::warn!(
                client_id = %submission.client_id,
                test_id = %submission.id,
                declared = submission.number_of_rounds,
                received = submission.rounds.len(),
                "round count does not match numberOfRounds"
            );
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO cogspeed_test_results (
                client_id, id, status_code, status, success, message,
                test_duration, number_of_rounds, blocking_round_duration,
                cognitive_processing_index, machine_paced_baseline, version,
                fatigue_level, number_of_roll_mean_limit_exceedences, final_ratio,
                block_count, lowest_block_time, highest_block_time, block_range,
                final_block_diff, total_machine_paced_answers,
                total_machine_paced_correct_answers, total_machine_paced_incorrect_answers,
                total_machine_paced_no_response_answers, quickest_response,
                quickest_correct_response, slowest_response, slowest_correct_response,
                mean_machine_paced_answer_time, mean_correct_machine_paced_answer_time,
                date, date_minute_offset, normalized_location, local_date, local_time,
                config_version
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30,
                $31, $32, $33, $34, $35, $36
            )
            "#,
        )
        .bind(&submission.client_id)
        .bind(&submission.id)
        .bind(submission.status_code)
        .bind(&submission.status)
        .bind(submission.success)
        .bind(&submission.message)
        .bind(submission.test_duration)
        .bind(submission.number_of_rounds)
        .bind(submission.blocking_round_duration)
        .bind(submission.cognitive_processing_index)
        .bind(submission.machine_paced_baseline)
        .bind(&submission.version)
        .bind(submission.fatigue_level)
        .bind(submission.number_of_roll_mean_limit_exceedences)
        .bind(submission.final_ratio)
        .bind(submission.block_count)
        .bind(submission.lowest_block_time)
        .bind(submission.highest_block_time)
        .bind(submission.block_range)
        .bind(submission.final_block_diff)
        .bind(submission.total_machine_paced_answers)
        .bind(submission.total_machine_paced_correct_answers)
        .bind(submission.total_machine_paced_incorrect_answers)
        .bind(submission.total_machine_paced_no_response_answers)
        .bind(submission.quickest_response)
        .bind(submission.quickest_correct_response)
        .bind(submission.slowest_response)
        .bind(submission.slowest_correct_response)
        .bind(submission.mean_machine_paced_answer_time)
        .bind(submission.mean_correct_machine_paced_answer_time)
        .bind(&submission.date)
        .bind(submission.date_minute_offset)
        .bind(&submission.normalized_location)
        .bind(&submission.local_date)
        .bind(&submission.local_time)
        .bind(&submission.config_version)
        .execute(&mut *tx)
        .await
        .map_err(|e| match unique_violation(&e) {
            Some(constraint) if constraint == RESULT_PRIMARY_KEY => Error::Conflict(format!(
                "Test result '{}' has already been submitted",
                submission.id
            )),
            _ => Error::from(e),
        })?;

        for chunk in submission.rounds.chunks(ROUNDS_PER_INSERT) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO cogspeed_test_rounds (client_id, test_id, num, round_type, duration, \
                 response, status, ratio, rm, query, location, clicked, previous) ",
            );
            builder.push_values(chunk, |mut row, round| {
                row.push_bind(submission.client_id.clone())
                    .push_bind(submission.id.clone())
                    .push_bind(round.num)
                    .push_bind(round.round_type.clone())
                    .push_bind(round.duration)
                    .push_bind(round.response)
                    .push_bind(round.status.clone())
                    .push_bind(round.ratio)
                    .push_bind(round.rm.to_string())
                    .push_bind(round.query.clone())
                    .push_bind(round.location.clone())
                    .push_bind(round.clicked)
                    .push_bind(round.previous.clone());
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::info!(
            client_id = %submission.client_id,
            test_id = %submission.id,
            rounds = submission.rounds.len(),
            "cogspeed test result stored"
        );
        Ok(())
    }

    pub async fn get_result(
        &self,
        client_id: &str,
        test_id: &str,
    ) -> Result<Option<CogspeedTestResultResponse>> {
        let result = sqlx::query_as::<_, CogspeedTestResult>(
            r#"SELECT * FROM cogspeed_test_results WHERE client_id = $1 AND id = $2"#,
        )
        .bind(client_id)
        .bind(test_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(result) = result else {
            return Ok(None);
        };

        let rounds = sqlx::query_as::<_, CogspeedTestRound>(
            r#"
            SELECT * FROM cogspeed_test_rounds
            WHERE client_id = $1 AND test_id = $2
            ORDER BY num ASC
            "#,
        )
        .bind(client_id)
        .bind(test_id)
        .fetch_all(&self.pool)
        .await?;

        CogspeedTestResultResponse::from_stored(result, rounds).map(Some)
    }

    pub async fn list_results(&self, client_id: &str) -> Result<Vec<TestResultSummary>> {
        let results = sqlx::query_as::<_, TestResultSummary>(
            r#"
            SELECT id, date, number_of_rounds, blocking_round_duration, test_duration,
                   fatigue_level, created_at
            FROM cogspeed_test_results
            WHERE client_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(results)
    }

    /// Removes a result together with its rounds. Not routed; reserved for
    /// administrative clean-up.
    pub async fn delete_result(&self, client_id: &str, test_id: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(r#"DELETE FROM cogspeed_test_rounds WHERE client_id = $1 AND test_id = $2"#)
            .bind(client_id)
            .bind(test_id)
            .execute(&mut *tx)
            .await?;

        let deleted =
            sqlx::query(r#"DELETE FROM cogspeed_test_results WHERE client_id = $1 AND id = $2"#)
                .bind(client_id)
                .bind(test_id)
                .execute(&mut *tx)
                .await?;

        tx.commit().await?;
        Ok(deleted.rows_affected() > 0)
    }
}

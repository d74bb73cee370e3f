mod common;

use axum::http::StatusCode;
use cogspeed_api::services::cogspeed_service::CogspeedService;
use common::*;
use serde_json::json;
use uuid::Uuid;

fn test_id() -> String {
    Uuid::new_v4().to_string()
}

#[tokio::test]
async fn submission_without_credentials_is_unauthorized() {
    let app = offline_app(None);
    let body = test_result("Gcqp4RbdvH", &test_id(), vec![round(1, json!("n/a"))]);
    let (status, body) = send_json(&app, post_json("/clients/cogspeed/tests", &body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Missing X-API-Key or X-Client-ID header");
}

#[tokio::test]
#[ignore = "needs Postgres at DATABASE_URL"]
async fn submitted_rounds_are_read_back_in_order() {
    let pool = database().await;
    let app = app(pool);
    let (client_id, api_key) = register(&app).await;

    let id = test_id();
    let rounds = vec![
        round(3, json!(0.5)),
        round(1, json!("n/a")),
        round(2, json!(1.0)),
        round(4, json!("0.25")),
        round(5, json!("n/a")),
    ];
    let payload = test_result(&client_id, &id, rounds);
    let (status, body) = send_json(
        &app,
        authed("POST", "/clients/cogspeed/tests", &client_id, &api_key, Some(&payload)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!(201));

    let uri = format!("/clients/cogspeed/tests/{id}");
    let (status, stored) = send_json(&app, authed("GET", &uri, &client_id, &api_key, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["id"], id.as_str());
    assert_eq!(stored["client_id"], client_id.as_str());
    assert_eq!(stored["numberOfRounds"], 5);
    assert_eq!(stored["blockRange"], 200.0);
    assert!(stored["createdAt"].is_string());

    let rounds = stored["rounds"].as_array().unwrap();
    let nums: Vec<i64> = rounds.iter().map(|r| r["Num"].as_i64().unwrap()).collect();
    assert_eq!(nums, vec![1, 2, 3, 4, 5]);
    assert_eq!(rounds[0]["Rm"], "n/a");
    assert_eq!(rounds[1]["Rm"], 1.0);
    assert_eq!(rounds[3]["Rm"], 0.25);
    assert_eq!(rounds[4]["Type"], "machine_paced");

    let (status, list) = send_json(
        &app,
        authed("GET", "/clients/cogspeed/tests", &client_id, &api_key, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id.as_str());
}

#[tokio::test]
#[ignore = "needs Postgres at DATABASE_URL"]
async fn submission_larger_than_one_insert_batch_is_stored() {
    let pool = database().await;
    let app = app(pool);
    let (client_id, api_key) = register(&app).await;

    let id = test_id();
    let rounds = (1..=5100).rev().map(|n| round(n, json!(0.5))).collect();
    let payload = test_result(&client_id, &id, rounds);
    let (status, _) = send_json(
        &app,
        authed("POST", "/clients/cogspeed/tests", &client_id, &api_key, Some(&payload)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/clients/cogspeed/tests/{id}");
    let (status, stored) = send_json(&app, authed("GET", &uri, &client_id, &api_key, None)).await;
    assert_eq!(status, StatusCode::OK);
    let nums: Vec<i64> = stored["rounds"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["Num"].as_i64().unwrap())
        .collect();
    assert_eq!(nums, (1..=5100).collect::<Vec<i64>>());
}

#[tokio::test]
#[ignore = "needs Postgres at DATABASE_URL"]
async fn non_finite_ratio_is_refused_without_writing() {
    let pool = database().await;
    let app = app(pool);
    let (client_id, api_key) = register(&app).await;

    let id = test_id();
    let payload = test_result(&client_id, &id, vec![round(1, json!("NaN"))]);
    let (status, body) = send_json(
        &app,
        authed("POST", "/clients/cogspeed/tests", &client_id, &api_key, Some(&payload)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "invalid_json");

    let uri = format!("/clients/cogspeed/tests/{id}");
    let (status, _) = send_json(&app, authed("GET", &uri, &client_id, &api_key, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "needs Postgres at DATABASE_URL"]
async fn mismatched_client_id_is_rejected_without_writing() {
    let pool = database().await;
    let app = app(pool);
    let (client_id, api_key) = register(&app).await;

    let id = test_id();
    let payload = test_result("someoneElse", &id, vec![round(1, json!("n/a"))]);
    let (status, body) = send_json(
        &app,
        authed("POST", "/clients/cogspeed/tests", &client_id, &api_key, Some(&payload)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains(&client_id));
    assert!(detail.contains("someoneElse"));

    let uri = format!("/clients/cogspeed/tests/{id}");
    let (status, _) = send_json(&app, authed("GET", &uri, &client_id, &api_key, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "needs Postgres at DATABASE_URL"]
async fn resubmitting_a_test_conflicts() {
    let pool = database().await;
    let app = app(pool);
    let (client_id, api_key) = register(&app).await;

    let payload = test_result(&client_id, &test_id(), vec![round(1, json!(1.0))]);
    let submit = || authed("POST", "/clients/cogspeed/tests", &client_id, &api_key, Some(&payload));

    let (status, _) = send_json(&app, submit()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send_json(&app, submit()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}

#[tokio::test]
#[ignore = "needs Postgres at DATABASE_URL"]
async fn failed_round_insert_leaves_no_result() {
    let pool = database().await;
    let app = app(pool);
    let (client_id, api_key) = register(&app).await;

    let id = test_id();
    let payload = test_result(&client_id, &id, vec![round(1, json!(1.0)), round(1, json!(0.5))]);
    let (status, _) = send_json(
        &app,
        authed("POST", "/clients/cogspeed/tests", &client_id, &api_key, Some(&payload)),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let uri = format!("/clients/cogspeed/tests/{id}");
    let (status, _) = send_json(&app, authed("GET", &uri, &client_id, &api_key, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "needs Postgres at DATABASE_URL"]
async fn results_are_private_to_their_owner() {
    let pool = database().await;
    let app = app(pool);
    let (owner_id, owner_key) = register(&app).await;
    let (other_id, other_key) = register(&app).await;

    let id = test_id();
    let payload = test_result(&owner_id, &id, vec![round(1, json!(1.0))]);
    let (status, _) = send_json(
        &app,
        authed("POST", "/clients/cogspeed/tests", &owner_id, &owner_key, Some(&payload)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/clients/cogspeed/tests/{id}");
    let (status, body) = send_json(&app, authed("GET", &uri, &other_id, &other_key, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Test result not found");
}

#[tokio::test]
#[ignore = "needs Postgres at DATABASE_URL"]
async fn metric_series_and_time_of_day_follow_test_dates() {
    let pool = database().await;
    let app = app(pool);
    let (client_id, api_key) = register(&app).await;

    for (date, brd) in [
        ("30/06/2025, 20:10:00", 1200),
        ("29/06/2025, 08:14:21", 1000),
    ] {
        let mut payload = test_result(&client_id, &test_id(), vec![round(1, json!(1.0))]);
        payload["_date"] = json!(date);
        payload["blockingRoundDuration"] = json!(brd);
        let (status, _) = send_json(
            &app,
            authed("POST", "/clients/cogspeed/tests", &client_id, &api_key, Some(&payload)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, series) = send_json(
        &app,
        authed(
            "GET",
            "/clients/cogspeed/metrics/blocking_round_duration",
            &client_id,
            &api_key,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let values: Vec<f64> = series["points"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["value"].as_f64().unwrap())
        .collect();
    assert_eq!(values, vec![1000.0, 1200.0]);

    let (status, comparison) = send_json(
        &app,
        authed(
            "GET",
            "/clients/cogspeed/time-of-day?metric=blocking_round_duration",
            &client_id,
            &api_key,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comparison["morning"]["summary"]["mean"], 1000);
    assert_eq!(comparison["morning"]["summary"]["ci_half_width"], 0);
    assert_eq!(comparison["evening"]["summary"]["mean"], 1200);
    assert_eq!(comparison["evening"]["summary"]["samples"], 1);

    let (status, body) = send_json(
        &app,
        authed(
            "GET",
            "/clients/cogspeed/metrics/favourite_colour",
            &client_id,
            &api_key,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
#[ignore = "needs Postgres at DATABASE_URL"]
async fn deleting_a_result_removes_its_rounds() {
    let pool = database().await;
    let app = app(pool.clone());
    let (client_id, api_key) = register(&app).await;

    let id = test_id();
    let payload = test_result(&client_id, &id, vec![round(1, json!(1.0)), round(2, json!("n/a"))]);
    let (status, _) = send_json(
        &app,
        authed("POST", "/clients/cogspeed/tests", &client_id, &api_key, Some(&payload)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let service = CogspeedService::new(pool.clone());
    assert!(service.delete_result(&client_id, &id).await.unwrap());
    assert!(service.get_result(&client_id, &id).await.unwrap().is_none());
    assert!(!service.delete_result(&client_id, &id).await.unwrap());

    let leftover: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM cogspeed_test_rounds WHERE client_id = $1 AND test_id = $2",
    )
    .bind(&client_id)
    .bind(&id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(leftover, 0);
}

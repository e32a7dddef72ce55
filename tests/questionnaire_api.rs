//! HTTP-level tests for the question catalog, questionnaire submission and
//! assessment history.

mod common;

use axum::http::StatusCode;
use common::{
    build_test_app, count, expect_status, get, get_auth, post_json_auth, register, submit,
    test_pool, FakeDetector,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn catalog_is_seeded_and_ordered() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());

    let json = expect_status(get(app, "/api/v1/questions").await, StatusCode::OK).await;
    let list = json["data"].as_array().unwrap();

    assert_eq!(list.len(), 10);
    let orders: Vec<i64> = list.iter().map(|q| q["order_num"].as_i64().unwrap()).collect();
    assert_eq!(orders, (1..=10).collect::<Vec<_>>());
    assert_eq!(list[0]["type"], "single");
    assert_eq!(list[0]["options"].as_array().unwrap().len(), 5);
    assert_eq!(list[0]["options"][0], "Never");
}

#[tokio::test]
async fn catalog_filters_by_category_and_enabled() {
    let pool = test_pool().await;
    sqlx::query("UPDATE questions SET enabled = 0 WHERE id = 1")
        .execute(&pool)
        .await
        .unwrap();
    let app = build_test_app(pool, FakeDetector::no_face());

    let json = expect_status(
        get(app.clone(), "/api/v1/questions?category=anxiety").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json = expect_status(
        get(app.clone(), "/api/v1/questions?enabled=true").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 9);

    let json = expect_status(
        get(app, "/api/v1/questions?enabled=false").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"][0]["id"], 1);
}

#[tokio::test]
async fn single_question_lookup() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());

    let json = expect_status(get(app.clone(), "/api/v1/questions/2").await, StatusCode::OK).await;
    assert_eq!(json["data"]["id"], 2);

    expect_status(get(app.clone(), "/api/v1/questions/999").await, StatusCode::NOT_FOUND).await;
    expect_status(get(app, "/api/v1/questions/abc").await, StatusCode::BAD_REQUEST).await;
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submission_scores_and_persists() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());
    let (_user_id, token) = register(app.clone(), "scorer").await;

    // weight 2, ordinal 4 on all ten questions: 80 points
    let answers: Vec<(i64, i64)> = (1..=10).map(|id| (id, 4)).collect();
    let json = expect_status(submit(app.clone(), &token, &answers).await, StatusCode::OK).await;

    let data = &json["data"];
    assert_eq!(data["score"], 80);
    assert_eq!(data["max_score"], 100);
    assert_eq!(data["percentage"], 80.0);
    assert_eq!(data["level"], "severe");
    assert!(!data["suggestions"].as_array().unwrap().is_empty());

    let assessment_id = data["assessment_id"].as_str().unwrap();
    let json = expect_status(
        get_auth(app, &format!("/api/v1/assessments/{assessment_id}"), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["status"], "completed");
    assert_eq!(json["data"]["type"], "questionnaire");
    assert_eq!(json["data"]["total_score"], 80);
    let answers = json["data"]["answers"].as_array().unwrap();
    assert_eq!(answers.len(), 10);
    assert!(answers.iter().all(|a| a["content"] == "Often" && a["score"] == 8));
}

#[tokio::test]
async fn unknown_question_rolls_back_the_whole_submission() {
    let pool = test_pool().await;
    let app = build_test_app(pool.clone(), FakeDetector::no_face());
    let (user_id, token) = register(app.clone(), "atomic").await;

    let answers = [(1, 3), (2, 3), (4242, 3), (4, 3), (5, 3)];
    let json = expect_status(submit(app, &token, &answers).await, StatusCode::BAD_REQUEST).await;

    assert_eq!(json["message"], "Question 4242 does not exist");
    assert_eq!(count(&pool, "assessments", &user_id).await, 0);
    assert_eq!(count(&pool, "answers", &user_id).await, 0);
}

#[tokio::test]
async fn repeated_questions_are_each_scored() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());
    let (_user_id, token) = register(app.clone(), "repeater").await;

    let json = expect_status(submit(app.clone(), &token, &[(3, 2), (3, 3), (7, 1)]).await, StatusCode::OK).await;
    // (2 + 3 + 1) x weight 2
    assert_eq!(json["data"]["score"], 12);

    let id = json["data"]["assessment_id"].as_str().unwrap();
    let json = get_auth(app, &format!("/api/v1/assessments/{id}"), &token).await;
    let json = expect_status(json, StatusCode::OK).await;
    assert_eq!(json["data"]["answers"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn out_of_range_ordinal_is_labelled_invalid_but_still_scored() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());
    let (_user_id, token) = register(app.clone(), "quirk").await;

    let json = expect_status(submit(app.clone(), &token, &[(1, 9)]).await, StatusCode::OK).await;
    assert_eq!(json["data"]["score"], 18);

    let id = json["data"]["assessment_id"].as_str().unwrap();
    let json = get_auth(app, &format!("/api/v1/assessments/{id}"), &token).await;
    let json = expect_status(json, StatusCode::OK).await;
    assert_eq!(json["data"]["answers"][0]["content"], "invalid option 9");
    assert_eq!(json["data"]["answers"][0]["score"], 18);
}

#[tokio::test]
async fn totals_above_the_max_score_are_not_capped() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());
    let (_user_id, token) = register(app.clone(), "overflow").await;

    let answers: Vec<(i64, i64)> = (1..=10).map(|id| (id, 6)).collect();
    let json = expect_status(submit(app, &token, &answers).await, StatusCode::OK).await;

    assert_eq!(json["data"]["score"], 120);
    assert_eq!(json["data"]["max_score"], 100);
    assert_eq!(json["data"]["level"], "severe");
}

#[tokio::test]
async fn malformed_submissions_are_rejected() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());
    let (_user_id, token) = register(app.clone(), "sloppy").await;

    expect_status(submit(app.clone(), &token, &[]).await, StatusCode::BAD_REQUEST).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/questionnaire/submit",
        &token,
        json!({ "answers": [{ "question_id": "one" }] }),
    )
    .await;
    expect_status(response, StatusCode::BAD_REQUEST).await;

    let response = common::post_json(
        app,
        "/api/v1/questionnaire/submit",
        json!({ "answers": [{ "question_id": 1, "answer_value": 1 }] }),
    )
    .await;
    expect_status(response, StatusCode::UNAUTHORIZED).await;
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn assessments_can_be_created_but_not_as_combined() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());
    let (_user_id, token) = register(app.clone(), "creator").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/assessment",
        &token,
        json!({ "title": "Morning check", "type": "face" }),
    )
    .await;
    let json = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(json["data"]["status"], "in_progress");
    assert_eq!(json["data"]["level"], serde_json::Value::Null);

    let response = post_json_auth(
        app,
        "/api/v1/assessment",
        &token,
        json!({ "title": "Both", "type": "combined" }),
    )
    .await;
    expect_status(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn assessment_history_is_paginated_and_private() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());
    let (_alice_id, alice) = register(app.clone(), "alice").await;
    let (_bob_id, bob) = register(app.clone(), "bob").await;

    for ordinal in 1..=3 {
        expect_status(submit(app.clone(), &alice, &[(1, ordinal)]).await, StatusCode::OK).await;
    }

    let json = expect_status(
        get_auth(app.clone(), "/api/v1/assessments?page=2&page_size=2", &alice).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["total"], 3);
    assert_eq!(json["data"]["page"], 2);
    assert_eq!(json["data"]["page_size"], 2);
    let list = json["data"]["list"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    // newest first: the oldest submission (ordinal 1) lands on the last page
    assert_eq!(list[0]["total_score"], 2);

    let id = list[0]["id"].as_str().unwrap();
    expect_status(
        get_auth(app.clone(), &format!("/api/v1/assessments/{id}"), &bob).await,
        StatusCode::NOT_FOUND,
    )
    .await;

    let json = expect_status(
        get_auth(app, "/api/v1/assessments", &bob).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["total"], 0);
}

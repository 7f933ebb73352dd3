use serde_json::json;
use sqlx::{postgres::PgRow, Row};

use crate::helpers::TestApp;

#[tokio::test]
async fn subscribe_returns_200_and_persists_the_new_subscriber() {
    let test_app = TestApp::spawn_app().await;
    let body = json!({
        "email": "subscriber@test.com",
        "dailyNewsletter": true,
        "podcasts": true
    });

    let response = test_app.post_subscribe(&body).await;

    assert_eq!(200, response.status().as_u16());

    let response_body: serde_json::Value = response.json().await.unwrap();

    assert_eq!(response_body["message"], "Subscriber added");

    let row = sqlx::query("SELECT * FROM subscribers;")
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Query to fetch subscribers failed.");

    assert_eq!(row.get::<String, _>("email"), "subscriber@test.com");
    assert!(row.get::<bool, _>("daily_newsletter"));
    assert!(!row.get::<bool, _>("advertising_updates"));
    assert!(!row.get::<bool, _>("weekin_review"));
    assert!(!row.get::<bool, _>("event_updates"));
    assert!(!row.get::<bool, _>("startup_weekly"));
    assert!(row.get::<bool, _>("podcasts"));
}

#[tokio::test]
async fn subscribe_publishes_one_email_request_listing_selected_categories() {
    let test_app = TestApp::spawn_app().await;
    let body = json!({
        "email": "subscriber@test.com",
        "dailyNewsletter": true
    });

    test_app.post_subscribe(&body).await;

    let email_requests = test_app.received_email_requests().await;

    assert_eq!(email_requests.len(), 1);

    let email_request = &email_requests[0];

    assert_eq!(email_request["recipientAddress"], "subscriber@test.com");
    assert_eq!(email_request["subject"], "Subscription Confirmation");

    let html_content = email_request["htmlContent"].as_str().unwrap();

    assert!(html_content.contains("<li>Daily Newsletter</li>"));
    assert!(!html_content.contains("<li>Advertising Updates</li>"));
    assert!(!html_content.contains("<li>Week in Review</li>"));
    assert!(!html_content.contains("<li>Event Updates</li>"));
    assert!(!html_content.contains("<li>Startup Weekly</li>"));
    assert!(!html_content.contains("<li>Podcasts</li>"));
}

#[tokio::test]
async fn subscribing_twice_keeps_one_record_with_the_latest_flags() {
    let test_app = TestApp::spawn_app().await;

    test_app
        .post_subscribe(&json!({
            "email": "subscriber@test.com",
            "dailyNewsletter": true
        }))
        .await;

    let response = test_app
        .post_subscribe(&json!({
            "email": "subscriber@test.com",
            "weekinReview": true,
            "eventUpdates": true
        }))
        .await;

    assert_eq!(200, response.status().as_u16());

    let response_body: serde_json::Value = response.json().await.unwrap();

    assert_eq!(response_body["message"], "Subscriber Updated");

    // fetch_one fails unless the upsert left exactly one record
    let row: PgRow = sqlx::query("SELECT * FROM subscribers;")
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Expected exactly one subscriber record.");

    assert!(!row.get::<bool, _>("daily_newsletter"));
    assert!(row.get::<bool, _>("weekin_review"));
    assert!(row.get::<bool, _>("event_updates"));
}

#[tokio::test]
async fn subscribe_returns_400_when_body_is_invalid() {
    let test_app = TestApp::spawn_app().await;

    // This is a common practice and it is called table-driven tests. In this case, it simulates different kind of possible request bodies
    // where API should return 400.
    let test_cases: Vec<(serde_json::Value, &str)> = vec![
        (json!({}), "missing email parameter"),
        (json!({ "dailyNewsletter": true }), "missing email parameter"),
        (
            json!({ "email": "not-an-email", "dailyNewsletter": true }),
            "invalid email parameter",
        ),
        (json!({ "email": "" }), "empty email parameter"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_subscribe(&invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            error_message
        );
    }
}

#[tokio::test]
async fn subscribe_returns_500_when_the_store_rejects_the_insert() {
    let test_app = TestApp::spawn_app().await;

    // Sabotage the table so the insert cannot succeed
    sqlx::query("ALTER TABLE subscribers DROP COLUMN podcasts;")
        .execute(&test_app.db_pool)
        .await
        .unwrap();

    let response = test_app
        .post_subscribe(&json!({
            "email": "subscriber@test.com",
            "dailyNewsletter": true
        }))
        .await;

    assert_eq!(500, response.status().as_u16());
}

#[tokio::test]
async fn subscribe_still_returns_200_when_the_queue_is_unreachable() {
    let test_app = TestApp::spawn_app_with_unreachable_queue().await;

    let response = test_app
        .post_subscribe(&json!({
            "email": "subscriber@test.com",
            "dailyNewsletter": true
        }))
        .await;

    // The store mutation is authoritative; the failed publish is only logged
    assert_eq!(200, response.status().as_u16());

    let row = sqlx::query("SELECT email FROM subscribers;")
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Query to fetch subscribers failed.");

    assert_eq!(row.get::<String, _>("email"), "subscriber@test.com");
}

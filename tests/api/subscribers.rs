use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn listing_returns_an_empty_array_when_there_are_no_subscribers() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.get_subscribers().await;

    assert_eq!(200, response.status().as_u16());

    let subscribers: Vec<serde_json::Value> = response.json().await.unwrap();

    assert!(subscribers.is_empty());
}

#[tokio::test]
async fn listing_returns_every_subscriber_with_their_flags() {
    let test_app = TestApp::spawn_app().await;

    test_app
        .post_subscribe(&json!({
            "email": "first@test.com",
            "dailyNewsletter": true
        }))
        .await;
    test_app
        .post_subscribe(&json!({
            "email": "second@test.com",
            "podcasts": true
        }))
        .await;

    let response = test_app.get_subscribers().await;

    assert_eq!(200, response.status().as_u16());

    let subscribers: Vec<serde_json::Value> = response.json().await.unwrap();

    assert_eq!(subscribers.len(), 2);

    // Order is not part of the contract, so look records up by email
    let first = subscribers
        .iter()
        .find(|subscriber| subscriber["email"] == "first@test.com")
        .expect("first@test.com is missing from the listing");

    assert_eq!(first["dailyNewsletter"], true);
    assert_eq!(first["advertisingUpdates"], false);
    assert_eq!(first["weekinReview"], false);
    assert_eq!(first["eventUpdates"], false);
    assert_eq!(first["startupWeekly"], false);
    assert_eq!(first["podcasts"], false);

    let second = subscribers
        .iter()
        .find(|subscriber| subscriber["email"] == "second@test.com")
        .expect("second@test.com is missing from the listing");

    assert_eq!(second["dailyNewsletter"], false);
    assert_eq!(second["podcasts"], true);
}

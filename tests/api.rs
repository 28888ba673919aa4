//! End-to-end tests against the full router over an in-memory database.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use twitter_lite_api::db::models::User;
use twitter_lite_api::db::{self, TweetRepository, UserRepository};
use twitter_lite_api::{app, config::Config, state::AppState};

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: "sqlite::memory:".into(),
        jwt_secret: "test-secret".into(),
        jwt_expires_in: 3600,
        bcrypt_cost: 4,
        cors_origin: None,
    }
}

struct TestApp {
    router: Router,
    state: AppState,
}

impl TestApp {
    async fn new() -> Self {
        let config = test_config();
        let pool = db::connect(&config.database_url).await.unwrap();
        let state = AppState::from_pool(pool, &config);
        TestApp {
            router: app(state.clone()),
            state,
        }
    }

    async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Sign up a user and return its token.
    async fn token(&self) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/users",
                None,
                Some(json!({ "username": "alice", "email": "alice@example.com", "password": "s3cret" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn tweet_lifecycle() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let token = Some(token.as_str());

    let (status, body) = app.send("POST", "/tweets", token, Some(json!({ "message": "hello" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweet"]["id"], 1);
    assert_eq!(body["tweet"]["message"], "hello");
    assert!(body["tweet"]["createdAt"].is_string());

    let (status, body) = app.send("GET", "/tweets/1", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tweet"]["id"], 1);
    assert_eq!(body["tweet"]["message"], "hello");

    let (status, body) = app.send("DELETE", "/tweets/1", token, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = app.send("GET", "/tweets/1", token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "title": "Tweet not found" }));
}

#[tokio::test]
async fn list_wraps_collection() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let token = Some(token.as_str());

    let (status, body) = app.send("GET", "/tweets", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "tweets": [] }));

    app.send("POST", "/tweets", token, Some(json!({ "message": "one" }))).await;
    app.send("POST", "/tweets", token, Some(json!({ "message": "two" }))).await;

    let (_, body) = app.send("GET", "/tweets", token, None).await;
    let messages: Vec<&str> = body["tweets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["one", "two"]);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let token = Some(token.as_str());

    for id in ["1", "999", "abc", "9999999999999999999999"] {
        let (status, body) = app.send("GET", &format!("/tweets/{}", id), token, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "id {}", id);
        assert_eq!(body["title"], "Tweet not found");
    }
}

#[tokio::test]
async fn message_round_trips_up_to_270_chars() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let token = Some(token.as_str());

    for message in ["a".to_string(), "ünïcödé ✓".to_string(), "x".repeat(270)] {
        let (status, body) = app.send("POST", "/tweets", token, Some(json!({ "message": message }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tweet"]["message"], message.as_str());
    }
}

#[tokio::test]
async fn long_or_missing_message_is_bad_request() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let token = Some(token.as_str());

    let (status, body) = app
        .send("POST", "/tweets", token, Some(json!({ "message": "x".repeat(271) })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Bad request.");
    assert!(!body["errors"].as_array().unwrap().is_empty());

    let (status, body) = app.send("POST", "/tweets", token, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["Please provide a message."]));

    let (_, body) = app.send("GET", "/tweets", token, None).await;
    assert_eq!(body["tweets"], json!([]));
}

#[tokio::test]
async fn update_existing_tweet() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let token = Some(token.as_str());

    app.send("POST", "/tweets", token, Some(json!({ "message": "before" }))).await;

    let (status, body) = app.send("PUT", "/tweets/1", token, Some(json!({ "message": "after" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedTweet"]["id"], 1);
    assert_eq!(body["updatedTweet"]["message"], "after");

    let (_, body) = app.send("GET", "/tweets/1", token, None).await;
    assert_eq!(body["tweet"]["message"], "after");
}

#[tokio::test]
async fn update_missing_tweet_is_not_found_and_writes_nothing() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let token = Some(token.as_str());

    let (status, body) = app.send("PUT", "/tweets/5", token, Some(json!({ "message": "ghost" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Tweet not found");

    assert!(app.state.tweets.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_without_body_checks_existence_first() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let token = Some(token.as_str());

    let (status, body) = app.send("PUT", "/tweets/999", token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "title": "Tweet not found" }));

    app.send("POST", "/tweets", token, Some(json!({ "message": "keep me" }))).await;

    let (status, body) = app.send("PUT", "/tweets/1", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedTweet"]["id"], 1);
    assert_eq!(body["updatedTweet"]["message"], "keep me");
}

#[tokio::test]
async fn update_does_not_cap_message_length() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let token = Some(token.as_str());

    app.send("POST", "/tweets", token, Some(json!({ "message": "short" }))).await;

    let long = "y".repeat(400);
    let (status, body) = app.send("PUT", "/tweets/1", token, Some(json!({ "message": long }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedTweet"]["message"], long.as_str());

    let stored = app.state.tweets.find(1).await.unwrap().unwrap();
    assert_eq!(stored.message.chars().count(), 400);
}

#[tokio::test]
async fn delete_missing_tweet_is_not_found() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let (status, body) = app.send("DELETE", "/tweets/5", Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Tweet not found");
}

#[tokio::test]
async fn non_numeric_ids_do_not_match_update_or_delete() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let token = Some(token.as_str());

    let (unmatched_status, unmatched_body) = app.send("GET", "/no/such/route", None, None).await;
    assert_eq!(unmatched_status, StatusCode::NOT_FOUND);
    assert_eq!(unmatched_body["title"], "Resource Not Found");

    let (status, body) = app.send("PUT", "/tweets/abc", token, Some(json!({ "message": "x" }))).await;
    assert_eq!((status, &body), (unmatched_status, &unmatched_body));

    let (status, body) = app.send("DELETE", "/tweets/1a", token, None).await;
    assert_eq!((status, &body), (unmatched_status, &unmatched_body));
}

#[tokio::test]
async fn unsupported_methods_look_like_unmatched_routes() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let token = Some(token.as_str());

    app.send("POST", "/tweets", token, Some(json!({ "message": "hello" }))).await;

    let (unmatched_status, unmatched_body) = app.send("GET", "/no/such/route", None, None).await;

    let attempts = [
        ("PATCH", "/tweets/1", Some(json!({ "message": "x" }))),
        ("POST", "/tweets/1", Some(json!({ "message": "x" }))),
        ("PUT", "/tweets", Some(json!({ "message": "x" }))),
        ("DELETE", "/tweets", None),
        ("GET", "/users", None),
    ];
    for (method, uri, body) in attempts {
        let (status, body) = app.send(method, uri, token, body).await;
        assert_eq!((status, &body), (unmatched_status, &unmatched_body), "{} {}", method, uri);
    }

    let (_, body) = app.send("GET", "/tweets/1", token, None).await;
    assert_eq!(body["tweet"]["message"], "hello");
}

#[tokio::test]
async fn tweets_require_authentication() {
    let app = TestApp::new().await;

    let (status, body) = app.send("GET", "/tweets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["title"], "Unauthorized");

    let (status, _) = app.send("POST", "/tweets", Some("garbage"), Some(json!({ "message": "hi" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert!(app.state.tweets.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn token_for_missing_user_is_unauthorized() {
    let app = TestApp::new().await;

    // Validly signed, but no row with this id exists
    let ghost = User {
        id: 999,
        username: "ghost".into(),
        email: "ghost@example.com".into(),
        hashed_password: "x".into(),
        created_at: "2024-01-01T00:00:00+00:00".into(),
        updated_at: "2024-01-01T00:00:00+00:00".into(),
    };
    let token = app.state.tokens.issue(&ghost).unwrap();

    let (status, body) = app.send("GET", "/tweets", Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "title": "Unauthorized", "errors": ["User no longer exists"] }));
}

#[tokio::test]
async fn signup_returns_id_and_token_and_hashes_password() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            "POST",
            "/users",
            None,
            Some(json!({ "username": "bob", "email": "bob@example.com", "password": "plaintext" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["user"]["id"].as_i64().unwrap();
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"].as_object().unwrap().len(), 1);

    let stored = app.state.users.find(id).await.unwrap().unwrap();
    assert_ne!(stored.hashed_password, "plaintext");
    assert!(bcrypt::verify("plaintext", &stored.hashed_password).unwrap());

    // The issued token opens the authenticated routes
    let token = body["token"].as_str().unwrap();
    let (status, _) = app.send("GET", "/tweets", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn signup_without_email_is_bad_request() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send("POST", "/users", None, Some(json!({ "username": "bob", "password": "pw" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Bad request.");
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e.as_str().unwrap().contains("email")));
}

#[tokio::test]
async fn signup_collects_every_field_error() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send("POST", "/users", None, Some(json!({ "email": "not-an-email" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!([
            "Please provide a username",
            "Please provide a valid email.",
            "Please provide a password."
        ])
    );
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new().await;

    let (status, body) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use calorie_tracker::auth::{LoginForm, PasswordChange};
use calorie_tracker::config::ClientOptions;
use calorie_tracker::error::Error;
use calorie_tracker::generations::GenerationRequest;
use calorie_tracker::meals::{MealCategory, MealQuery, MealUpdate, NewMeal};
use calorie_tracker::types::PageRequest;
use calorie_tracker::CalorieTracker;

const USER_ID: &str = "5b1f0e3c-5c43-4b6a-9d0e-6a1c0f3e2b11";
const MEAL_ID: &str = "0d8e4b2a-7f61-4c3e-8a5d-2e9b7c1f4a60";

fn auth_body() -> Value {
    json!({
        "user": { "id": USER_ID, "email": "ola@example.com" },
        "session": {
            "access_token": "token-123",
            "refresh_token": "refresh-456",
            "expires_in": 3600
        }
    })
}

fn meal_body(id: &str, calories: i32) -> Value {
    json!({
        "id": id,
        "description": "Owsianka z bananem",
        "calories": calories,
        "category": "breakfast",
        "meal_timestamp": "2024-05-07T07:30:00Z",
        "input_method": "manual"
    })
}

async fn logged_in(server: &MockServer) -> CalorieTracker {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body()))
        .mount(server)
        .await;

    let tracker = CalorieTracker::new(&server.uri()).unwrap();
    tracker
        .auth()
        .login(&LoginForm::new("ola@example.com", "sekret123"))
        .await
        .unwrap();
    tracker
}

#[tokio::test]
async fn login_stores_session_and_sends_bearer_token() {
    let server = MockServer::start().await;
    let tracker = logged_in(&server).await;

    assert!(tracker.auth().is_logged_in());
    let session = tracker.auth().session().unwrap();
    assert_eq!(session.access_token, "token-123");
    assert!(session.expires_at.is_some());

    Mock::given(method("GET"))
        .and(path("/api/v1/profile"))
        .and(header("Authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": USER_ID,
            "created_at": "2024-01-01T10:00:00Z",
            "updated_at": "2024-01-02T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = tracker.profile().get().await.unwrap();
    assert_eq!(profile.id, Uuid::parse_str(USER_ID).unwrap());
}

#[tokio::test]
async fn login_with_bad_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_json(json!({ "email": "ola@example.com", "password": "zle" })))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let tracker = CalorieTracker::new(&server.uri()).unwrap();
    let err = tracker
        .auth()
        .login(&LoginForm::new("  ola@example.com ", "zle"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Unauthorized(_)));
    assert_eq!(err.user_message(), "Nieprawidłowy email lub hasło");
    assert!(!tracker.auth().is_logged_in());
}

#[tokio::test]
async fn invalid_login_form_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body()))
        .expect(0)
        .mount(&server)
        .await;

    let tracker = CalorieTracker::new(&server.uri()).unwrap();
    let err = tracker
        .auth()
        .login(&LoginForm::new("not-an-email", "x"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn progress_list_sends_limit_and_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/daily-progress"))
        .and(query_param("limit", "30"))
        .and(query_param("offset", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "date": "2024-04-07", "total_calories": 2100, "calorie_goal": 2000, "status": "over" },
                { "date": "2024-04-06", "total_calories": 1950, "calorie_goal": 2000, "status": "on_track" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tracker = CalorieTracker::new(&server.uri()).unwrap();
    let entries = tracker
        .progress()
        .list(PageRequest { limit: 30, offset: 30 })
        .await
        .unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].remaining(), -100);
}

#[tokio::test]
async fn dashboard_pages_through_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/daily-progress"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "date": "2024-05-07", "total_calories": 1800, "calorie_goal": 2000, "status": "under" },
                { "date": "2024-05-06", "total_calories": 2000, "calorie_goal": 2000, "status": "on_track" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/daily-progress"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "date": "2024-05-05", "total_calories": 2500, "calorie_goal": 2000, "status": "over" }
            ]
        })))
        .mount(&server)
        .await;

    let options = ClientOptions::default().with_page_size(2);
    let tracker = CalorieTracker::new_with_options(&server.uri(), options).unwrap();
    let dashboard = tracker.dashboard();

    dashboard.load_initial().await;
    assert!(dashboard.state().entries.has_more);

    dashboard.load_more().await;
    let state = dashboard.state();
    assert_eq!(state.entries.items.len(), 3);
    assert_eq!(state.entries.offset, 3);
    assert!(!state.entries.has_more);

    // Nothing more to fetch; no request goes out.
    dashboard.load_more().await;
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn dashboard_shows_mapped_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/daily-progress"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let tracker = CalorieTracker::new(&server.uri()).unwrap();
    let dashboard = tracker.dashboard();
    dashboard.load_initial().await;

    let state = dashboard.state();
    assert_eq!(
        state.entries.error.as_deref(),
        Some(calorie_tracker::messages::SERVER_ERROR)
    );
    assert!(!state.entries.loading);
}

#[tokio::test]
async fn meals_for_a_day() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/meals"))
        .and(query_param("date", "2024-05-07"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [meal_body(MEAL_ID, 420)]
        })))
        .mount(&server)
        .await;

    let tracker = CalorieTracker::new(&server.uri()).unwrap();
    let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
    let meals = tracker.meals().list(MealQuery::for_day(date, 50)).await.unwrap();

    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0].category, MealCategory::Breakfast);
    assert_eq!(meals[0].day(), date);
}

#[tokio::test]
async fn create_and_update_meal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/meals"))
        .respond_with(ResponseTemplate::new(201).set_body_json(meal_body(MEAL_ID, 420)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("/api/v1/meals/{}", MEAL_ID)))
        .and(body_json(json!({ "calories": 380 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(meal_body(MEAL_ID, 380)))
        .expect(1)
        .mount(&server)
        .await;

    let tracker = CalorieTracker::new(&server.uri()).unwrap();
    let at = Utc.with_ymd_and_hms(2024, 5, 7, 7, 30, 0).unwrap();
    let created = tracker
        .meals()
        .create(&NewMeal::manual("Owsianka z bananem", 420, MealCategory::Breakfast, at))
        .await
        .unwrap();

    let update = MealUpdate {
        calories: Some(380),
        ..Default::default()
    };
    let updated = tracker.meals().update(created.id, &update).await.unwrap();
    assert_eq!(updated.calories, 380);
}

#[tokio::test]
async fn empty_meal_update_is_rejected_locally() {
    let server = MockServer::start().await;
    let tracker = CalorieTracker::new(&server.uri()).unwrap();

    let err = tracker
        .meals()
        .update(Uuid::new_v4(), &MealUpdate::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn estimate_rate_limit_reads_retry_after_from_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/ai-generations"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": "RATE_LIMITED", "message": "slow down", "retry_after": 42 }
        })))
        .mount(&server)
        .await;

    let tracker = CalorieTracker::new(&server.uri()).unwrap();
    let err = tracker
        .generations()
        .estimate(&GenerationRequest::new("dwa jajka sadzone"))
        .await
        .unwrap_err();

    match err {
        Error::RateLimited { retry_after, message } => {
            assert_eq!(retry_after, Some(42));
            assert!(message.contains("42"));
        }
        other => panic!("expected RateLimited, got {:?}", other),
    }
}

#[tokio::test]
async fn estimate_rate_limit_falls_back_to_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/ai-generations"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "15"))
        .mount(&server)
        .await;

    let tracker = CalorieTracker::new(&server.uri()).unwrap();
    let err = tracker
        .generations()
        .estimate(&GenerationRequest::new("kanapka z serem"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RateLimited { retry_after: Some(15), .. }));
}

#[tokio::test]
async fn estimate_becomes_meal_draft() {
    let server = MockServer::start().await;
    let generation_id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/api/v1/ai-generations"))
        .and(body_json(json!({ "description": "kanapka z serem" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": generation_id,
            "prompt": "kanapka z serem",
            "generated_calories": 310,
            "assumptions": "dwie kromki chleba",
            "status": "completed"
        })))
        .mount(&server)
        .await;

    let tracker = CalorieTracker::new(&server.uri()).unwrap();
    let generation = tracker
        .generations()
        .estimate(&GenerationRequest::new("  kanapka z serem  "))
        .await
        .unwrap();

    let draft = generation
        .to_meal_draft(MealCategory::Snack, Utc::now())
        .unwrap();
    assert_eq!(draft.calories, 310);
    assert_eq!(draft.ai_generation_id, Some(generation_id));
}

#[tokio::test]
async fn unknown_status_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/meals/{}", MEAL_ID)))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let tracker = CalorieTracker::new(&server.uri()).unwrap();
    let err = tracker
        .meals()
        .get(Uuid::parse_str(MEAL_ID).unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(err.user_message(), "Forbidden");
}

#[tokio::test]
async fn wrong_current_password_is_reported() {
    let server = MockServer::start().await;
    let tracker = logged_in(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/profile/password"))
        .and(header("Authorization", "Bearer token-123"))
        .and(body_json(json!({
            "current_password": "sekret123",
            "new_password": "nowe-haslo-456"
        })))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let change = PasswordChange {
        current_password: "sekret123".to_string(),
        new_password: "nowe-haslo-456".to_string(),
        confirm_password: "nowe-haslo-456".to_string(),
    };
    let err = tracker.auth().change_password(&change).await.unwrap_err();

    assert_eq!(err.user_message(), "Obecne hasło jest nieprawidłowe");
}

//! Relay endpoint tests: POST /api/save end to end.
//!
//! Covers:
//! - Server-side validation (400 with the specific message)
//! - Unreadable bodies (500) and non-JSON content types (400)
//! - Snapshot file writes, including an unwritable path that must not fail the request
//! - Google Form forwarding: field mapping, tolerated failures, skipped when unconfigured

mod common;

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use hpworld_signup::config::{FormEntryIds, GoogleFormConfig};
use hpworld_signup::handlers::api_handlers;
use hpworld_signup::relay::{GoogleFormForwarder, RelayService};
use hpworld_signup::store::{SubmissionStore, load_snapshot};

use common::*;

fn google_form(base_url: &str) -> GoogleFormConfig {
    GoogleFormConfig {
        base_url: base_url.to_string(),
        form_id: "FORM123".to_string(),
        entries: FormEntryIds {
            name: "11".to_string(),
            mobile: "22".to_string(),
            email: Some("33".to_string()),
            interests: Some("44".to_string()),
            referred_by: Some("55".to_string()),
            ..Default::default()
        },
    }
}

async fn post_save(service: Arc<RelayService>, body: Value) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(service))
            .configure(api_handlers::configure),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/api/save")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_rt::test]
async fn test_save_success_writes_snapshot() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("submissions.json");
    let store = Arc::new(SubmissionStore::open(&path));
    let service = Arc::new(RelayService::new(store.clone(), None));

    let (status, body) = post_save(
        service,
        json!({
            "name": TEST_NAME,
            "mobile": TEST_MOBILE,
            "email": "asha@example.com",
            "interests": ["Printers", "Accessories"],
            "pinCode": "560001"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let saved = load_snapshot(&path).expect("snapshot readable");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].data.name, TEST_NAME);
    assert_eq!(saved[0].data.interests, vec!["Printers", "Accessories"]);
    assert_eq!(store.len().await, 1);
}

#[actix_rt::test]
async fn test_save_accepts_single_string_interest() {
    let store = Arc::new(SubmissionStore::in_memory());
    let service = Arc::new(RelayService::new(store.clone(), None));
    let (status, _) = post_save(
        service,
        json!({ "name": TEST_NAME, "mobile": TEST_MOBILE, "interests": "Printers" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.entries().await[0].data.interests, vec!["Printers"]);
}

#[actix_rt::test]
async fn test_save_repeat_submissions_create_distinct_entries() {
    let store = Arc::new(SubmissionStore::in_memory());
    let service = Arc::new(RelayService::new(store.clone(), None));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(service))
            .configure(api_handlers::configure),
    )
    .await;
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/save")
            .set_json(json!({ "name": TEST_NAME, "mobile": TEST_MOBILE }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
    }
    let entries = store.entries().await;
    assert_eq!(entries.len(), 2);
    assert_ne!(entries[0].id, entries[1].id);
}

#[actix_rt::test]
async fn test_save_validation_errors() {
    let cases = [
        (json!({ "name": "", "mobile": TEST_MOBILE }), "Missing required fields"),
        (json!({ "name": TEST_NAME }), "Missing required fields"),
        (json!({ "name": TEST_NAME, "mobile": "5876543210" }), "Invalid mobile number format"),
        (
            json!({ "name": TEST_NAME, "mobile": TEST_MOBILE, "email": "asha@" }),
            "Invalid email format",
        ),
        (
            json!({ "name": TEST_NAME, "mobile": TEST_MOBILE, "pinCode": "12345" }),
            "Invalid PIN code format",
        ),
        (
            json!({ "name": TEST_NAME, "mobile": TEST_MOBILE, "referredBy": "123" }),
            "Invalid referred by mobile number format",
        ),
    ];

    for (payload, expected) in cases {
        let store = Arc::new(SubmissionStore::in_memory());
        let service = Arc::new(RelayService::new(store.clone(), None));
        let (status, body) = post_save(service, payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(body, json!({ "success": false, "error": expected }));
        assert!(store.is_empty().await, "rejected payload must not be stored");
    }
}

#[actix_rt::test]
async fn test_save_reads_numeric_fields_as_text() {
    let store = Arc::new(SubmissionStore::in_memory());
    let service = Arc::new(RelayService::new(store.clone(), None));
    let (status, body) = post_save(
        service,
        json!({
            "name": TEST_NAME,
            "mobile": 9876543210u64,
            "pinCode": 560001,
            "interests": ["Printers", null]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    let entry = &store.entries().await[0];
    assert_eq!(entry.data.mobile, TEST_MOBILE);
    assert_eq!(entry.data.pin_code, "560001");
    assert_eq!(entry.data.interests, vec!["Printers"]);
}

#[actix_rt::test]
async fn test_save_numeric_field_still_validated() {
    let service = Arc::new(RelayService::new(Arc::new(SubmissionStore::in_memory()), None));
    let (status, body) = post_save(service, json!({ "name": TEST_NAME, "mobile": 12345 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid mobile number format");
}

#[actix_rt::test]
async fn test_save_wrongly_shaped_json_is_bad_request() {
    let cases = [
        (
            json!({ "name": TEST_NAME, "mobile": { "number": TEST_MOBILE } }),
            "Invalid mobile number format",
        ),
        (
            json!({ "name": TEST_NAME, "mobile": TEST_MOBILE, "interests": [["Printers"]] }),
            "Invalid interests value",
        ),
        (json!([TEST_NAME, TEST_MOBILE]), "Missing required fields"),
        (json!(TEST_NAME), "Missing required fields"),
    ];

    for (payload, expected) in cases {
        let store = Arc::new(SubmissionStore::in_memory());
        let service = Arc::new(RelayService::new(store.clone(), None));
        let (status, body) = post_save(service, payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(body, json!({ "success": false, "error": expected }));
        assert!(store.is_empty().await);
    }
}

#[actix_rt::test]
async fn test_save_unreadable_body_is_internal_error() {
    let service = Arc::new(RelayService::new(Arc::new(SubmissionStore::in_memory()), None));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(service))
            .configure(api_handlers::configure),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/api/save")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "success": false, "error": "Internal server error" }));
}

#[actix_rt::test]
async fn test_save_requires_json_content_type() {
    let service = Arc::new(RelayService::new(Arc::new(SubmissionStore::in_memory()), None));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(service))
            .configure(api_handlers::configure),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/api/save")
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload("name=Asha&mobile=9876543210")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_save_unwritable_snapshot_still_succeeds() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    // Parent directory does not exist, so every write fails
    let path = dir.path().join("missing").join("submissions.json");
    let store = Arc::new(SubmissionStore::open(&path));
    let service = Arc::new(RelayService::new(store.clone(), None));

    let receipt = service.accept(valid_form()).await.expect("accepted");
    assert!(receipt.persisted.is_failed());

    let (status, body) = post_save(
        service,
        json!({ "name": TEST_NAME, "mobile": TEST_MOBILE }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(store.len().await, 2);
    assert!(!path.exists());
}

#[actix_rt::test]
async fn test_forward_posts_mapped_fields_to_google_form() {
    let google = MockServer::start(200, json!({}));
    let forwarder = GoogleFormForwarder::new(http_client(), google_form(&google.base_url));
    let service = Arc::new(RelayService::new(
        Arc::new(SubmissionStore::in_memory()),
        Some(forwarder),
    ));

    let (status, _) = post_save(
        service,
        json!({
            "name": TEST_NAME,
            "mobile": TEST_MOBILE,
            "interests": ["Printers", "Monitors"],
            "occupation": "Engineer",
            "referredBy": TEST_REFERRER
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let hits = google.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].path, "/FORM123/formResponse");
    assert!(hits[0].content_type.starts_with("application/x-www-form-urlencoded"));
    let pairs = hits[0].form_pairs();
    let expect = |k: &str, v: &str| (k.to_string(), v.to_string());
    assert!(pairs.contains(&expect("entry.11", TEST_NAME)));
    assert!(pairs.contains(&expect("entry.22", TEST_MOBILE)));
    assert!(pairs.contains(&expect("entry.44", "Printers")));
    assert!(pairs.contains(&expect("entry.44", "Monitors")));
    assert!(pairs.contains(&expect("entry.55", TEST_REFERRER)));
    // Occupation has no entry id configured, email was not supplied
    assert!(!pairs.iter().any(|(_, v)| v == "Engineer"));
    assert!(!pairs.iter().any(|(k, _)| k == "entry.33"));
}

#[actix_rt::test]
async fn test_forward_failures_do_not_fail_the_request() {
    let google = MockServer::start(500, json!({ "error": "boom" }));
    let failing = Arc::new(RelayService::new(
        Arc::new(SubmissionStore::in_memory()),
        Some(GoogleFormForwarder::new(http_client(), google_form(&google.base_url))),
    ));
    let receipt = failing.accept(valid_form()).await.expect("accepted");
    assert!(receipt.forwarded.is_failed());
    let (status, body) = post_save(failing, json!({ "name": TEST_NAME, "mobile": TEST_MOBILE })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let unreachable = Arc::new(RelayService::new(
        Arc::new(SubmissionStore::in_memory()),
        Some(GoogleFormForwarder::new(http_client(), google_form(&dead_url()))),
    ));
    let receipt = unreachable.accept(valid_form()).await.expect("accepted");
    assert!(receipt.forwarded.is_failed());
    let (status, _) = post_save(unreachable, json!({ "name": TEST_NAME, "mobile": TEST_MOBILE })).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_rt::test]
async fn test_forward_redirect_counts_as_delivered() {
    let google = MockServer::start(302, json!({}));
    let service = RelayService::new(
        Arc::new(SubmissionStore::in_memory()),
        Some(GoogleFormForwarder::new(http_client(), google_form(&google.base_url))),
    );
    let receipt = service.accept(valid_form()).await.expect("accepted");
    assert!(receipt.forwarded.is_done());
    assert_eq!(google.hits().len(), 1);
}

#[actix_rt::test]
async fn test_forward_skipped_without_configuration() {
    let service = RelayService::new(Arc::new(SubmissionStore::in_memory()), None);
    let receipt = service.accept(valid_form()).await.expect("accepted");
    assert!(receipt.forwarded.is_skipped());
}

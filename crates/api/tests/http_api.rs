//! In-process scenario tests for the HTTP endpoints.
//!
//! Each test builds the real router over a fresh temporary database and
//! drives it via `tower::ServiceExt::oneshot` - no network I/O except
//! the holiday lookups, which point at an unroutable address and so
//! exercise the degrade-to-empty path.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use flowtrack_api::{build_router, AppContext};
use flowtrack_infra::AppConfig;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt; // oneshot

struct ApiHarness {
    #[allow(dead_code)]
    temp_dir: TempDir,
    router: axum::Router,
}

fn make_harness(api_token: Option<&str>) -> ApiHarness {
    let temp_dir = TempDir::new().expect("temporary directory should be created");
    let config = AppConfig {
        database_path: temp_dir.path().join("api-test.db"),
        pool_size: 2,
        bind_addr: "127.0.0.1:0".parse().expect("test address should parse"),
        // Nothing listens here, so holiday lookups degrade to no holidays.
        holiday_api_base: "http://127.0.0.1:9".to_string(),
        api_token: api_token.map(str::to_string),
    };
    let ctx = Arc::new(AppContext::new(&config).expect("context should wire"));
    ApiHarness { temp_dir, router: build_router(ctx) }
}

async fn call(harness: &ApiHarness, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = harness.router.clone().oneshot(req).await.expect("oneshot failed");
    let status = resp.status();
    let body = resp.into_body().collect().await.expect("body collect failed").to_bytes();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).expect("body is not valid JSON")
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).expect("request should build")
}

fn post_json(uri: &str, payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request should build")
}

fn sample_batch() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "1916409",
            "work item type": "Feature",
            "assigned to": "Bruno",
            "state": "Closed",
            "created date": "26-03-2025 08:47",
            "activated date": "23-04-2025 11:33",
            "closed date": "05-06-2025 11:03",
            "title": "[Estoque] Raiz"
        },
        {
            "id": "1916421",
            "workItemType": "User Story",
            "assignedTo": "Ana",
            "state": "Active",
            "createdDate": "26-03-2025 08:50",
            "title": "Filho",
            "parent": "[Estoque] Raiz"
        }
    ])
}

#[tokio::test]
async fn health_returns_ok() {
    let harness = make_harness(None);
    let (status, json) = call(&harness, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn import_then_reimport_reports_inserted_then_ignored() {
    let harness = make_harness(None);

    let (status, json) = call(&harness, post_json("/work-items/import", &sample_batch())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "inserted": 2, "updated": 0, "ignored": 0 }));

    let (status, json) = call(&harness, post_json("/work-items/import", &sample_batch())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "inserted": 0, "updated": 0, "ignored": 2 }));
}

#[tokio::test]
async fn import_rejects_invalid_records_with_issue_paths() {
    let harness = make_harness(None);
    let payload = serde_json::json!([
        {
            "id": "not-a-number",
            "work item type": "Feature",
            "state": "New",
            "created date": "2025-03-26",
            "title": "Broken"
        }
    ]);

    let (status, json) = call(&harness, post_json("/work-items/import", &payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_input");
    let issues = json["issues"].as_array().expect("issues should be an array");
    assert!(!issues.is_empty());
    assert!(issues.iter().any(|issue| issue["path"] == "items[0].id"));
    assert!(issues.iter().any(|issue| issue["path"] == "items[0].\"created date\""));
}

#[tokio::test]
async fn list_returns_annotated_items_and_summary() {
    let harness = make_harness(None);
    call(&harness, post_json("/work-items/import", &sample_batch())).await;

    let (status, json) = call(&harness, get("/work-items?sortDir=asc")).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["total"], 2);
    let items = json["items"].as_array().expect("items should be an array");
    assert_eq!(items.len(), 2);

    let closed = &items[0];
    assert_eq!(closed["id"], 1_916_409);
    assert_eq!(closed["workItemType"], "Feature");
    assert_eq!(closed["assignedTo"], "Bruno");
    // 23-04-2025 .. 05-06-2025 inclusive, weekends off, no holidays.
    assert_eq!(closed["developmentBusinessDays"], 32);

    let open = &items[1];
    assert_eq!(open["developmentBusinessDays"], serde_json::Value::Null);
    assert_eq!(open["parentId"], 1_916_409);

    assert_eq!(json["summary"]["total"], 2);
    assert_eq!(json["summary"]["closed"], 1);
    assert_eq!(json["summary"]["avgDevelopmentBusinessDays"], 32);
}

#[tokio::test]
async fn list_filters_by_state_and_paginates() {
    let harness = make_harness(None);
    call(&harness, post_json("/work-items/import", &sample_batch())).await;

    let (status, json) = call(&harness, get("/work-items?state=Active")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"][0]["id"], 1_916_421);

    let (status, json) = call(&harness, get("/work-items?limit=1&offset=1&sortDir=desc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);
    assert_eq!(json["items"][0]["id"], 1_916_409);
}

#[tokio::test]
async fn list_filters_by_title_substring() {
    let harness = make_harness(None);
    call(&harness, post_json("/work-items/import", &sample_batch())).await;

    let (status, json) = call(&harness, get("/work-items?titleContains=raiz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"][0]["id"], 1_916_409);

    let (status, json) = call(&harness, get("/work-items?titleContains=nomatch")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn list_rejects_out_of_range_limits() {
    let harness = make_harness(None);

    for uri in ["/work-items?limit=0", "/work-items?limit=500"] {
        let (status, json) = call(&harness, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "expected rejection for {uri}");
        assert_eq!(json["error"], "invalid_input");
        assert_eq!(json["issues"][0]["path"], "limit");
    }

    let (status, _) = call(&harness, get("/work-items?limit=200")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn list_rejects_unsupported_sort_columns() {
    let harness = make_harness(None);

    let (status, json) = call(&harness, get("/work-items?sortBy=title")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_input");
    assert_eq!(json["issues"][0]["path"], "sortBy");

    let (status, _) = call(&harness, get("/work-items?sortBy=id")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn dimension_listings_return_seeded_names() {
    let harness = make_harness(None);
    call(&harness, post_json("/work-items/import", &sample_batch())).await;

    let (status, json) = call(&harness, get("/people?name=bru")).await;
    assert_eq!(status, StatusCode::OK);
    let people = json.as_array().expect("people should be an array");
    assert_eq!(people.len(), 1);
    assert_eq!(people[0]["name"], "Bruno");

    let (status, json) = call(&harness, get("/work-item-types")).await;
    assert_eq!(status, StatusCode::OK);
    let types = json.as_array().expect("types should be an array");
    assert_eq!(types.len(), 2);
}

#[tokio::test]
async fn bearer_token_guards_every_route_except_health() {
    let harness = make_harness(Some("s3cret"));

    let (status, _) = call(&harness, get("/health")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = call(&harness, get("/work-items")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "unauthorized");

    let (status, _) = call(&harness, post_json("/work-items/import", &sample_batch())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let authed = Request::builder()
        .method("GET")
        .uri("/work-items")
        .header(header::AUTHORIZATION, "Bearer s3cret")
        .body(Body::empty())
        .expect("request should build");
    let (status, _) = call(&harness, authed).await;
    assert_eq!(status, StatusCode::OK);
}

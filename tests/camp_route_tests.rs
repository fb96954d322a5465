use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode},
};
use campdesk::config::{SeedActivity, SeedConfig};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

fn temp_db_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "campdesk-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    temp_path
}

async fn cleanup(db_path: &Path) {
    let wal_path = PathBuf::from(format!("{}-wal", db_path.to_string_lossy()));
    let shm_path = PathBuf::from(format!("{}-shm", db_path.to_string_lossy()));
    let _ = tokio::fs::remove_file(&wal_path).await;
    let _ = tokio::fs::remove_file(&shm_path).await;
    let _ = tokio::fs::remove_file(db_path).await;
}

async fn build_app(db_path: &Path, seed: &SeedConfig) -> Router {
    let db = campdesk::db::spawn(&format!("sqlite:{}", db_path.display())).await;
    seed.apply(&db).await.expect("seeding failed");
    let state = campdesk::server::router::CampState::new(db);
    campdesk::server::router::camp_router(state)
}

fn archery_seed() -> SeedConfig {
    SeedConfig {
        activities: vec![SeedActivity {
            name: "Archery".to_string(),
            difficulty: 3,
        }],
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

fn send_json(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

async fn body_string(resp: Response<Body>) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

async fn body_json(resp: Response<Body>) -> Value {
    serde_json::from_str(&body_string(resp).await).expect("response body was not json")
}

#[tokio::test]
async fn signup_scenario_end_to_end() {
    let db_path = temp_db_path("route-scenario");
    let app = build_app(&db_path, &archery_seed()).await;

    // 1) create camper -> 201
    let resp = app
        .clone()
        .oneshot(send_json("POST", "/campers", r#"{"name":"Alex","age":10}"#))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        body_string(resp).await,
        r#"{"id":1,"name":"Alex","age":10}"#
    );

    // 2) create signup -> 201 with nested activity only
    let resp = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/signups",
            r#"{"time":9,"camper_id":1,"activity_id":1}"#,
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        body_string(resp).await,
        r#"{"activity":{"id":1,"name":"Archery","difficulty":3}}"#
    );

    let resp = app.clone().oneshot(get("/signups")).await.unwrap();
    assert_eq!(
        body_json(resp).await,
        json!([{"id": 1, "time": 9, "camper_id": 1, "activity_id": 1}])
    );

    let resp = app
        .clone()
        .oneshot(get("/campers/1/activities"))
        .await
        .unwrap();
    assert_eq!(
        body_json(resp).await,
        json!([{"id": 1, "name": "Archery", "difficulty": 3}])
    );

    // 3) delete activity -> 204, empty body
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/activities/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(body_string(resp).await, "");

    // 4) activities are empty and the signup is gone
    let resp = app.clone().oneshot(get("/activities")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "[]");

    let resp = app.clone().oneshot(get("/signups")).await.unwrap();
    assert_eq!(body_string(resp).await, "[]");

    // 5) deleting again -> 404 with message
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/activities/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Activity not found.");

    cleanup(&db_path).await;
}

#[tokio::test]
async fn camper_routes_validate_and_report_errors() {
    let db_path = temp_db_path("route-campers");
    let app = build_app(&db_path, &SeedConfig::default()).await;

    // age out of range -> 422
    let resp = app
        .clone()
        .oneshot(send_json("POST", "/campers", r#"{"name":"Alex","age":19}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(resp).await,
        json!({"error": {
            "code": "VALIDATION_FAILED",
            "message": "Age must be a number between 8 & 18.",
            "details": {"field": "age"}
        }})
    );

    // non-string name -> 422 on name
    let resp = app
        .clone()
        .oneshot(send_json("POST", "/campers", r#"{"name":12,"age":10}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(resp).await["error"]["details"]["field"], "name");

    // empty name -> 422
    let resp = app
        .clone()
        .oneshot(send_json("POST", "/campers", r#"{"name":"","age":10}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // non-integer age -> 422 on age
    let resp = app
        .clone()
        .oneshot(send_json("POST", "/campers", r#"{"name":"Alex","age":"ten"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(resp).await["error"]["details"]["field"], "age");

    // not json -> 400
    let resp = app
        .clone()
        .oneshot(send_json("POST", "/campers", "not-json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // nothing was persisted
    let resp = app.clone().oneshot(get("/campers")).await.unwrap();
    assert_eq!(body_string(resp).await, "[]");

    // unknown camper -> 404
    let resp = app.clone().oneshot(get("/campers/99")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(resp).await["error"]["message"],
        "Camper not found."
    );

    // create, fetch, patch
    let resp = app
        .clone()
        .oneshot(send_json("POST", "/campers", r#"{"name":"Blair","age":11}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.clone().oneshot(get("/campers/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({"id": 1, "name": "Blair", "age": 11})
    );

    let resp = app
        .clone()
        .oneshot(send_json("PATCH", "/campers/1", r#"{"age":12}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({"id": 1, "name": "Blair", "age": 12})
    );

    let resp = app
        .clone()
        .oneshot(send_json("PATCH", "/campers/1", r#"{"age":40}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // repeated reads are identical
    let first = body_string(app.clone().oneshot(get("/campers")).await.unwrap()).await;
    let second = body_string(app.clone().oneshot(get("/campers")).await.unwrap()).await;
    assert_eq!(first, second);
    assert_eq!(first, r#"[{"id":1,"name":"Blair","age":12}]"#);

    cleanup(&db_path).await;
}

#[tokio::test]
async fn signup_routes_distinguish_validation_from_missing_references() {
    let db_path = temp_db_path("route-signups");
    let app = build_app(&db_path, &archery_seed()).await;

    let resp = app
        .clone()
        .oneshot(send_json("POST", "/campers", r#"{"name":"Alex","age":10}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // time > 23 -> 422
    let resp = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/signups",
            r#"{"time":24,"camper_id":1,"activity_id":1}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(resp).await["error"]["message"],
        "Time must be a number smaller than 24."
    );

    // unknown camper -> 404
    let resp = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/signups",
            r#"{"time":9,"camper_id":5,"activity_id":1}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(resp).await["error"]["message"],
        "Camper not found."
    );

    // unknown activity -> 404
    let resp = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/signups",
            r#"{"time":9,"camper_id":1,"activity_id":5}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(resp).await["error"]["message"],
        "Activity not found."
    );

    // non-integer id -> 422
    let resp = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/signups",
            r#"{"time":9,"camper_id":"one","activity_id":1}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(resp).await["error"]["code"], "INVALID_REFERENCE");

    // none of the above created a signup
    let resp = app.clone().oneshot(get("/signups")).await.unwrap();
    assert_eq!(body_string(resp).await, "[]");

    let resp = app
        .clone()
        .oneshot(get("/activities/1/campers"))
        .await
        .unwrap();
    assert_eq!(body_string(resp).await, "[]");

    cleanup(&db_path).await;
}

#[tokio::test]
async fn home_fallback_and_request_id() {
    let db_path = temp_db_path("route-misc");
    let app = build_app(&db_path, &SeedConfig::default()).await;

    let resp = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(body_string(resp).await, "");

    let resp = app.clone().oneshot(get("/nowhere")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(resp).await,
        json!({"error": {
            "code": "NOT_FOUND",
            "message": "Resource not found.",
            "details": {"path": "/nowhere"}
        }})
    );

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/activities")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("abc-123")
    );

    cleanup(&db_path).await;
}

#[tokio::test]
async fn malformed_ids_and_content_types_keep_the_error_envelope() {
    let db_path = temp_db_path("route-malformed");
    let app = build_app(&db_path, &archery_seed()).await;

    // Non-integer and overflowing ids match no resource.
    for uri in [
        "/campers/abc",
        "/campers/99999999999999999999",
        "/campers/abc/activities",
        "/activities/x/campers",
    ] {
        let resp = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        let body = body_json(resp).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND", "{uri}");
        assert_eq!(body["error"]["details"]["path"], uri);
    }

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/activities/x")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"]["code"], "NOT_FOUND");

    let resp = app
        .clone()
        .oneshot(send_json("PATCH", "/campers/abc", r#"{"age":12}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The seeded activity survived the malformed delete.
    let resp = app.clone().oneshot(get("/activities")).await.unwrap();
    assert_eq!(
        body_json(resp).await,
        json!([{"id": 1, "name": "Archery", "difficulty": 3}])
    );

    // A body without a JSON content type is refused before it is parsed.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/campers")
                .body(Body::from(r#"{"name":"Alex","age":10}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
    assert!(body["error"]["message"].is_string());

    let resp = app.clone().oneshot(get("/campers")).await.unwrap();
    assert_eq!(body_string(resp).await, "[]");

    cleanup(&db_path).await;
}

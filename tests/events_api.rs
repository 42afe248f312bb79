//! HTTP tests for event creation, membership and listings.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use event_polls::db::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{send, str_field, test_router, token};

fn participant_ids(event: &Value) -> Vec<String> {
    event["participants"]
        .as_array()
        .map(|ps| {
            ps.iter()
                .filter_map(|p| p["id"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn create_makes_creator_a_participant() -> Result<(), String> {
    let router = test_router(Arc::new(MemoryStore::new()));

    let (status, event) = send(
        &router,
        Method::POST,
        "/api/events/create",
        Some("u1"),
        Some(json!({ "title": "Launch", "location": "Hall A" })),
    )
    .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(event["createdBy"]["id"], "u1");
    assert_eq!(participant_ids(&event), vec!["u1"]);
    assert_eq!(event["polls"], json!([]));
    assert_eq!(event["category"], "General");
    assert_eq!(event["location"], "Hall A");
    Ok(())
}

#[tokio::test]
async fn create_requires_a_title() -> Result<(), String> {
    let router = test_router(Arc::new(MemoryStore::new()));

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/events/create",
        Some("u1"),
        Some(json!({ "title": "" })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn mutations_require_a_session() -> Result<(), String> {
    let router = test_router(Arc::new(MemoryStore::new()));

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/events/create",
        None,
        Some(json!({ "title": "Launch" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "AUTHENTICATION_ERROR");

    let (status, _) = send(&router, Method::GET, "/api/events/joined", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn session_cookie_is_accepted() -> Result<(), String> {
    let router = test_router(Arc::new(MemoryStore::new()));

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/events/joined")
        .header(header::COOKIE, format!("token={}", token("u1")))
        .body(Body::empty())
        .map_err(|err| format!("build request: {err}"))?;
    let response = router
        .oneshot(req)
        .await
        .map_err(|err| format!("route request: {err}"))?;

    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn joining_twice_reports_already_joined() -> Result<(), String> {
    let router = test_router(Arc::new(MemoryStore::new()));

    let (_, event) = send(
        &router,
        Method::POST,
        "/api/events/create",
        Some("u1"),
        Some(json!({ "title": "Launch" })),
    )
    .await?;
    let event_id = str_field(&event, "id")?.to_string();

    let (status, joined) = send(
        &router,
        Method::POST,
        "/api/events/join",
        Some("u2"),
        Some(json!({ "eventId": event_id })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(joined["message"], "Successfully joined event");
    assert_eq!(participant_ids(&joined["event"]), vec!["u1", "u2"]);

    let (status, again) = send(
        &router,
        Method::POST,
        "/api/events/join",
        Some("u2"),
        Some(json!({ "eventId": event_id })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(again["error"], "ALREADY_JOINED");
    assert_eq!(participant_ids(&again["event"]), vec!["u1", "u2"]);

    let event_uri = format!("/api/events/{event_id}");
    let (_, detail) = send(&router, Method::GET, &event_uri, None, None).await?;
    assert_eq!(participant_ids(&detail), vec!["u1", "u2"]);
    Ok(())
}

#[tokio::test]
async fn joining_unknown_event_is_not_found() -> Result<(), String> {
    let router = test_router(Arc::new(MemoryStore::new()));

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/events/join",
        Some("u2"),
        Some(json!({ "eventId": "does-not-exist" })),
    )
    .await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn malformed_join_body_is_a_bad_request() -> Result<(), String> {
    let router = test_router(Arc::new(MemoryStore::new()));

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/events/join",
        Some("u2"),
        Some(json!({ "event": 42 })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn listings_carry_display_names() -> Result<(), String> {
    let store = Arc::new(MemoryStore::new());
    store.register_user("u1", "Ada").map_err(|e| e.to_string())?;
    let router = test_router(store);

    for title in ["Launch", "Retro"] {
        send(
            &router,
            Method::POST,
            "/api/events/create",
            Some("u1"),
            Some(json!({ "title": title })),
        )
        .await?;
    }

    let (status, events) = send(&router, Method::GET, "/api/events", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    let events = events.as_array().ok_or("expected an array")?;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["title"], "Launch");
    assert_eq!(events[0]["createdBy"], json!({ "id": "u1", "name": "Ada" }));
    Ok(())
}

#[tokio::test]
async fn joined_lists_only_my_events() -> Result<(), String> {
    let router = test_router(Arc::new(MemoryStore::new()));

    let mut ids = Vec::new();
    for title in ["Launch", "Retro", "Offsite"] {
        let (_, event) = send(
            &router,
            Method::POST,
            "/api/events/create",
            Some("u1"),
            Some(json!({ "title": title })),
        )
        .await?;
        ids.push(str_field(&event, "id")?.to_string());
    }

    for id in [&ids[0], &ids[2]] {
        send(
            &router,
            Method::POST,
            "/api/events/join",
            Some("u2"),
            Some(json!({ "eventId": id })),
        )
        .await?;
    }

    let (status, joined) =
        send(&router, Method::GET, "/api/events/joined", Some("u2"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = joined
        .as_array()
        .ok_or("expected an array")?
        .iter()
        .filter_map(|e| e["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Launch", "Offsite"]);
    Ok(())
}

#[tokio::test]
async fn health_endpoint_reports_uptime() -> Result<(), String> {
    let router = test_router(Arc::new(MemoryStore::new()));
    let (status, body) = send(&router, Method::GET, "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["uptime"].as_str().is_some_and(|u| u.ends_with('s')));
    Ok(())
}

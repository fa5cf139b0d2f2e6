use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::alerts::{ALERT_HEADER, ERROR_HEADER, PARAMS_HEADER};
use super::routes;
use crate::app::App;
use crate::infrastructure::persistence::SqliteDatabase;
use crate::infrastructure::search::SearchBackend;

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

async fn router() -> Router {
    let database = SqliteDatabase::connect("sqlite::memory:", 1)
        .await
        .expect("open database");
    routes(Arc::new(App::new(&database, &SearchBackend::Memory)))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> Reply {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(request.body(body).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    Reply {
        status,
        headers,
        body,
    }
}

#[tokio::test]
async fn health_endpoints_answer_ok() {
    let router = router().await;
    for uri in ["/", "/api/health"] {
        let reply = send(&router, Method::GET, uri, None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, Value::String("OK".into()));
    }
}

#[tokio::test]
async fn queue_lifecycle() {
    let router = router().await;

    let created = send(
        &router,
        Method::POST,
        "/api/queues",
        Some(json!({"name": "A", "desc": "B", "maxCapacity": 1, "site": "S"})),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_i64().expect("id assigned");
    assert_eq!(
        created.headers[header::LOCATION],
        format!("/api/queues/{id}").as_str()
    );
    assert_eq!(created.headers[ALERT_HEADER], "endqueueApp.queue.created");
    assert_eq!(created.headers[PARAMS_HEADER], id.to_string().as_str());

    let item = format!("/api/queues/{id}");
    let fetched = send(&router, Method::GET, &item, None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["name"], "A");
    assert_eq!(fetched.body["desc"], "B");
    assert_eq!(fetched.body["maxCapacity"], 1);
    assert_eq!(fetched.body["site"], "S");

    let mut changed = fetched.body.clone();
    changed["maxCapacity"] = json!(2);
    let updated = send(&router, Method::PUT, "/api/queues", Some(changed)).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.headers[ALERT_HEADER], "endqueueApp.queue.updated");

    let fetched = send(&router, Method::GET, &item, None).await;
    assert_eq!(fetched.body["maxCapacity"], 2);
    assert_eq!(fetched.body["name"], "A");
    assert_eq!(fetched.body["site"], "S");

    let search_by_id = format!("/api/_search/queues?query=id:{id}");
    let found = send(&router, Method::GET, &search_by_id, None).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body.as_array().map(Vec::len), Some(1));
    assert_eq!(found.body[0]["maxCapacity"], 2);

    let deleted = send(&router, Method::DELETE, &item, None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.headers[ALERT_HEADER], "endqueueApp.queue.deleted");

    let gone = send(&router, Method::GET, &item, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let found = send(&router, Method::GET, &search_by_id, None).await;
    assert_eq!(found.body, json!([]));
}

#[tokio::test]
async fn create_with_id_is_rejected() {
    let router = router().await;

    let reply = send(
        &router,
        Method::POST,
        "/api/dynamic-queues",
        Some(json!({"id": 1, "numParticipants": 0, "rate": 1})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.headers[ERROR_HEADER], "error.idexists");
    assert_eq!(reply.headers[PARAMS_HEADER], "dynamicQueue");
    assert_eq!(reply.body["errorKey"], "idexists");
    assert_eq!(reply.body["entityName"], "dynamicQueue");

    let all = send(&router, Method::GET, "/api/dynamic-queues", None).await;
    assert_eq!(all.body, json!([]));
}

#[tokio::test]
async fn update_without_id_creates() {
    let router = router().await;

    let reply = send(
        &router,
        Method::PUT,
        "/api/admins",
        Some(json!({"name": "Ana", "email": "ana@example.com"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert!(reply.body["id"].is_i64());
    assert_eq!(reply.headers[ALERT_HEADER], "endqueueApp.admin.created");
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found() {
    let router = router().await;

    let reply = send(
        &router,
        Method::PUT,
        "/api/participants",
        Some(json!({"id": 404, "position": 1})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let all = send(&router, Method::GET, "/api/participants", None).await;
    assert_eq!(all.body, json!([]));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let router = router().await;

    let created = send(
        &router,
        Method::POST,
        "/api/participants",
        Some(json!({"position": 3})),
    )
    .await;
    let id = created.body["id"].as_i64().expect("id");
    let item = format!("/api/participants/{id}");

    for _ in 0..2 {
        let reply = send(&router, Method::DELETE, &item, None).await;
        assert_eq!(reply.status, StatusCode::OK);
    }

    let never_existed = send(&router, Method::DELETE, "/api/participants/999", None).await;
    assert_eq!(never_existed.status, StatusCode::OK);
}

#[tokio::test]
async fn list_returns_records_in_key_order() {
    let router = router().await;

    for name in ["north", "south", "east"] {
        send(
            &router,
            Method::POST,
            "/api/organizations",
            Some(json!({"name": name})),
        )
        .await;
    }

    let all = send(&router, Method::GET, "/api/organizations", None).await;
    let names: Vec<_> = all
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(|org| org["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["north", "south", "east"]);
}

#[tokio::test]
async fn blank_organization_name_is_rejected() {
    let router = router().await;

    let reply = send(
        &router,
        Method::POST,
        "/api/organizations",
        Some(json!({"name": " "})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.headers[ERROR_HEADER], "error.validation");
}

#[tokio::test]
async fn negative_counters_are_stored_as_given() {
    let router = router().await;

    let queue = send(
        &router,
        Method::POST,
        "/api/queues",
        Some(json!({"name": "A", "maxCapacity": -5})),
    )
    .await;
    assert_eq!(queue.status, StatusCode::CREATED);
    assert_eq!(queue.body["maxCapacity"], -5);

    let info = send(
        &router,
        Method::POST,
        "/api/dynamic-queues",
        Some(json!({"numParticipants": -1, "rate": 0})),
    )
    .await;
    assert_eq!(info.status, StatusCode::CREATED);
    assert_eq!(info.body["numParticipants"], -1);
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let router = router().await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/queues")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"name\": "))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[ERROR_HEADER], "error.invalidbody");
}

#[tokio::test]
async fn blank_search_is_a_bad_request() {
    let router = router().await;

    for uri in [
        "/api/_search/queues?query=",
        "/api/_search/queues?query=%20",
        "/api/_search/queues",
    ] {
        let reply = send(&router, Method::GET, uri, None).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(reply.body["errorKey"], "invalidquery");
    }
}

#[tokio::test]
async fn search_matches_fields_and_ranks_hits() {
    let router = router().await;

    for (name, site) in [
        ("Front desk", "Lobby"),
        ("Pharmacy", "Lobby"),
        ("Front gate", "Yard"),
    ] {
        send(
            &router,
            Method::POST,
            "/api/queues",
            Some(json!({"name": name, "site": site})),
        )
        .await;
    }

    let lobby = send(
        &router,
        Method::GET,
        "/api/_search/queues?query=site:lobby",
        None,
    )
    .await;
    assert_eq!(lobby.body.as_array().map(Vec::len), Some(2));

    let ranked = send(
        &router,
        Method::GET,
        "/api/_search/queues?query=front%20lobby",
        None,
    )
    .await;
    let names: Vec<_> = ranked
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(|q| q["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["Front desk", "Pharmacy", "Front gate"]);

    let excluded = send(
        &router,
        Method::GET,
        "/api/_search/queues?query=%2Bfront%20-site:yard",
        None,
    )
    .await;
    assert_eq!(excluded.body.as_array().map(Vec::len), Some(1));
    assert_eq!(excluded.body[0]["name"], "Front desk");
}

#[tokio::test]
async fn queue_references_survive_round_trip() {
    let router = router().await;

    let admin = send(
        &router,
        Method::POST,
        "/api/admins",
        Some(json!({"name": "Ana"})),
    )
    .await;
    let admin_id = admin.body["id"].as_i64().expect("admin id");
    let info = send(
        &router,
        Method::POST,
        "/api/dynamic-queues",
        Some(json!({"numParticipants": 0, "rate": 2})),
    )
    .await;
    let info_id = info.body["id"].as_i64().expect("dynamic queue id");

    let queue = send(
        &router,
        Method::POST,
        "/api/queues",
        Some(json!({"name": "A", "managerId": admin_id, "dynamicInfoId": info_id})),
    )
    .await;
    assert_eq!(queue.status, StatusCode::CREATED);
    assert_eq!(queue.body["managerId"], admin_id);
    assert_eq!(queue.body["dynamicInfoId"], info_id);

    let by_manager = send(
        &router,
        Method::GET,
        &format!("/api/_search/queues?query=managerId:{admin_id}"),
        None,
    )
    .await;
    assert_eq!(by_manager.body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let router = router().await;
    let reply = send(&router, Method::GET, "/api/queues/abc", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

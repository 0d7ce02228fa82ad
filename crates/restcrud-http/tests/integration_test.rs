//! HTTP integration tests using a mock Axum backend

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use restcrud_core::{ClientConfig, Credentials, Filter, FilterSet, ReturnPreference};
use restcrud_http::{RestClient, RestError};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Start a test server for the given router and return its address
async fn start_test_server(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    addr
}

fn client_for(addr: SocketAddr) -> RestClient {
    let config = ClientConfig::new(
        format!("http://{}", addr),
        Credentials::with_bearer_token("anon-key", "service-role-key"),
    )
    .unwrap();
    RestClient::new(config)
}

/// Insert handler that echoes the record back as a one-row result set
async fn insert_handler(Json(record): Json<Value>) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(json!([record])))
}

#[tokio::test]
async fn create_round_trips_the_record() {
    let app = Router::new().route("/rest/v1/users", post(insert_handler));
    let addr = start_test_server(app).await;

    let record = json!({
        "name": "John Doe",
        "email": "john.doe@example.com",
        "age": 32
    });
    let rows = client_for(addr).create("users", &record).await.unwrap();

    assert_eq!(rows, json!([record]));
}

#[tokio::test]
async fn create_sends_the_standard_headers() {
    async fn header_echo(headers: HeaderMap, Json(_): Json<Value>) -> (StatusCode, Json<Value>) {
        let pick = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string()
        };
        (
            StatusCode::CREATED,
            Json(json!([{
                "apikey": pick("apikey"),
                "authorization": pick("authorization"),
                "content-type": pick("content-type"),
                "prefer": pick("prefer"),
            }])),
        )
    }

    let app = Router::new().route("/rest/v1/users", post(header_echo));
    let addr = start_test_server(app).await;

    let rows = client_for(addr)
        .create("users", &json!({"name": "John Doe"}))
        .await
        .unwrap();

    assert_eq!(
        rows,
        json!([{
            "apikey": "anon-key",
            "authorization": "Bearer service-role-key",
            "content-type": "application/json",
            "prefer": "return=representation",
        }])
    );
}

#[tokio::test]
async fn read_sends_filters_and_projection_in_order() {
    async fn query_echo(Query(pairs): Query<Vec<(String, String)>>) -> Json<Value> {
        Json(json!([{ "query": pairs }]))
    }

    let app = Router::new().route("/rest/v1/people", get(query_echo));
    let addr = start_test_server(app).await;

    let filters = FilterSet::new()
        .with(Filter::gte("age", "18"))
        .with(Filter::is("student", "true"));
    let rows = client_for(addr)
        .read("people", &filters, &["name", "age"])
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0]["query"],
        json!([
            ["age", "gte.18"],
            ["student", "is.true"],
            ["select", "name,age"],
        ])
    );
}

#[tokio::test]
async fn read_returns_matching_rows() {
    async fn list_handler() -> Json<Value> {
        Json(json!([
            {"id": 1, "name": "John Doe"},
            {"id": 2, "name": "Jane Doe"},
        ]))
    }

    let app = Router::new().route("/rest/v1/users", get(list_handler));
    let addr = start_test_server(app).await;

    let rows = client_for(addr)
        .read("users", &FilterSet::new().with(Filter::like("name", "*Doe")), &[])
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "John Doe");
}

#[tokio::test]
async fn read_rejects_a_non_array_body() {
    async fn object_handler() -> Json<Value> {
        Json(json!({"not": "an array"}))
    }

    let app = Router::new().route("/rest/v1/users", get(object_handler));
    let addr = start_test_server(app).await;

    let err = client_for(addr)
        .read("users", &FilterSet::new(), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, RestError::UnexpectedBody(_)));
}

#[tokio::test]
async fn update_patches_matching_rows() {
    async fn patch_handler(
        Query(pairs): Query<Vec<(String, String)>>,
        Json(changes): Json<Value>,
    ) -> Json<Value> {
        Json(json!([{ "query": pairs, "changes": changes }]))
    }

    let app = Router::new().route("/rest/v1/users", axum::routing::patch(patch_handler));
    let addr = start_test_server(app).await;

    let filters = FilterSet::new().with(Filter::eq("id", "123"));
    let result = client_for(addr)
        .update("users", &filters, &json!({"age": 33}))
        .await
        .unwrap();

    assert_eq!(result[0]["query"], json!([["id", "eq.123"]]));
    assert_eq!(result[0]["changes"], json!({"age": 33}));
}

#[tokio::test]
async fn delete_targets_matching_rows() {
    async fn delete_handler(Query(pairs): Query<Vec<(String, String)>>) -> Json<Value> {
        Json(json!([{ "query": pairs }]))
    }

    let app = Router::new().route("/rest/v1/users", axum::routing::delete(delete_handler));
    let addr = start_test_server(app).await;

    let filters = FilterSet::new().with(Filter::eq("id", "123"));
    let result = client_for(addr).delete("users", &filters).await.unwrap();

    assert_eq!(result[0]["query"], json!([["id", "eq.123"]]));
}

#[tokio::test]
async fn call_procedure_posts_to_the_rpc_path() {
    async fn rpc_handler(Json(args): Json<Value>) -> Json<Value> {
        Json(json!({
            "title": "A story",
            "author_email": args["author_email"],
        }))
    }

    let app = Router::new().route("/rest/v1/rpc/get_story_by_email", post(rpc_handler));
    let addr = start_test_server(app).await;

    let result = client_for(addr)
        .call_procedure(
            "get_story_by_email",
            &json!({"author_email": "john.doe@example.com"}),
        )
        .await
        .unwrap();

    assert_eq!(result["author_email"], "john.doe@example.com");
    assert_eq!(result["title"], "A story");
}

#[tokio::test]
async fn non_2xx_surfaces_status_and_backend_message() {
    async fn conflict_handler(Json(_): Json<Value>) -> (StatusCode, Json<Value>) {
        (
            StatusCode::CONFLICT,
            Json(json!({"message": "duplicate key value violates unique constraint"})),
        )
    }

    let app = Router::new().route("/rest/v1/users", post(conflict_handler));
    let addr = start_test_server(app).await;

    let err = client_for(addr)
        .create("users", &json!({"name": "John Doe"}))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(409));
    match err {
        RestError::Request {
            status,
            message,
            body,
            ..
        } => {
            assert_eq!(status, 409);
            assert_eq!(message, "duplicate key value violates unique constraint");
            assert_eq!(
                body["message"],
                "duplicate key value violates unique constraint"
            );
        }
        other => panic!("expected RestError::Request, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_is_kept_verbatim() {
    async fn teapot_handler() -> (StatusCode, &'static str) {
        (StatusCode::IM_A_TEAPOT, "short and stout")
    }

    let app = Router::new().route("/rest/v1/users", get(teapot_handler));
    let addr = start_test_server(app).await;

    let err = client_for(addr)
        .read("users", &FilterSet::new(), &[])
        .await
        .unwrap_err();

    match err {
        RestError::Request {
            status,
            message,
            body,
            ..
        } => {
            assert_eq!(status, 418);
            assert_eq!(message, "request failed");
            assert_eq!(body, Value::String("short and stout".to_string()));
        }
        other => panic!("expected RestError::Request, got {other:?}"),
    }
}

#[tokio::test]
async fn minimal_preference_yields_empty_success() {
    async fn minimal_handler(Json(_): Json<Value>) -> StatusCode {
        StatusCode::CREATED
    }

    let app = Router::new().route("/rest/v1/users", post(minimal_handler));
    let addr = start_test_server(app).await;

    let config = ClientConfig::new(
        format!("http://{}", addr),
        Credentials::new("anon-key"),
    )
    .unwrap()
    .with_prefer(ReturnPreference::Minimal);
    let client = RestClient::new(config);

    let result = client
        .create("users", &json!({"name": "John Doe"}))
        .await
        .unwrap();

    assert_eq!(result, Value::Null);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let config = ClientConfig::new("http://127.0.0.1:1", Credentials::new("anon-key")).unwrap();
    let client = RestClient::new(config);

    let err = client
        .read("users", &FilterSet::new(), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, RestError::Transport(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn client_is_reusable_across_sequential_calls() {
    let app = Router::new().route(
        "/rest/v1/users",
        get(|| async { Json(json!([{"id": 1}])) }),
    );
    let addr = start_test_server(app).await;
    let client = client_for(addr);

    for _ in 0..5 {
        let rows = client.read("users", &FilterSet::new(), &[]).await.unwrap();
        assert_eq!(rows.len(), 1);
    }
}

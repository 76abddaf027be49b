use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use path_solver::web::{create_app, AppState, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

const BOUNDARY: &str = "path-solver-test-boundary";

fn app() -> Router {
    create_app(&ServerConfig::default(), AppState::new())
}

fn scenario_json() -> String {
    json!({
        "nodes": ["A", "B", "C", "D", "E"],
        "edges": [
            {"from": "A", "to": "B", "weight": 1},
            {"from": "B", "to": "C", "weight": 2},
            {"from": "A", "to": "C", "weight": 5},
            {"from": "C", "to": "D", "weight": 1}
        ]
    })
    .to_string()
}

fn multipart_upload(filename: &str, contents: &str) -> Request<Body> {
    multipart_field("file", filename, contents)
}

fn multipart_field(field: &str, filename: &str, contents: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{n}\"; filename=\"{f}\"\r\nContent-Type: application/json\r\n\r\n{c}\r\n--{b}--\r\n",
        b = BOUNDARY,
        n = field,
        f = filename,
        c = contents
    );
    Request::builder()
        .method("POST")
        .uri("/upload_graph_json/")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn query(from: &str, to: &str) -> Request<Body> {
    get(&format!("/solve_shortest_path?starting_node_id={}&end_node_id={}", from, to))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_root_welcomes() {
    let (status, body) = send(&app(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Shortest Path Solver!");
}

#[tokio::test]
async fn test_query_without_graph_is_conflict() {
    let (status, body) = send(&app(), query("A", "D")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "no_active_graph");
}

#[tokio::test]
async fn test_upload_then_query_shortest_path() {
    let app = app();

    let (status, body) = send(&app, multipart_upload("graph.json", &scenario_json())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["upload_success"], "graph.json");
    assert_eq!(body["node_count"], 5);
    assert_eq!(body["edge_count"], 4);

    let (status, body) = send(&app, query("A", "D")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["shortest_path"], json!(["A", "B", "C", "D"]));
    assert_eq!(body["total_distance"], json!(4.0));

    let (status, body) = send(&app, query("A", "E")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"shortest_path": null, "total_distance": null}));
}

#[tokio::test]
async fn test_unknown_node_is_not_found() {
    let app = app();
    send(&app, multipart_upload("graph.json", &scenario_json())).await;

    let (status, body) = send(&app, query("A", "nonexistent")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "node_not_found");
    assert_eq!(body["details"]["node_id"], "nonexistent");
}

#[tokio::test]
async fn test_upload_rejects_non_json_file_name() {
    let (status, body) = send(&app(), multipart_upload("graph.txt", &scenario_json())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_upload");
}

#[tokio::test]
async fn test_upload_without_file_field_is_rejected() {
    let (status, body) = send(&app(), multipart_field("graph", "graph.json", &scenario_json())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_upload");
}

#[tokio::test]
async fn test_graph_info_without_graph_is_conflict() {
    let (status, body) = send(&app(), get("/api/graph")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "no_active_graph");
}

#[tokio::test]
async fn test_path_segment_route_matches_query_route() {
    let app = app();
    send(&app, multipart_upload("graph.json", &scenario_json())).await;

    let (status, by_segment) = send(
        &app,
        get("/solve_shortest__path/starting_node_id=A&end_node_id=D"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_segment["shortest_path"], json!(["A", "B", "C", "D"]));

    let (_, by_query) = send(&app, query("A", "D")).await;
    assert_eq!(by_segment, by_query);

    let (status, body) = send(&app, get("/solve_shortest__path/starting_node_id=A")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_query");
}

#[tokio::test]
async fn test_upload_accepts_uppercase_extension() {
    let (status, _) = send(&app(), multipart_upload("GRAPH.JSON", &scenario_json())).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_upload_keeps_previous_graph() {
    let app = app();
    let (_, first) = send(&app, multipart_upload("graph.json", &scenario_json())).await;

    let negative = json!({
        "nodes": ["A", "B"],
        "edges": [{"from": "A", "to": "B", "weight": -1}]
    })
    .to_string();
    let (status, body) = send(&app, multipart_upload("bad.json", &negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "malformed_graph");

    let (status, info) = send(&app, get("/api/graph")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["graph_id"], first["graph_id"]);
    assert_eq!(info["name"], "graph.json");
}

#[tokio::test]
async fn test_inline_upload_replaces_graph() {
    let app = app();
    send(&app, multipart_upload("graph.json", &scenario_json())).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/graph")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"nodes": ["X", "Y"], "edges": [{"source": "X", "target": "Y", "weight": 2.5}]}).to_string()))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["upload_success"], "inline.json");

    let (status, body) = send(&app, query("X", "Y")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_distance"], json!(2.5));

    let (status, _) = send(&app, query("A", "D")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inline_upload_with_missing_fields_is_malformed() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/graph")
        .body(Body::from(r#"{"edges": []}"#))
        .unwrap();
    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "malformed_graph");
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(&app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

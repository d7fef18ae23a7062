// Testes de rota que respondem antes de qualquer consulta ao banco

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::get,
    Extension, Router,
};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
    build_router,
    config::AppState,
    handlers,
    middleware::auth::tests::user_with,
    models::access::Role,
};

fn app() -> Router {
    build_router(AppState::for_tests())
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

#[tokio::test]
async fn health_check_answers_ok() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"OK".to_vec());
}

#[tokio::test]
async fn me_requires_token() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/me")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["error"], "Token de autenticação inválido ou ausente.");
}

#[tokio::test]
async fn malformed_bearer_is_rejected() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/me")
        .header(header::AUTHORIZATION, "Bearer isto.nao.e-um-jwt")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dashboards_and_reports_are_behind_the_guard() {
    let uris = [
        "/api/dashboard/super-admin".to_string(),
        "/api/dashboard/admin".to_string(),
        format!("/api/dashboard/school/{}", Uuid::new_v4()),
        format!("/api/reports/inventory/{}", Uuid::new_v4()),
        "/api/reports/consolidated".to_string(),
        "/api/reports/category/MOBILIARIO".to_string(),
        "/api/reports/schools".to_string(),
        format!("/api/qrcode/asset/{}", Uuid::new_v4()),
        "/api/settings".to_string(),
    ];

    for uri in uris {
        let request = Request::builder()
            .method(Method::GET)
            .uri(&uri)
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "rota {}", uri);
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/nao-existe")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn public_ticket_is_validated_before_touching_the_database() {
    let payload = json!({
        "title": "x",
        "description": "",
        "category": "MANUTENCAO",
        "requesterName": "Ana"
    });
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/public/assets/{}/tickets", Uuid::new_v4()))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(body["details"].get("title").is_some());
    assert!(body["details"].get("description").is_some());
}

#[tokio::test]
async fn openapi_document_lists_the_routes() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let doc: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/api/auth/login",
        "/api/dashboard/super-admin",
        "/api/dashboard/school/{tenantId}",
        "/api/reports/consolidated",
        "/api/qrcode/asset/{id}",
        "/public/assets/{id}/tickets",
    ] {
        assert!(paths.contains_key(path), "faltando {}", path);
    }
    assert!(doc["components"]["securitySchemes"].get("api_jwt").is_some());
}

// Rotas agregadas montadas com a sessão já resolvida (o auth_guard consultaria o banco)
fn aggregate_routes_as(role: Role) -> Router {
    Router::new()
        .route("/api/reports/consolidated", get(handlers::reports::get_consolidated))
        .route("/api/reports/schools", get(handlers::reports::list_schools))
        .route("/api/dashboard/admin", get(handlers::dashboard::get_admin))
        .route("/api/dashboard/super-admin", get(handlers::dashboard::get_super_admin))
        .layer(Extension(user_with(role, Some(Uuid::new_v4()))))
        .with_state(AppState::for_tests())
}

#[tokio::test]
async fn requester_is_refused_inside_the_aggregate_envelope() {
    for uri in [
        "/api/reports/consolidated",
        "/api/reports/schools",
        "/api/dashboard/admin",
        "/api/dashboard/super-admin",
    ] {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = aggregate_routes_as(Role::Solicitante).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "rota {}", uri);

        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"], true, "rota {}", uri);
        assert_eq!(body["kind"], "UNAUTHORIZED", "rota {}", uri);
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }
}

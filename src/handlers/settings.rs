// src/handlers/settings.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermSettings, RequirePermission},
    models::settings::SystemConfig,
};

// GET /api/settings
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses(
        (status = 200, description = "Configurações gravadas", body = Vec<SystemConfig>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_settings(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSettings>,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.settings_service.list().await?;
    Ok((StatusCode::OK, Json(settings)))
}

// GET /api/settings/{key}
#[utoipa::path(
    get,
    path = "/api/settings/{key}",
    tag = "Settings",
    params(("key" = String, Path, description = "institution | patrimony | qrcode")),
    responses(
        (status = 200, description = "Configuração (ou o padrão, se nunca gravada)", body = SystemConfig),
        (status = 400, description = "Chave desconhecida")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_setting(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSettings>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let setting = app_state.settings_service.get(&key).await?;
    Ok((StatusCode::OK, Json(setting)))
}

// PUT /api/settings/{key}
// Corpo: o objeto JSON da chave (ex.: {"codePrefix": "ESC", "autoGenerate": true})
#[utoipa::path(
    put,
    path = "/api/settings/{key}",
    tag = "Settings",
    params(("key" = String, Path, description = "institution | patrimony | qrcode")),
    responses(
        (status = 200, description = "Configuração gravada", body = SystemConfig),
        (status = 400, description = "Chave desconhecida ou valor inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_setting(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermSettings>,
    Path(key): Path<String>,
    Json(value): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state.settings_service.update(&key, value).await?;
    Ok((StatusCode::OK, Json(updated)))
}

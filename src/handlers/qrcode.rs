// src/handlers/qrcode.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        rbac::{PermAssetsRead, RequirePermission},
        tenancy::TenantScope,
    },
};

// GET /api/qrcode/asset/{id}
#[utoipa::path(
    get,
    path = "/api/qrcode/asset/{id}",
    tag = "QR Code",
    params(("id" = Uuid, Path, description = "ID do bem")),
    responses(
        (status = 200, description = "Etiqueta em PNG", content_type = "image/png", body = Vec<u8>),
        (status = 404, description = "Bem não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_asset_png(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermAssetsRead>,
    scope: TenantScope,
    Path(asset_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let png = app_state.qrcode_service.render_png(scope, asset_id).await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

// GET /api/qrcode/asset/{id}/svg
#[utoipa::path(
    get,
    path = "/api/qrcode/asset/{id}/svg",
    tag = "QR Code",
    params(("id" = Uuid, Path, description = "ID do bem")),
    responses(
        (status = 200, description = "Etiqueta em SVG", content_type = "image/svg+xml", body = String),
        (status = 404, description = "Bem não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_asset_svg(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermAssetsRead>,
    scope: TenantScope,
    Path(asset_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let svg = app_state.qrcode_service.render_svg(scope, asset_id).await?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

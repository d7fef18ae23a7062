// src/handlers/assets.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        rbac::{PermAssetsRead, PermAssetsWrite, RequirePermission},
        tenancy::TenantScope,
    },
    models::asset::{Asset, AssetFilter, CreateAssetPayload, UpdateAssetPayload},
};

// GET /api/assets
#[utoipa::path(
    get,
    path = "/api/assets",
    tag = "Assets",
    params(AssetFilter),
    responses(
        (status = 200, description = "Bens visíveis para o usuário", body = Vec<Asset>),
        (status = 403, description = "Filtro por unidade de outra escola")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_assets(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermAssetsRead>,
    scope: TenantScope,
    Query(filter): Query<AssetFilter>,
) -> Result<impl IntoResponse, AppError> {
    let assets = app_state.asset_service.list(scope, filter).await?;
    Ok((StatusCode::OK, Json(assets)))
}

// POST /api/assets
#[utoipa::path(
    post,
    path = "/api/assets",
    tag = "Assets",
    request_body = CreateAssetPayload,
    responses(
        (status = 201, description = "Bem cadastrado", body = Asset),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Código de patrimônio já utilizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_asset(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermAssetsWrite>,
    scope: TenantScope,
    Json(payload): Json<CreateAssetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let asset = app_state.asset_service.create(scope, &payload).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

// GET /api/assets/{id}
#[utoipa::path(
    get,
    path = "/api/assets/{id}",
    tag = "Assets",
    params(("id" = Uuid, Path, description = "ID do bem")),
    responses(
        (status = 200, description = "Bem", body = Asset),
        (status = 404, description = "Bem não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_asset(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermAssetsRead>,
    scope: TenantScope,
    Path(asset_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let asset = app_state.asset_service.get(scope, asset_id).await?;
    Ok((StatusCode::OK, Json(asset)))
}

// PUT /api/assets/{id}
#[utoipa::path(
    put,
    path = "/api/assets/{id}",
    tag = "Assets",
    params(("id" = Uuid, Path, description = "ID do bem")),
    request_body = UpdateAssetPayload,
    responses(
        (status = 200, description = "Bem atualizado", body = Asset),
        (status = 404, description = "Bem não encontrado"),
        (status = 409, description = "Código de patrimônio já utilizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_asset(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermAssetsWrite>,
    scope: TenantScope,
    Path(asset_id): Path<Uuid>,
    Json(payload): Json<UpdateAssetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let asset = app_state.asset_service.update(scope, asset_id, &payload).await?;
    Ok((StatusCode::OK, Json(asset)))
}

// DELETE /api/assets/{id}
#[utoipa::path(
    delete,
    path = "/api/assets/{id}",
    tag = "Assets",
    params(("id" = Uuid, Path, description = "ID do bem")),
    responses(
        (status = 204, description = "Bem excluído"),
        (status = 404, description = "Bem não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_asset(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermAssetsWrite>,
    scope: TenantScope,
    Path(asset_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.asset_service.delete(scope, asset_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

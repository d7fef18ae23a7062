// src/handlers/tenancy.rs

use axum::{
    extract::{Path, State},
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
        rbac::{PermAllSchools, RequirePermission},
        tenancy::TenantScope,
    },
    models::tenancy::{CreateTenantPayload, Tenant, UpdateTenantPayload},
};

// GET /api/tenants
#[utoipa::path(
    get,
    path = "/api/tenants",
    tag = "Tenancy",
    responses(
        (status = 200, description = "Todas as unidades", body = Vec<Tenant>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_tenants(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermAllSchools>,
) -> Result<impl IntoResponse, AppError> {
    let tenants = app_state.tenant_service.list().await?;
    Ok((StatusCode::OK, Json(tenants)))
}

// POST /api/tenants
#[utoipa::path(
    post,
    path = "/api/tenants",
    tag = "Tenancy",
    request_body = CreateTenantPayload,
    responses(
        (status = 201, description = "Unidade criada", body = Tenant),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Código já utilizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_tenant(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermAllSchools>,
    Json(payload): Json<CreateTenantPayload>,
) -> Result<impl IntoResponse, AppError> {
    // 1. Validar o payload
    payload.validate()?;

    // 2. Chamar o Serviço
    let tenant = app_state.tenant_service.create(&payload).await?;

    // 3. Responder com Sucesso
    Ok((StatusCode::CREATED, Json(tenant)))
}

// GET /api/tenants/{id}
#[utoipa::path(
    get,
    path = "/api/tenants/{id}",
    tag = "Tenancy",
    params(("id" = Uuid, Path, description = "ID da unidade")),
    responses(
        (status = 200, description = "Unidade", body = Tenant),
        (status = 403, description = "Unidade de outra escola"),
        (status = 404, description = "Unidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_tenant(
    State(app_state): State<AppState>,
    scope: TenantScope,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = app_state.tenant_service.get(scope, tenant_id).await?;
    Ok((StatusCode::OK, Json(tenant)))
}

// PUT /api/tenants/{id}
#[utoipa::path(
    put,
    path = "/api/tenants/{id}",
    tag = "Tenancy",
    params(("id" = Uuid, Path, description = "ID da unidade")),
    request_body = UpdateTenantPayload,
    responses(
        (status = 200, description = "Unidade atualizada", body = Tenant),
        (status = 404, description = "Unidade não encontrada"),
        (status = 409, description = "Código já utilizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_tenant(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermAllSchools>,
    Path(tenant_id): Path<Uuid>,
    Json(payload): Json<UpdateTenantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tenant = app_state.tenant_service.update(tenant_id, &payload).await?;
    Ok((StatusCode::OK, Json(tenant)))
}

// DELETE /api/tenants/{id}
#[utoipa::path(
    delete,
    path = "/api/tenants/{id}",
    tag = "Tenancy",
    params(("id" = Uuid, Path, description = "ID da unidade")),
    responses(
        (status = 204, description = "Unidade excluída"),
        (status = 404, description = "Unidade não encontrada"),
        (status = 409, description = "Unidade com usuários ou bens; desative-a")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_tenant(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermAllSchools>,
    Path(tenant_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.tenant_service.delete(tenant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

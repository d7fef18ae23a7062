// src/handlers/dashboard.rs

use axum::extract::{Path, State};
use uuid::Uuid;

use crate::{
    common::outcome::Outcome,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{PermAllSchools, PermDashboard, PermSuperAdmin, RequirePermissionOutcome},
        tenancy::TenantScope,
    },
    models::dashboard::{AdminDashboard, SchoolDashboard, SuperAdminDashboard},
};

// Falhas de consulta e recusas de acesso não derrubam o painel: viram
// {message, error: true} com HTTP 200

// GET /api/dashboard/super-admin
#[utoipa::path(
    get,
    path = "/api/dashboard/super-admin",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Indicadores da rede inteira (ou {message, error: true})", body = SuperAdminDashboard)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_super_admin(
    State(app_state): State<AppState>,
    _guard: RequirePermissionOutcome<PermSuperAdmin>,
) -> Outcome<SuperAdminDashboard> {
    Outcome::from_result(
        app_state.dashboard_service.super_admin().await,
        "Erro ao carregar o painel da secretaria",
    )
}

// GET /api/dashboard/admin
#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Indicadores de todas as unidades (ou {message, error: true})", body = AdminDashboard)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_admin(
    State(app_state): State<AppState>,
    _dashboard: RequirePermissionOutcome<PermDashboard>,
    _all_schools: RequirePermissionOutcome<PermAllSchools>,
) -> Outcome<AdminDashboard> {
    Outcome::from_result(
        app_state.dashboard_service.admin().await,
        "Erro ao carregar o painel administrativo",
    )
}

// GET /api/dashboard/school/{tenantId}
#[utoipa::path(
    get,
    path = "/api/dashboard/school/{tenantId}",
    tag = "Dashboard",
    params(("tenantId" = Uuid, Path, description = "ID da unidade")),
    responses(
        (status = 200, description = "Indicadores da unidade (ou {message, error: true})", body = SchoolDashboard)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_school(
    State(app_state): State<AppState>,
    _guard: RequirePermissionOutcome<PermDashboard>,
    user: AuthenticatedUser,
    Path(tenant_id): Path<Uuid>,
) -> Outcome<SchoolDashboard> {
    let result = match TenantScope::for_user(&user) {
        Ok(scope) => app_state.dashboard_service.school(scope, tenant_id).await,
        Err(e) => Err(e),
    };

    Outcome::from_result(result, "Erro ao carregar o painel da escola")
}

// src/handlers/reports.rs

use axum::extract::{Path, State};
use uuid::Uuid;

use crate::{
    common::outcome::Outcome,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{PermAllSchools, PermAssetsRead, RequirePermissionOutcome},
        tenancy::TenantScope,
    },
    models::reports::{CategoryReport, ConsolidatedReport, InventoryReport, SchoolListEntry},
};

// GET /api/reports/inventory/{tenantId}
#[utoipa::path(
    get,
    path = "/api/reports/inventory/{tenantId}",
    tag = "Reports",
    params(("tenantId" = Uuid, Path, description = "ID da unidade")),
    responses(
        (status = 200, description = "Inventário agrupado por categoria (ou {message, error: true})", body = InventoryReport)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_inventory(
    State(app_state): State<AppState>,
    _guard: RequirePermissionOutcome<PermAssetsRead>,
    user: AuthenticatedUser,
    Path(tenant_id): Path<Uuid>,
) -> Outcome<InventoryReport> {
    let result = match TenantScope::for_user(&user) {
        Ok(scope) => app_state.report_service.inventory(scope, tenant_id).await,
        Err(e) => Err(e),
    };

    Outcome::from_result(result, "Erro ao gerar relatório de inventário")
}

// GET /api/reports/consolidated
#[utoipa::path(
    get,
    path = "/api/reports/consolidated",
    tag = "Reports",
    responses(
        (status = 200, description = "Uma linha por unidade e total geral (ou {message, error: true})", body = ConsolidatedReport)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_consolidated(
    State(app_state): State<AppState>,
    _guard: RequirePermissionOutcome<PermAllSchools>,
) -> Outcome<ConsolidatedReport> {
    Outcome::from_result(
        app_state.report_service.consolidated().await,
        "Erro ao gerar relatório consolidado",
    )
}

// GET /api/reports/category/{category}
#[utoipa::path(
    get,
    path = "/api/reports/category/{category}",
    tag = "Reports",
    params(("category" = String, Path, description = "Categoria, ex.: INFORMATICA")),
    responses(
        (status = 200, description = "Bens da categoria agrupados por unidade (ou {message, error: true})", body = CategoryReport)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_by_category(
    State(app_state): State<AppState>,
    _guard: RequirePermissionOutcome<PermAllSchools>,
    Path(category): Path<String>,
) -> Outcome<CategoryReport> {
    Outcome::from_result(
        app_state.report_service.by_category(&category).await,
        "Erro ao gerar relatório por categoria",
    )
}

// GET /api/reports/schools
#[utoipa::path(
    get,
    path = "/api/reports/schools",
    tag = "Reports",
    responses(
        (status = 200, description = "Unidades com a contagem de bens (ou {message, error: true})", body = Vec<SchoolListEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_schools(
    State(app_state): State<AppState>,
    _guard: RequirePermissionOutcome<PermAllSchools>,
) -> Outcome<Vec<SchoolListEntry>> {
    Outcome::from_result(
        app_state.report_service.list_schools().await,
        "Erro ao listar unidades",
    )
}

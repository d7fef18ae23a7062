// src/models/reports.rs

use serde::Serialize;
use rust_decimal::Decimal;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    asset::{Asset, AssetCategory, AssetStatus},
    dashboard::StatusCounts,
    tenancy::{TenantRef, TenantType},
};

// Linha de bem como aparece nos relatórios
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportAssetLine {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub category: AssetCategory,
    pub status: AssetStatus,
    pub location: Option<String>,
    pub responsible: Option<String>,
    #[schema(value_type = String)]
    pub value: Decimal,
}

impl From<&Asset> for ReportAssetLine {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id,
            code: asset.code.clone(),
            name: asset.name.clone(),
            category: asset.category,
            status: asset.status,
            location: asset.location.clone(),
            responsible: asset.responsible.clone(),
            value: asset.value_or_zero(),
        }
    }
}

// ---
// 1. Inventário por escola
// ---
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub category: AssetCategory,
    pub count: i64,
    #[schema(value_type = String)]
    pub total_value: Decimal,
    pub assets: Vec<ReportAssetLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub tenant: TenantRef,
    pub categories: Vec<CategoryGroup>,
    pub status_counts: StatusCounts,
    pub total_assets: i64,
    #[schema(value_type = String)]
    pub total_value: Decimal,
}

// ---
// 2. Consolidado (uma linha por unidade + total geral)
// ---
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedRow {
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub tenant_code: String,
    #[serde(rename = "type")]
    pub tenant_type: TenantType,
    pub asset_count: i64,
    pub user_count: i64,
    #[schema(value_type = String)]
    pub total_value: Decimal,
    pub status_counts: StatusCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedTotals {
    pub asset_count: i64,
    pub user_count: i64,
    #[schema(value_type = String)]
    pub total_value: Decimal,
    pub status_counts: StatusCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedReport {
    pub rows: Vec<ConsolidatedRow>,
    pub grand_total: ConsolidatedTotals,
    pub total_tenants: i64,
    pub total_escolas: i64,
}

// ---
// 3. Por categoria (agrupado por escola)
// ---
#[derive(Debug, Clone, FromRow)]
pub struct CategoryAssetRow {
    #[sqlx(flatten)]
    pub asset: Asset,
    pub tenant_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenantGroup {
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub count: i64,
    #[schema(value_type = String)]
    pub total_value: Decimal,
    pub assets: Vec<ReportAssetLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    pub category: AssetCategory,
    pub tenants: Vec<TenantGroup>,
    pub total_assets: i64,
    #[schema(value_type = String)]
    pub total_value: Decimal,
}

// ---
// 4. Lista de unidades para o filtro de relatórios
// ---
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchoolListEntry {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub tenant_type: TenantType,
    pub active: bool,
    pub asset_count: i64,
}

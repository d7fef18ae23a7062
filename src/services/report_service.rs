// src/services/report_service.rs

use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;
use crate::{
    common::{db_utils::begin_snapshot, error::AppError},
    db::{AssetRepository, DashboardRepository, TenantRepository},
    middleware::tenancy::TenantScope,
    models::{
        asset::{Asset, AssetCategory},
        dashboard::{AssetStatRow, StatusCounts, UserStatRow},
        reports::{
            CategoryAssetRow, CategoryGroup, CategoryReport, ConsolidatedReport, ConsolidatedRow,
            ConsolidatedTotals, InventoryReport, ReportAssetLine, SchoolListEntry, TenantGroup,
        },
        tenancy::{Tenant, TenantRef, TenantType},
    },
};

#[derive(Clone)]
pub struct ReportService {
    stats_repo: DashboardRepository,
    tenant_repo: TenantRepository,
    asset_repo: AssetRepository,
}

impl ReportService {
    pub fn new(stats_repo: DashboardRepository, tenant_repo: TenantRepository, asset_repo: AssetRepository) -> Self {
        Self { stats_repo, tenant_repo, asset_repo }
    }

    // 1. Inventário de uma unidade
    pub async fn inventory(&self, caller: TenantScope, tenant_id: Uuid) -> Result<InventoryReport, AppError> {
        caller.ensure_admits(tenant_id)?;

        let mut tx = begin_snapshot(self.asset_repo.pool()).await?;

        let tenant = self.tenant_repo
            .find_by_id(&mut *tx, tenant_id)
            .await?
            .ok_or(AppError::NotFound("Unidade"))?;
        let assets = self.asset_repo.list_for_inventory(&mut *tx, tenant_id).await?;

        tx.commit().await?;

        Ok(build_inventory_report(&tenant, assets))
    }

    // 2. Consolidado de todas as unidades
    pub async fn consolidated(&self) -> Result<ConsolidatedReport, AppError> {
        let mut tx = begin_snapshot(self.stats_repo.pool()).await?;

        let tenants = self.tenant_repo.list_all(&mut *tx).await?;
        let asset_rows = self.stats_repo.asset_stats(&mut *tx, None).await?;
        // Só a contagem de usuários interessa aqui
        let user_rows = self.stats_repo.user_stats(&mut *tx, chrono::Utc::now(), None).await?;

        tx.commit().await?;

        Ok(build_consolidated_report(&tenants, &asset_rows, &user_rows))
    }

    // 3. Uma categoria em todas as unidades
    pub async fn by_category(&self, raw_category: &str) -> Result<CategoryReport, AppError> {
        let category = raw_category
            .parse::<AssetCategory>()
            .map_err(|message| AppError::InvalidField { field: "category", message })?;

        let mut tx = begin_snapshot(self.asset_repo.pool()).await?;
        let rows = self.asset_repo.list_for_category(&mut *tx, category).await?;
        tx.commit().await?;

        Ok(build_category_report(category, rows))
    }

    // 4. Unidades para o filtro da tela de relatórios
    pub async fn list_schools(&self) -> Result<Vec<SchoolListEntry>, AppError> {
        self.tenant_repo.list_with_asset_count().await
    }
}

// ---
// Montagem dos relatórios (funções puras)
// ---

/// Agrupa por categoria na ordem em que aparecem depois de ordenar por
/// (categoria, código).
pub fn build_inventory_report(tenant: &Tenant, mut assets: Vec<Asset>) -> InventoryReport {
    assets.sort_by(|a, b| {
        a.category
            .as_str()
            .cmp(b.category.as_str())
            .then_with(|| a.code.cmp(&b.code))
    });

    let mut categories: Vec<CategoryGroup> = Vec::new();
    let mut status_counts = StatusCounts::default();
    let mut total_value = Decimal::ZERO;

    for asset in &assets {
        let value = asset.value_or_zero();
        status_counts.add(asset.status, 1);
        total_value += value;

        match categories.last_mut() {
            Some(group) if group.category == asset.category => {
                group.count += 1;
                group.total_value += value;
                group.assets.push(ReportAssetLine::from(asset));
            }
            _ => categories.push(CategoryGroup {
                category: asset.category,
                count: 1,
                total_value: value,
                assets: vec![ReportAssetLine::from(asset)],
            }),
        }
    }

    InventoryReport {
        tenant: TenantRef::from(tenant),
        categories,
        status_counts,
        total_assets: assets.len() as i64,
        total_value,
    }
}

/// Uma linha por unidade (na ordem recebida) e o total geral somado das linhas.
pub fn build_consolidated_report(
    tenants: &[Tenant],
    asset_rows: &[AssetStatRow],
    user_rows: &[UserStatRow],
) -> ConsolidatedReport {
    let mut assets_by_tenant: HashMap<Uuid, (i64, Decimal, StatusCounts)> = HashMap::new();
    for row in asset_rows {
        let entry = assets_by_tenant.entry(row.tenant_id).or_default();
        entry.0 += row.asset_count;
        entry.1 += row.total_value;
        entry.2.add(row.status, row.asset_count);
    }

    let mut users_by_tenant: HashMap<Uuid, i64> = HashMap::new();
    for row in user_rows {
        // Administradores sem unidade não pertencem a nenhuma linha
        if let Some(tenant_id) = row.tenant_id {
            *users_by_tenant.entry(tenant_id).or_default() += row.user_count;
        }
    }

    let rows: Vec<ConsolidatedRow> = tenants
        .iter()
        .map(|tenant| {
            let (asset_count, total_value, status_counts) =
                assets_by_tenant.get(&tenant.id).copied().unwrap_or_default();
            ConsolidatedRow {
                tenant_id: tenant.id,
                tenant_name: tenant.name.clone(),
                tenant_code: tenant.code.clone(),
                tenant_type: tenant.tenant_type,
                asset_count,
                user_count: users_by_tenant.get(&tenant.id).copied().unwrap_or(0),
                total_value,
                status_counts,
            }
        })
        .collect();

    let grand_total = rows.iter().fold(ConsolidatedTotals::default(), |mut acc, row| {
        acc.asset_count += row.asset_count;
        acc.user_count += row.user_count;
        acc.total_value += row.total_value;
        acc.status_counts.merge(&row.status_counts);
        acc
    });

    ConsolidatedReport {
        total_tenants: tenants.len() as i64,
        total_escolas: tenants
            .iter()
            .filter(|t| t.tenant_type == TenantType::Escola)
            .count() as i64,
        rows,
        grand_total,
    }
}

/// Agrupa por unidade na ordem (nome da unidade, código). Nomes de unidade
/// não são únicos: o id desempata para que cada unidade fique contígua.
pub fn build_category_report(category: AssetCategory, mut rows: Vec<CategoryAssetRow>) -> CategoryReport {
    rows.sort_by(|a, b| {
        a.tenant_name
            .cmp(&b.tenant_name)
            .then_with(|| a.asset.tenant_id.cmp(&b.asset.tenant_id))
            .then_with(|| a.asset.code.cmp(&b.asset.code))
    });

    let mut tenants: Vec<TenantGroup> = Vec::new();
    let mut total_value = Decimal::ZERO;

    for row in &rows {
        let value = row.asset.value_or_zero();
        total_value += value;

        match tenants.last_mut() {
            Some(group) if group.tenant_id == row.asset.tenant_id => {
                group.count += 1;
                group.total_value += value;
                group.assets.push(ReportAssetLine::from(&row.asset));
            }
            _ => tenants.push(TenantGroup {
                tenant_id: row.asset.tenant_id,
                tenant_name: row.tenant_name.clone(),
                count: 1,
                total_value: value,
                assets: vec![ReportAssetLine::from(&row.asset)],
            }),
        }
    }

    CategoryReport {
        category,
        tenants,
        total_assets: rows.len() as i64,
        total_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::asset::AssetStatus;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn dec(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    fn tenant(name: &str, tenant_type: TenantType) -> Tenant {
        Tenant {
            id: Uuid::new_v4(),
            name: name.to_string(),
            tenant_type,
            code: format!("COD-{}", name),
            address: None,
            phone: None,
            email: None,
            director: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn asset(tenant_id: Uuid, code: &str, category: AssetCategory, status: AssetStatus, value: Option<&str>) -> Asset {
        Asset {
            id: Uuid::new_v4(),
            code: code.to_string(),
            serial_number: None,
            name: format!("Bem {}", code),
            description: None,
            category,
            brand: None,
            model: None,
            purchase_date: None,
            purchase_value: value.map(dec),
            status,
            location: Some("Sala 1".into()),
            responsible: None,
            notes: None,
            tenant_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn inventory_groups_by_category_in_sorted_order() {
        let school = tenant("EMEF Centro", TenantType::Escola);
        let assets = vec![
            asset(school.id, "PAT-000003", AssetCategory::Mobiliario, AssetStatus::Ativo, Some("200.00")),
            asset(school.id, "PAT-000002", AssetCategory::Informatica, AssetStatus::Manutencao, Some("3500.00")),
            asset(school.id, "PAT-000001", AssetCategory::Mobiliario, AssetStatus::Ativo, None),
            asset(school.id, "PAT-000004", AssetCategory::Informatica, AssetStatus::Baixado, Some("1200.50")),
        ];

        let report = build_inventory_report(&school, assets);

        let layout: Vec<(AssetCategory, Vec<&str>)> = report
            .categories
            .iter()
            .map(|g| (g.category, g.assets.iter().map(|a| a.code.as_str()).collect()))
            .collect();
        assert_eq!(
            layout,
            vec![
                (AssetCategory::Informatica, vec!["PAT-000002", "PAT-000004"]),
                (AssetCategory::Mobiliario, vec!["PAT-000001", "PAT-000003"]),
            ]
        );

        assert_eq!(report.categories[0].total_value, dec("4700.50"));
        assert_eq!(report.categories[1].total_value, dec("200.00"));
        assert_eq!(report.total_assets, 4);
        assert_eq!(report.total_value, dec("4900.50"));
        assert_eq!(report.status_counts, StatusCounts { ativo: 2, manutencao: 1, inativo: 0, baixado: 1 });
    }

    #[test]
    fn null_purchase_value_counts_as_zero() {
        let school = tenant("EMEF Sul", TenantType::Escola);
        let report = build_inventory_report(
            &school,
            vec![asset(school.id, "PAT-1", AssetCategory::Outros, AssetStatus::Ativo, None)],
        );

        assert_eq!(report.total_value, Decimal::ZERO);
        assert_eq!(report.categories[0].assets[0].value, Decimal::ZERO);
    }

    #[test]
    fn empty_tenant_has_empty_groups_and_zero_counts() {
        let school = tenant("EMEF Vazia", TenantType::Escola);
        let report = build_inventory_report(&school, Vec::new());

        assert!(report.categories.is_empty());
        assert_eq!(report.total_assets, 0);
        assert_eq!(report.total_value, Decimal::ZERO);
        assert_eq!(report.status_counts, StatusCounts::default());
        assert_eq!(report.tenant.id, school.id);
    }

    #[test]
    fn grand_total_matches_rows_and_global_totals() {
        let tenants = vec![
            tenant("A", TenantType::Escola),
            tenant("B", TenantType::Escola),
            tenant("C", TenantType::Regional),
        ];
        let asset_rows = vec![
            AssetStatRow { tenant_id: tenants[0].id, status: AssetStatus::Ativo, asset_count: 5, total_value: dec("1000.10") },
            AssetStatRow { tenant_id: tenants[0].id, status: AssetStatus::Inativo, asset_count: 2, total_value: dec("0") },
            AssetStatRow { tenant_id: tenants[1].id, status: AssetStatus::Manutencao, asset_count: 3, total_value: dec("450.45") },
        ];
        let user_rows = vec![
            UserStatRow { tenant_id: None, user_count: 2, active_last_30_days: 0 },
            UserStatRow { tenant_id: Some(tenants[0].id), user_count: 4, active_last_30_days: 1 },
            UserStatRow { tenant_id: Some(tenants[2].id), user_count: 1, active_last_30_days: 0 },
        ];

        let report = build_consolidated_report(&tenants, &asset_rows, &user_rows);

        // Soma independente, direto das linhas do banco
        let global_assets: i64 = asset_rows.iter().map(|r| r.asset_count).sum();
        let global_value: Decimal = asset_rows.iter().map(|r| r.total_value).sum();

        assert_eq!(report.grand_total.asset_count, global_assets);
        assert_eq!(report.grand_total.total_value, global_value);
        assert_eq!(report.grand_total.user_count, 5);
        assert_eq!(report.grand_total.status_counts.total(), global_assets);

        let row_sum: i64 = report.rows.iter().map(|r| r.asset_count).sum();
        assert_eq!(row_sum, report.grand_total.asset_count);

        // Unidade sem bens aparece zerada
        assert_eq!(report.rows[2].asset_count, 0);
        assert_eq!(report.rows[2].status_counts, StatusCounts::default());
        assert_eq!(report.total_tenants, 3);
        assert_eq!(report.total_escolas, 2);
    }

    #[test]
    fn five_schools_and_twelve_users_count_five_escolas() {
        let tenants: Vec<Tenant> = (1..=5)
            .map(|n| tenant(&format!("Escola {}", n), TenantType::Escola))
            .collect();
        let user_rows: Vec<UserStatRow> = tenants
            .iter()
            .enumerate()
            .map(|(i, t)| UserStatRow {
                tenant_id: Some(t.id),
                user_count: if i < 2 { 3 } else { 2 },
                active_last_30_days: 0,
            })
            .collect();

        let report = build_consolidated_report(&tenants, &[], &user_rows);

        assert_eq!(report.total_escolas, 5);
        assert_eq!(report.grand_total.user_count, 12);
        assert_eq!(report.grand_total.total_value, Decimal::ZERO);
    }

    #[test]
    fn category_report_groups_by_tenant_name() {
        let norte = tenant("EMEF Norte", TenantType::Escola);
        let centro = tenant("EMEF Centro", TenantType::Escola);
        let row = |t: &Tenant, code: &str, value: &str| CategoryAssetRow {
            asset: asset(t.id, code, AssetCategory::Informatica, AssetStatus::Ativo, Some(value)),
            tenant_name: t.name.clone(),
        };

        let report = build_category_report(
            AssetCategory::Informatica,
            vec![
                row(&norte, "PAT-000010", "100.00"),
                row(&centro, "PAT-000020", "50.00"),
                row(&norte, "PAT-000005", "25.00"),
            ],
        );

        let names: Vec<&str> = report.tenants.iter().map(|g| g.tenant_name.as_str()).collect();
        assert_eq!(names, vec!["EMEF Centro", "EMEF Norte"]);
        assert_eq!(report.tenants[1].assets[0].code, "PAT-000005");
        assert_eq!(report.tenants[1].total_value, dec("125.00"));
        assert_eq!(report.total_assets, 3);
        assert_eq!(report.total_value, dec("175.00"));
    }

    #[test]
    fn homonymous_schools_stay_in_one_group_each() {
        let first = tenant("EMEF Centro", TenantType::Escola);
        let second = tenant("EMEF Centro", TenantType::Escola);
        let row = |t: &Tenant, code: &str| CategoryAssetRow {
            asset: asset(t.id, code, AssetCategory::Mobiliario, AssetStatus::Ativo, Some("10.00")),
            tenant_name: t.name.clone(),
        };

        let report = build_category_report(
            AssetCategory::Mobiliario,
            vec![row(&first, "P-1"), row(&second, "P-2"), row(&first, "P-3")],
        );

        assert_eq!(report.tenants.len(), 2);
        let first_group = report.tenants.iter().find(|g| g.tenant_id == first.id).unwrap();
        let codes: Vec<&str> = first_group.assets.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["P-1", "P-3"]);
        assert_eq!(first_group.count, 2);
        assert_eq!(report.total_assets, 3);
    }
}

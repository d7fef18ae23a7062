// src/services/dashboard_service.rs

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use crate::{
    common::{db_utils::begin_snapshot, error::AppError},
    db::{DashboardRepository, TenantRepository},
    middleware::tenancy::TenantScope,
    models::{
        dashboard::{
            AdminDashboard, AssetStatRow, SchoolDashboard, StatusCounts, SuperAdminDashboard,
            TicketStatRow, UserStatRow,
        },
        ticket::TicketCategory,
    },
};

// Janela do indicador de usuários ativos
const ACTIVE_WINDOW_DAYS: i64 = 30;

/// Totais de um recorte, calculados sobre as linhas agregadas do banco.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardTotals {
    pub total_assets: i64,
    pub total_value: Decimal,
    pub assets_by_status: StatusCounts,
    pub open_tickets: i64,
    pub pending_disposals: i64,
    pub total_users: i64,
    pub active_users: i64,
}

impl DashboardTotals {
    /// Soma apenas as linhas admitidas pelo recorte. Linhas de outras
    /// unidades nunca entram no resultado.
    pub fn fold(
        scope: TenantScope,
        assets: &[AssetStatRow],
        tickets: &[TicketStatRow],
        users: &[UserStatRow],
    ) -> Self {
        let mut totals = DashboardTotals::default();

        for row in assets.iter().filter(|r| scope.admits(r.tenant_id)) {
            totals.total_assets += row.asset_count;
            totals.total_value += row.total_value;
            totals.assets_by_status.add(row.status, row.asset_count);
        }

        for row in tickets.iter().filter(|r| scope.admits(r.tenant_id) && r.status.is_open()) {
            totals.open_tickets += row.ticket_count;
            if row.category == TicketCategory::Baixa {
                totals.pending_disposals += row.ticket_count;
            }
        }

        for row in users.iter().filter(|r| scope.admits_optional(r.tenant_id)) {
            totals.total_users += row.user_count;
            totals.active_users += row.active_last_30_days;
        }

        totals
    }
}

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    tenant_repo: TenantRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository, tenant_repo: TenantRepository) -> Self {
        Self { repo, tenant_repo }
    }

    pub async fn super_admin(&self) -> Result<SuperAdminDashboard, AppError> {
        let (totals, total_tenants) = self.snapshot(TenantScope::All).await?;

        Ok(SuperAdminDashboard {
            total_tenants,
            total_assets: totals.total_assets,
            total_users: totals.total_users,
            total_value: totals.total_value,
            open_tickets: totals.open_tickets,
            active_users_last_30_days: totals.active_users,
            pending_disposals: totals.pending_disposals,
            assets_by_status: totals.assets_by_status,
        })
    }

    pub async fn admin(&self) -> Result<AdminDashboard, AppError> {
        let (totals, total_tenants) = self.snapshot(TenantScope::All).await?;

        Ok(AdminDashboard {
            total_tenants,
            total_assets: totals.total_assets,
            total_users: totals.total_users,
            total_value: totals.total_value,
            open_tickets: totals.open_tickets,
            pending_disposals: totals.pending_disposals,
            assets_by_status: totals.assets_by_status,
        })
    }

    /// Painel de uma escola. O chamador precisa enxergar a unidade.
    pub async fn school(&self, caller: TenantScope, tenant_id: Uuid) -> Result<SchoolDashboard, AppError> {
        caller.ensure_admits(tenant_id)?;

        let tenant = self.tenant_repo
            .find_by_id(self.repo.pool(), tenant_id)
            .await?
            .ok_or(AppError::NotFound("Unidade"))?;

        let (totals, _) = self.snapshot(TenantScope::Tenant(tenant_id)).await?;

        Ok(SchoolDashboard {
            tenant_id,
            tenant_name: tenant.name,
            total_tenants: 1,
            total_assets: totals.total_assets,
            total_users: totals.total_users,
            total_value: totals.total_value,
            open_tickets: totals.open_tickets,
            active_users_last_30_days: totals.active_users,
            pending_disposals: totals.pending_disposals,
            assets_by_status: totals.assets_by_status,
        })
    }

    // Todas as leituras na mesma transação. O filtro por unidade vai para o
    // SQL; o `fold` confere o recorte de novo sobre as linhas.
    async fn snapshot(&self, scope: TenantScope) -> Result<(DashboardTotals, i64), AppError> {
        let active_since = Utc::now() - Duration::days(ACTIVE_WINDOW_DAYS);
        let tenant_filter = scope.tenant_filter();
        let mut tx = begin_snapshot(self.repo.pool()).await?;

        let assets = self.repo.asset_stats(&mut *tx, tenant_filter).await?;
        let tickets = self.repo.ticket_stats(&mut *tx, tenant_filter).await?;
        let users = self.repo.user_stats(&mut *tx, active_since, tenant_filter).await?;
        let total_tenants = self.tenant_repo.count_all(&mut *tx).await?;

        tx.commit().await?;

        Ok((DashboardTotals::fold(scope, &assets, &tickets, &users), total_tenants))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{asset::AssetStatus, ticket::TicketStatus};
    use pretty_assertions::assert_eq;

    fn dec(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    fn asset_row(tenant_id: Uuid, status: AssetStatus, count: i64, value: &str) -> AssetStatRow {
        AssetStatRow { tenant_id, status, asset_count: count, total_value: dec(value) }
    }

    fn ticket_row(tenant_id: Uuid, category: TicketCategory, status: TicketStatus, count: i64) -> TicketStatRow {
        TicketStatRow { tenant_id, category, status, ticket_count: count }
    }

    fn fixture() -> (Uuid, Uuid, Vec<AssetStatRow>, Vec<TicketStatRow>, Vec<UserStatRow>) {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let assets = vec![
            asset_row(a, AssetStatus::Ativo, 3, "1500.00"),
            asset_row(a, AssetStatus::Manutencao, 1, "0"),
            asset_row(b, AssetStatus::Ativo, 10, "9999.99"),
            asset_row(b, AssetStatus::Baixado, 2, "100.50"),
        ];
        let tickets = vec![
            ticket_row(a, TicketCategory::Manutencao, TicketStatus::Aberto, 2),
            ticket_row(a, TicketCategory::Baixa, TicketStatus::EmAndamento, 1),
            ticket_row(a, TicketCategory::Baixa, TicketStatus::Fechado, 4),
            ticket_row(b, TicketCategory::Baixa, TicketStatus::Aberto, 5),
        ];
        let users = vec![
            UserStatRow { tenant_id: None, user_count: 2, active_last_30_days: 1 },
            UserStatRow { tenant_id: Some(a), user_count: 4, active_last_30_days: 2 },
            UserStatRow { tenant_id: Some(b), user_count: 6, active_last_30_days: 0 },
        ];

        (a, b, assets, tickets, users)
    }

    #[test]
    fn school_scope_never_includes_other_school_rows() {
        let (a, _, assets, tickets, users) = fixture();
        let totals = DashboardTotals::fold(TenantScope::Tenant(a), &assets, &tickets, &users);

        assert_eq!(
            totals,
            DashboardTotals {
                total_assets: 4,
                total_value: dec("1500.00"),
                assets_by_status: StatusCounts { ativo: 3, manutencao: 1, inativo: 0, baixado: 0 },
                open_tickets: 3,
                pending_disposals: 1,
                total_users: 4,
                active_users: 2,
            }
        );
    }

    #[test]
    fn global_scope_sums_every_school_and_admins() {
        let (_, _, assets, tickets, users) = fixture();
        let totals = DashboardTotals::fold(TenantScope::All, &assets, &tickets, &users);

        assert_eq!(totals.total_assets, 16);
        assert_eq!(totals.total_value, dec("11600.49"));
        assert_eq!(totals.open_tickets, 8);
        assert_eq!(totals.pending_disposals, 6);
        assert_eq!(totals.total_users, 12);
        assert_eq!(totals.active_users, 3);
        assert_eq!(totals.assets_by_status.total(), totals.total_assets);
    }

    #[test]
    fn closed_disposal_requests_are_not_pending() {
        let a = Uuid::new_v4();
        let tickets = vec![
            ticket_row(a, TicketCategory::Baixa, TicketStatus::Resolvido, 1),
            ticket_row(a, TicketCategory::Baixa, TicketStatus::Cancelado, 1),
        ];
        let totals = DashboardTotals::fold(TenantScope::All, &[], &tickets, &[]);
        assert_eq!(totals.pending_disposals, 0);
        assert_eq!(totals.open_tickets, 0);
    }

    #[test]
    fn empty_school_yields_zero_buckets() {
        let (_, _, assets, tickets, users) = fixture();
        let totals = DashboardTotals::fold(TenantScope::Tenant(Uuid::new_v4()), &assets, &tickets, &users);

        assert_eq!(totals, DashboardTotals::default());
        assert_eq!(totals.total_value, Decimal::ZERO);
    }
}

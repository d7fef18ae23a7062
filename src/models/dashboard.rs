// src/models/dashboard.rs

use serde::Serialize;
use rust_decimal::Decimal;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    asset::AssetStatus,
    ticket::{TicketCategory, TicketStatus},
};

// ---
// Linhas agregadas vindas do banco (GROUP BY)
// ---

// Bens por escola e status
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AssetStatRow {
    pub tenant_id: Uuid,
    pub status: AssetStatus,
    pub asset_count: i64,
    pub total_value: Decimal,
}

// Chamados por escola, categoria e status
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TicketStatRow {
    pub tenant_id: Uuid,
    pub category: TicketCategory,
    pub status: TicketStatus,
    pub ticket_count: i64,
}

// Usuários por escola (tenant_id nulo = administradores)
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UserStatRow {
    pub tenant_id: Option<Uuid>,
    pub user_count: i64,
    pub active_last_30_days: i64,
}

// Os quatro baldes fixos. Sempre presentes, mesmo zerados.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCounts {
    #[serde(rename = "ATIVO")]
    pub ativo: i64,
    #[serde(rename = "MANUTENCAO")]
    pub manutencao: i64,
    #[serde(rename = "INATIVO")]
    pub inativo: i64,
    #[serde(rename = "BAIXADO")]
    pub baixado: i64,
}

impl StatusCounts {
    pub fn add(&mut self, status: AssetStatus, count: i64) {
        match status {
            AssetStatus::Ativo => self.ativo += count,
            AssetStatus::Manutencao => self.manutencao += count,
            AssetStatus::Inativo => self.inativo += count,
            AssetStatus::Baixado => self.baixado += count,
        }
    }

    pub fn merge(&mut self, other: &StatusCounts) {
        self.ativo += other.ativo;
        self.manutencao += other.manutencao;
        self.inativo += other.inativo;
        self.baixado += other.baixado;
    }

    pub fn total(&self) -> i64 {
        self.ativo + self.manutencao + self.inativo + self.baixado
    }
}

// ---
// Respostas por perfil
// ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuperAdminDashboard {
    pub total_tenants: i64,
    pub total_assets: i64,
    pub total_users: i64,
    #[schema(value_type = String, example = "152340.50")]
    pub total_value: Decimal,
    pub open_tickets: i64,
    pub active_users_last_30_days: i64,
    pub pending_disposals: i64,
    pub assets_by_status: StatusCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_tenants: i64,
    pub total_assets: i64,
    pub total_users: i64,
    #[schema(value_type = String)]
    pub total_value: Decimal,
    pub open_tickets: i64,
    pub pending_disposals: i64,
    pub assets_by_status: StatusCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchoolDashboard {
    pub tenant_id: Uuid,
    pub tenant_name: String,
    // Mesmo formato do painel geral; o recorte é sempre uma unidade
    pub total_tenants: i64,
    pub total_assets: i64,
    pub total_users: i64,
    #[schema(value_type = String)]
    pub total_value: Decimal,
    pub open_tickets: i64,
    pub active_users_last_30_days: i64,
    pub pending_disposals: i64,
    pub assets_by_status: StatusCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_status_counts_still_serialize_every_bucket() {
        let json = serde_json::to_value(StatusCounts::default()).unwrap();
        for bucket in ["ATIVO", "MANUTENCAO", "INATIVO", "BAIXADO"] {
            assert_eq!(json[bucket], 0, "balde {bucket} ausente");
        }
    }

    #[test]
    fn add_routes_each_status_to_its_bucket() {
        let mut counts = StatusCounts::default();
        counts.add(AssetStatus::Ativo, 3);
        counts.add(AssetStatus::Baixado, 2);
        counts.add(AssetStatus::Ativo, 1);

        assert_eq!(counts.ativo, 4);
        assert_eq!(counts.baixado, 2);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn school_view_keeps_every_key_of_the_general_view() {
        let general = serde_json::to_value(SuperAdminDashboard {
            total_tenants: 3,
            total_assets: 0,
            total_users: 0,
            total_value: Decimal::ZERO,
            open_tickets: 0,
            active_users_last_30_days: 0,
            pending_disposals: 0,
            assets_by_status: StatusCounts::default(),
        })
        .unwrap();
        let school = serde_json::to_value(SchoolDashboard {
            tenant_id: Uuid::nil(),
            tenant_name: "EMEF Centro".into(),
            total_tenants: 1,
            total_assets: 0,
            total_users: 0,
            total_value: Decimal::ZERO,
            open_tickets: 0,
            active_users_last_30_days: 0,
            pending_disposals: 0,
            assets_by_status: StatusCounts::default(),
        })
        .unwrap();

        for key in general.as_object().unwrap().keys() {
            assert!(school.get(key).is_some(), "chave {key} ausente no painel da escola");
        }
        assert_eq!(school["totalTenants"], 1);
    }
}

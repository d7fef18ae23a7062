// src/db/dashboard_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Executor};
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::dashboard::{AssetStatRow, TicketStatRow, UserStatRow},
};

// Consultas agregadas (GROUP BY por unidade) usadas pelos painéis e relatórios.
// `tenant_id = None` traz todas as unidades.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Bens por unidade e status, com valor somado (NULL conta como zero)
    pub async fn asset_stats<'e, E>(&self, executor: E, tenant_id: Option<Uuid>) -> Result<Vec<AssetStatRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, AssetStatRow>(
            r#"
            SELECT tenant_id,
                   status,
                   COUNT(*) AS asset_count,
                   COALESCE(SUM(purchase_value), 0) AS total_value
            FROM assets
            WHERE ($1::uuid IS NULL OR tenant_id = $1)
            GROUP BY tenant_id, status
            "#,
        )
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    // 2. Chamados por unidade, categoria e status. A unidade é a do bem.
    pub async fn ticket_stats<'e, E>(&self, executor: E, tenant_id: Option<Uuid>) -> Result<Vec<TicketStatRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, TicketStatRow>(
            r#"
            SELECT a.tenant_id, t.category, t.status, COUNT(*) AS ticket_count
            FROM tickets t
            JOIN assets a ON a.id = t.asset_id
            WHERE ($1::uuid IS NULL OR a.tenant_id = $1)
            GROUP BY a.tenant_id, t.category, t.status
            "#,
        )
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    // 3. Usuários por unidade e quantos autenticaram desde `active_since`
    pub async fn user_stats<'e, E>(
        &self,
        executor: E,
        active_since: DateTime<Utc>,
        tenant_id: Option<Uuid>,
    ) -> Result<Vec<UserStatRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, UserStatRow>(
            r#"
            SELECT u.tenant_id,
                   COUNT(*) AS user_count,
                   COUNT(*) FILTER (
                       WHERE EXISTS (
                           SELECT 1 FROM auth_events e
                           WHERE e.user_id = u.id AND e.occurred_at >= $1
                       )
                   ) AS active_last_30_days
            FROM users u
            WHERE ($2::uuid IS NULL OR u.tenant_id = $2)
            GROUP BY u.tenant_id
            "#,
        )
            .bind(active_since)
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

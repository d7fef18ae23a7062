// src/db/ticket_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::ticket::{Ticket, TicketCategory, TicketFilter, TicketPriority, UpdateTicketPayload},
};

pub struct NewTicket<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub asset_id: Uuid,
    pub tenant_id: Uuid,
    pub requester_id: Option<Uuid>,
    pub requester_name: Option<&'a str>,
}

#[derive(Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, ticket_id: Uuid) -> Result<Option<Ticket>, AppError> {
        let ticket = sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
            .bind(ticket_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ticket)
    }

    /// Chamados mais recentes primeiro.
    pub async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, AppError> {
        let tickets = sqlx::query_as::<_, Ticket>(
            r#"
            SELECT * FROM tickets
            WHERE ($1::uuid IS NULL OR tenant_id = $1)
              AND ($2::uuid IS NULL OR asset_id = $2)
              AND ($3::ticket_status IS NULL OR status = $3)
            ORDER BY created_at DESC
            "#,
        )
            .bind(filter.tenant_id)
            .bind(filter.asset_id)
            .bind(filter.status)
            .fetch_all(&self.pool)
            .await?;
        Ok(tickets)
    }

    pub async fn create(&self, input: NewTicket<'_>) -> Result<Ticket, AppError> {
        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (
                title, description, category, priority, asset_id, tenant_id,
                requester_id, requester_name
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
            .bind(input.title)
            .bind(input.description)
            .bind(input.category)
            .bind(input.priority)
            .bind(input.asset_id)
            .bind(input.tenant_id)
            .bind(input.requester_id)
            .bind(input.requester_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(ticket)
    }

    /// Acompanha a transferência do bem: os chamados passam para a nova unidade.
    pub async fn move_to_tenant<'e, E>(&self, executor: E, asset_id: Uuid, tenant_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE tickets SET tenant_id = $2, updated_at = NOW() WHERE asset_id = $1 AND tenant_id <> $2",
        )
            .bind(asset_id)
            .bind(tenant_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Campos ausentes mantêm o valor atual; o responsável não é removido por aqui.
    pub async fn update(&self, ticket_id: Uuid, input: &UpdateTicketPayload) -> Result<Option<Ticket>, AppError> {
        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                priority = COALESCE($5, priority),
                status = COALESCE($6, status),
                assignee_id = COALESCE($7, assignee_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(ticket_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category)
            .bind(input.priority)
            .bind(input.status)
            .bind(input.assignee_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ticket)
    }

    pub async fn delete(&self, ticket_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(ticket_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

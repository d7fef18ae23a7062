// src/db/tenancy_repo.rs

use sqlx::{PgPool, Postgres, Executor};
use uuid::Uuid;
use crate::{
    common::{db_utils::map_unique_violation, error::AppError},
    models::{
        reports::SchoolListEntry,
        tenancy::{CreateTenantPayload, Tenant, UpdateTenantPayload},
    },
};

#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras (aceitam executor para rodar dentro da transação dos relatórios)
    // ---

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Option<Tenant>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(tenant_id)
            .fetch_optional(executor)
            .await?;
        Ok(tenant)
    }

    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<Tenant>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tenants = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants ORDER BY name ASC, code ASC")
            .fetch_all(executor)
            .await?;
        Ok(tenants)
    }

    pub async fn count_all<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tenants")
            .fetch_one(executor)
            .await?;
        Ok(total)
    }

    /// Unidades com a contagem de bens, para o filtro da tela de relatórios.
    pub async fn list_with_asset_count(&self) -> Result<Vec<SchoolListEntry>, AppError> {
        let entries = sqlx::query_as::<_, SchoolListEntry>(
            r#"
            SELECT t.id, t.name, t.code, t.tenant_type, t.active,
                   COUNT(a.id) AS asset_count
            FROM tenants t
            LEFT JOIN assets a ON a.tenant_id = t.id
            GROUP BY t.id
            ORDER BY t.name ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(entries)
    }

    // ---
    // Escritas
    // ---

    pub async fn create(&self, input: &CreateTenantPayload) -> Result<Tenant, AppError> {
        sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (name, tenant_type, code, address, phone, email, director)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
            .bind(&input.name)
            .bind(input.tenant_type)
            .bind(&input.code)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.director)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, |_| AppError::TenantCodeAlreadyExists(input.code.clone())))
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        input: &UpdateTenantPayload,
    ) -> Result<Option<Tenant>, AppError> {
        // Campos ausentes (NULL) mantêm o valor atual
        sqlx::query_as::<_, Tenant>(
            r#"
            UPDATE tenants SET
                name = COALESCE($2, name),
                tenant_type = COALESCE($3, tenant_type),
                code = COALESCE($4, code),
                address = COALESCE($5, address),
                phone = COALESCE($6, phone),
                email = COALESCE($7, email),
                director = COALESCE($8, director),
                active = COALESCE($9, active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(tenant_id)
            .bind(&input.name)
            .bind(input.tenant_type)
            .bind(&input.code)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.director)
            .bind(input.active)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                map_unique_violation(e, |_| {
                    AppError::TenantCodeAlreadyExists(input.code.clone().unwrap_or_default())
                })
            })
    }

    /// Quantos usuários e bens ainda apontam para a unidade.
    pub async fn count_dependents<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<(i64, i64), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users WHERE tenant_id = $1),
                (SELECT COUNT(*) FROM assets WHERE tenant_id = $1)
            "#,
        )
            .bind(tenant_id)
            .fetch_one(executor)
            .await?;
        Ok(counts)
    }

    pub async fn delete<'e, E>(&self, executor: E, tenant_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM tenants WHERE id = $1")
            .bind(tenant_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// src/db/asset_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;
use crate::{
    common::{
        db_utils::{is_foreign_key_violation, map_unique_violation},
        error::AppError,
    },
    models::{
        asset::{Asset, AssetCategory, AssetFilter, AssetStatus, PublicAssetView, UpdateAssetPayload},
        reports::CategoryAssetRow,
    },
};

// Bem pronto para inserção (código e escola já resolvidos pelo serviço)
pub struct NewAsset<'a> {
    pub code: &'a str,
    pub serial_number: Option<&'a str>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category: AssetCategory,
    pub brand: Option<&'a str>,
    pub model: Option<&'a str>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_value: Option<Decimal>,
    pub status: AssetStatus,
    pub location: Option<&'a str>,
    pub responsible: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub tenant_id: Uuid,
}

#[derive(Clone)]
pub struct AssetRepository {
    pool: PgPool,
}

impl AssetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras
    // ---

    pub async fn find_by_id<'e, E>(&self, executor: E, asset_id: Uuid) -> Result<Option<Asset>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let asset = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
            .bind(asset_id)
            .fetch_optional(executor)
            .await?;
        Ok(asset)
    }

    pub async fn list(&self, filter: &AssetFilter) -> Result<Vec<Asset>, AppError> {
        let search = filter.search.as_deref().map(|s| format!("%{}%", s.trim()));

        let assets = sqlx::query_as::<_, Asset>(
            r#"
            SELECT * FROM assets
            WHERE ($1::uuid IS NULL OR tenant_id = $1)
              AND ($2::asset_status IS NULL OR status = $2)
              AND ($3::asset_category IS NULL OR category = $3)
              AND ($4::text IS NULL OR name ILIKE $4 OR code ILIKE $4 OR serial_number ILIKE $4)
            ORDER BY code ASC
            "#,
        )
            .bind(filter.tenant_id)
            .bind(filter.status)
            .bind(filter.category)
            .bind(search)
            .fetch_all(&self.pool)
            .await?;
        Ok(assets)
    }

    /// Dados exibidos na página pública do QR Code.
    pub async fn find_public_view(&self, asset_id: Uuid) -> Result<Option<PublicAssetView>, AppError> {
        let view = sqlx::query_as::<_, PublicAssetView>(
            r#"
            SELECT a.id, a.code, a.name, a.category, a.status, a.location,
                   t.name AS tenant_name
            FROM assets a
            JOIN tenants t ON t.id = a.tenant_id
            WHERE a.id = $1
            "#,
        )
            .bind(asset_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(view)
    }

    /// Bens de uma unidade ordenados por categoria e código (inventário).
    pub async fn list_for_inventory<'e, E>(&self, executor: E, tenant_id: Uuid) -> Result<Vec<Asset>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assets = sqlx::query_as::<_, Asset>(
            r#"
            SELECT * FROM assets
            WHERE tenant_id = $1
            ORDER BY category::text ASC, code ASC
            "#,
        )
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;
        Ok(assets)
    }

    /// Bens de uma categoria em todas as unidades, ordenados por unidade e código.
    pub async fn list_for_category<'e, E>(
        &self,
        executor: E,
        category: AssetCategory,
    ) -> Result<Vec<CategoryAssetRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, CategoryAssetRow>(
            r#"
            SELECT a.*, t.name AS tenant_name
            FROM assets a
            JOIN tenants t ON t.id = a.tenant_id
            WHERE a.category = $1
            ORDER BY t.name ASC, t.id ASC, a.code ASC
            "#,
        )
            .bind(category)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }

    // ---
    // Escritas
    // ---

    /// Próximo número da sequência de patrimônio.
    pub async fn next_code_number<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let next: i64 = sqlx::query_scalar("SELECT nextval('asset_code_seq')")
            .fetch_one(executor)
            .await?;
        Ok(next)
    }

    pub async fn create<'e, E>(&self, executor: E, input: NewAsset<'_>) -> Result<Asset, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                code, serial_number, name, description, category, brand, model,
                purchase_date, purchase_value, status, location, responsible, notes, tenant_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
            .bind(input.code)
            .bind(input.serial_number)
            .bind(input.name)
            .bind(input.description)
            .bind(input.category)
            .bind(input.brand)
            .bind(input.model)
            .bind(input.purchase_date)
            .bind(input.purchase_value)
            .bind(input.status)
            .bind(input.location)
            .bind(input.responsible)
            .bind(input.notes)
            .bind(input.tenant_id)
            .fetch_one(executor)
            .await
            .map_err(|e| asset_write_error(e, input.code))
    }

    /// Campos ausentes mantêm o valor atual (`COALESCE`); por isso um campo
    /// opcional não é apagado por esta rota, apenas substituído.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        asset_id: Uuid,
        input: &UpdateAssetPayload,
    ) -> Result<Option<Asset>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Asset>(
            r#"
            UPDATE assets SET
                code = COALESCE($2, code),
                serial_number = COALESCE($3, serial_number),
                name = COALESCE($4, name),
                description = COALESCE($5, description),
                category = COALESCE($6, category),
                brand = COALESCE($7, brand),
                model = COALESCE($8, model),
                purchase_date = COALESCE($9, purchase_date),
                purchase_value = COALESCE($10, purchase_value),
                status = COALESCE($11, status),
                location = COALESCE($12, location),
                responsible = COALESCE($13, responsible),
                notes = COALESCE($14, notes),
                tenant_id = COALESCE($15, tenant_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(asset_id)
            .bind(&input.code)
            .bind(&input.serial_number)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.purchase_date)
            .bind(input.purchase_value)
            .bind(input.status)
            .bind(&input.location)
            .bind(&input.responsible)
            .bind(&input.notes)
            .bind(input.tenant_id)
            .fetch_optional(executor)
            .await
            .map_err(|e| asset_write_error(e, input.code.as_deref().unwrap_or_default()))
    }

    pub async fn delete(&self, asset_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(asset_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// Escola inexistente (FK) ou código repetido (unique) viram erros de domínio
fn asset_write_error(err: sqlx::Error, code: &str) -> AppError {
    if is_foreign_key_violation(&err) {
        return AppError::unknown_tenant();
    }
    map_unique_violation(err, |_| AppError::AssetCodeAlreadyExists(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::db_utils::tests::constraint_error;

    #[test]
    fn missing_tenant_becomes_a_field_error() {
        let err = asset_write_error(constraint_error(false, "assets_tenant_id_fkey"), "PAT-1");
        assert!(matches!(err, AppError::InvalidField { field: "tenantId", .. }));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicated_code_is_a_conflict() {
        let err = asset_write_error(constraint_error(true, "assets_code_key"), "PAT-1");
        assert!(matches!(err, AppError::AssetCodeAlreadyExists(ref code) if code == "PAT-1"));
    }

    #[test]
    fn other_failures_stay_internal() {
        let err = asset_write_error(sqlx::Error::PoolTimedOut, "PAT-1");
        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}

// src/services/tenancy_service.rs

use uuid::Uuid;
use crate::{
    common::{db_utils::is_foreign_key_violation, error::AppError},
    db::TenantRepository,
    middleware::tenancy::TenantScope,
    models::tenancy::{CreateTenantPayload, Tenant, UpdateTenantPayload},
};

#[derive(Clone)]
pub struct TenantService {
    tenant_repo: TenantRepository,
}

impl TenantService {
    pub fn new(tenant_repo: TenantRepository) -> Self {
        Self { tenant_repo }
    }

    pub async fn list(&self) -> Result<Vec<Tenant>, AppError> {
        self.tenant_repo.list_all(self.tenant_repo.pool()).await
    }

    /// Usuários de escola só enxergam a própria unidade.
    pub async fn get(&self, caller: TenantScope, tenant_id: Uuid) -> Result<Tenant, AppError> {
        caller.ensure_admits(tenant_id)?;

        self.tenant_repo
            .find_by_id(self.tenant_repo.pool(), tenant_id)
            .await?
            .ok_or(AppError::NotFound("Unidade"))
    }

    pub async fn create(&self, payload: &CreateTenantPayload) -> Result<Tenant, AppError> {
        let tenant = self.tenant_repo.create(payload).await?;
        tracing::info!("🏫 Unidade criada: {} ({})", tenant.name, tenant.code);
        Ok(tenant)
    }

    pub async fn update(&self, tenant_id: Uuid, payload: &UpdateTenantPayload) -> Result<Tenant, AppError> {
        self.tenant_repo
            .update(tenant_id, payload)
            .await?
            .ok_or(AppError::NotFound("Unidade"))
    }

    /// Exclusão só é permitida para unidades sem usuários nem bens.
    /// Caso contrário a unidade deve ser desativada (`active = false`).
    pub async fn delete(&self, tenant_id: Uuid) -> Result<(), AppError> {
        // 1. Inicia a transação
        let mut tx = self.tenant_repo.pool().begin().await?;

        // 2. Confere dependentes
        let (users, assets) = self.tenant_repo.count_dependents(&mut *tx, tenant_id).await?;
        if users > 0 || assets > 0 {
            tracing::warn!(
                "🚫 Exclusão da unidade {} recusada: {} usuário(s), {} bem(ns)",
                tenant_id, users, assets
            );
            return Err(AppError::TenantHasDependents { users, assets });
        }

        // 3. Exclui. Um vínculo criado em paralelo ainda é barrado pela FK.
        let deleted = match self.tenant_repo.delete(&mut *tx, tenant_id).await {
            Err(AppError::DatabaseError(e)) if is_foreign_key_violation(&e) => {
                return Err(AppError::TenantHasDependents { users, assets });
            }
            other => other?,
        };

        if !deleted {
            return Err(AppError::NotFound("Unidade"));
        }

        tx.commit().await?;
        tracing::info!("🗑️ Unidade {} excluída", tenant_id);
        Ok(())
    }
}

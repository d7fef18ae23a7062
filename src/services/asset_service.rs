// src/services/asset_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;
use crate::{
    common::error::AppError,
    db::{asset_repo::NewAsset, AssetRepository, TenantRepository, TicketRepository},
    middleware::tenancy::TenantScope,
    models::{
        asset::{Asset, AssetFilter, AssetStatus, CreateAssetPayload, PublicAssetView, UpdateAssetPayload},
        settings::PatrimonyConfig,
    },
    services::settings_service::SettingsService,
};

#[derive(Clone)]
pub struct AssetService {
    repo: AssetRepository,
    tenant_repo: TenantRepository,
    ticket_repo: TicketRepository,
    settings: SettingsService,
}

impl AssetService {
    pub fn new(
        repo: AssetRepository,
        tenant_repo: TenantRepository,
        ticket_repo: TicketRepository,
        settings: SettingsService,
    ) -> Self {
        Self { repo, tenant_repo, ticket_repo, settings }
    }

    pub async fn list(&self, caller: TenantScope, mut filter: AssetFilter) -> Result<Vec<Asset>, AppError> {
        filter.tenant_id = caller.narrow(filter.tenant_id)?;
        self.repo.list(&filter).await
    }

    pub async fn get(&self, caller: TenantScope, asset_id: Uuid) -> Result<Asset, AppError> {
        let asset = self.repo
            .find_by_id(self.repo.pool(), asset_id)
            .await?
            .ok_or(AppError::NotFound("Bem"))?;

        caller.ensure_admits(asset.tenant_id)?;
        Ok(asset)
    }

    /// Dados da página pública (sem autenticação).
    pub async fn public_view(&self, asset_id: Uuid) -> Result<PublicAssetView, AppError> {
        self.repo
            .find_public_view(asset_id)
            .await?
            .ok_or(AppError::NotFound("Bem"))
    }

    pub async fn create(&self, caller: TenantScope, payload: &CreateAssetPayload) -> Result<Asset, AppError> {
        let tenant_id = resolve_tenant(caller, payload.tenant_id)?;
        check_purchase_value(payload.purchase_value)?;
        self.ensure_tenant_exists(tenant_id).await?;

        // Regras de cadastro lidas a cada uso
        let config = self.settings.patrimony().await?;
        check_location(&config, payload.location.as_deref())?;

        let code = match payload.code.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) => code.to_string(),
            None if config.auto_generate => {
                let next = self.repo.next_code_number(self.repo.pool()).await?;
                format_asset_code(&config.code_prefix, next)
            }
            None => {
                return Err(AppError::InvalidField {
                    field: "code",
                    message: "O código do patrimônio é obrigatório.".to_string(),
                });
            }
        };

        let asset = self.repo
            .create(
                self.repo.pool(),
                NewAsset {
                    code: &code,
                    serial_number: payload.serial_number.as_deref(),
                    name: &payload.name,
                    description: payload.description.as_deref(),
                    category: payload.category,
                    brand: payload.brand.as_deref(),
                    model: payload.model.as_deref(),
                    purchase_date: payload.purchase_date,
                    purchase_value: payload.purchase_value,
                    status: payload.status.unwrap_or(AssetStatus::Ativo),
                    location: payload.location.as_deref(),
                    responsible: payload.responsible.as_deref(),
                    notes: payload.notes.as_deref(),
                    tenant_id,
                },
            )
            .await?;

        tracing::info!("📦 Bem {} cadastrado na unidade {}", asset.code, asset.tenant_id);
        Ok(asset)
    }

    pub async fn update(
        &self,
        caller: TenantScope,
        asset_id: Uuid,
        payload: &UpdateAssetPayload,
    ) -> Result<Asset, AppError> {
        let current = self.get(caller, asset_id).await?;
        check_purchase_value(payload.purchase_value)?;

        // Transferir para outra unidade exige enxergar o destino
        let transfer = tenant_transfer(current.tenant_id, payload.tenant_id);
        if let Some(target) = transfer {
            caller.ensure_admits(target)?;
            self.ensure_tenant_exists(target).await?;
        }

        // Bem e chamados mudam de unidade juntos
        let mut tx = self.repo.pool().begin().await?;

        let asset = self.repo
            .update(&mut *tx, asset_id, payload)
            .await?
            .ok_or(AppError::NotFound("Bem"))?;

        if let Some(target) = transfer {
            let moved = self.ticket_repo.move_to_tenant(&mut *tx, asset_id, target).await?;
            tracing::info!(
                "🔀 Bem {} transferido de {} para {} ({} chamado(s) acompanharam)",
                asset.code, current.tenant_id, target, moved
            );
        }

        tx.commit().await?;
        Ok(asset)
    }

    pub async fn delete(&self, caller: TenantScope, asset_id: Uuid) -> Result<(), AppError> {
        self.get(caller, asset_id).await?;

        if !self.repo.delete(asset_id).await? {
            return Err(AppError::NotFound("Bem"));
        }
        Ok(())
    }

    async fn ensure_tenant_exists(&self, tenant_id: Uuid) -> Result<(), AppError> {
        self.tenant_repo
            .find_by_id(self.tenant_repo.pool(), tenant_id)
            .await?
            .map(|_| ())
            .ok_or_else(AppError::unknown_tenant)
    }
}

// ---
// Regras puras
// ---

/// `PAT-000123`
pub fn format_asset_code(prefix: &str, number: i64) -> String {
    format!("{}-{:06}", prefix.trim(), number)
}

// Usuário de escola sempre cadastra na própria unidade
fn resolve_tenant(caller: TenantScope, requested: Option<Uuid>) -> Result<Uuid, AppError> {
    match caller {
        TenantScope::Tenant(own) => Ok(own),
        TenantScope::All => requested.ok_or_else(|| AppError::InvalidField {
            field: "tenantId",
            message: "Informe a unidade do bem.".to_string(),
        }),
    }
}

/// Nova unidade do bem, apenas quando ela de fato muda.
fn tenant_transfer(current: Uuid, requested: Option<Uuid>) -> Option<Uuid> {
    requested.filter(|target| *target != current)
}

fn check_purchase_value(value: Option<Decimal>) -> Result<(), AppError> {
    match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => Err(AppError::InvalidField {
            field: "purchaseValue",
            message: "O valor de aquisição não pode ser negativo.".to_string(),
        }),
        _ => Ok(()),
    }
}

fn check_location(config: &PatrimonyConfig, location: Option<&str>) -> Result<(), AppError> {
    let missing = location.map(str::trim).is_none_or(str::is_empty);
    if config.require_location && missing {
        return Err(AppError::InvalidField {
            field: "location",
            message: "A localização do bem é obrigatória.".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_code_is_zero_padded() {
        assert_eq!(format_asset_code("PAT", 123), "PAT-000123");
        assert_eq!(format_asset_code("ESC", 1_234_567), "ESC-1234567");
    }

    #[test]
    fn school_users_always_create_in_their_school() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert_eq!(resolve_tenant(TenantScope::Tenant(own), Some(other)).unwrap(), own);
        assert_eq!(resolve_tenant(TenantScope::All, Some(other)).unwrap(), other);
        assert!(resolve_tenant(TenantScope::All, None).is_err());
    }

    #[test]
    fn negative_values_are_rejected() {
        assert!(check_purchase_value(Some("-0.01".parse().unwrap())).is_err());
        assert!(check_purchase_value(Some(Decimal::ZERO)).is_ok());
        assert!(check_purchase_value(None).is_ok());
    }

    #[test]
    fn location_is_required_only_when_configured() {
        let mut config = PatrimonyConfig::default();
        assert!(check_location(&config, None).is_ok());

        config.require_location = true;
        assert!(check_location(&config, None).is_err());
        assert!(check_location(&config, Some("  ")).is_err());
        assert!(check_location(&config, Some("Laboratório 2")).is_ok());
    }

    #[test]
    fn transfer_only_when_the_tenant_changes() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert_eq!(tenant_transfer(own, Some(other)), Some(other));
        assert_eq!(tenant_transfer(own, Some(own)), None);
        assert_eq!(tenant_transfer(own, None), None);
    }

    #[test]
    fn unknown_tenant_is_a_readable_field_error() {
        let err = AppError::unknown_tenant();
        assert!(matches!(err, AppError::InvalidField { field: "tenantId", .. }));
        assert_eq!(err.user_message(), "A unidade informada não existe.");
    }
}

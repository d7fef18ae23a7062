// src/services/settings_service.rs

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::{
    common::error::AppError,
    db::SettingsRepository,
    models::settings::{ConfigKey, PatrimonyConfig, QrCodeConfig, SystemConfig},
};

// Configurações persistidas. Sem cache: cada uso relê o banco.
#[derive(Clone)]
pub struct SettingsService {
    repo: SettingsRepository,
}

impl SettingsService {
    pub fn new(repo: SettingsRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<SystemConfig>, AppError> {
        self.repo.list_all().await
    }

    /// Chave ausente no banco devolve o valor padrão.
    pub async fn get(&self, raw_key: &str) -> Result<SystemConfig, AppError> {
        let key = parse_key(raw_key)?;

        let config = self.repo.get(key.as_str()).await?;
        Ok(config.unwrap_or_else(|| SystemConfig {
            key: key.as_str().to_string(),
            category: key.category().to_string(),
            value: key.default_value(),
            updated_at: Utc::now(),
        }))
    }

    pub async fn update(&self, raw_key: &str, value: Value) -> Result<SystemConfig, AppError> {
        let key = parse_key(raw_key)?;

        let normalized = key.normalize(value).map_err(|e| AppError::InvalidField {
            field: "value",
            message: format!("Valor inválido para '{}': {}", key, e),
        })?;

        let saved = self.repo.upsert(key.as_str(), key.category(), &normalized).await?;
        tracing::info!("⚙️ Configuração '{}' atualizada", key);
        Ok(saved)
    }

    pub async fn patrimony(&self) -> Result<PatrimonyConfig, AppError> {
        self.typed(ConfigKey::Patrimony).await
    }

    pub async fn qrcode(&self) -> Result<QrCodeConfig, AppError> {
        self.typed(ConfigKey::QrCode).await
    }

    // Valor gravado inválido cai no padrão em vez de derrubar a operação
    async fn typed<T>(&self, key: ConfigKey) -> Result<T, AppError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(config) = self.repo.get(key.as_str()).await? else {
            return Ok(T::default());
        };

        Ok(serde_json::from_value(config.value).unwrap_or_else(|e| {
            tracing::warn!("Configuração '{}' inválida no banco, usando padrão: {}", key, e);
            T::default()
        }))
    }
}

fn parse_key(raw: &str) -> Result<ConfigKey, AppError> {
    raw.parse::<ConfigKey>()
        .map_err(|message| AppError::InvalidField { field: "key", message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_is_a_validation_error() {
        let err = parse_key("smtp").unwrap_err();
        assert!(matches!(err, AppError::InvalidField { field: "key", .. }));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn known_keys_parse() {
        assert_eq!(parse_key("patrimony").unwrap(), ConfigKey::Patrimony);
    }
}

// src/models/settings.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

// Linha crua da tabela system_configs
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    #[schema(example = "institution")]
    pub key: String,
    #[schema(example = "general")]
    pub category: String,
    pub value: Value,
    pub updated_at: DateTime<Utc>,
}

// Chaves conhecidas. Outras chaves são recusadas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Institution,
    Patrimony,
    QrCode,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Institution => "institution",
            ConfigKey::Patrimony => "patrimony",
            ConfigKey::QrCode => "qrcode",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            ConfigKey::Institution => "general",
            ConfigKey::Patrimony => "assets",
            ConfigKey::QrCode => "labels",
        }
    }

    /// Normaliza o JSON recebido passando pela struct tipada
    /// (preenche padrões e recusa tipos errados).
    pub fn normalize(&self, raw: Value) -> Result<Value, serde_json::Error> {
        match self {
            ConfigKey::Institution => serde_json::to_value(serde_json::from_value::<InstitutionConfig>(raw)?),
            ConfigKey::Patrimony => serde_json::to_value(serde_json::from_value::<PatrimonyConfig>(raw)?),
            ConfigKey::QrCode => serde_json::to_value(serde_json::from_value::<QrCodeConfig>(raw)?),
        }
    }

    pub fn default_value(&self) -> Value {
        let value = match self {
            ConfigKey::Institution => serde_json::to_value(InstitutionConfig::default()),
            ConfigKey::Patrimony => serde_json::to_value(PatrimonyConfig::default()),
            ConfigKey::QrCode => serde_json::to_value(QrCodeConfig::default()),
        };
        value.unwrap_or(Value::Null)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "institution" => Ok(ConfigKey::Institution),
            "patrimony" => Ok(ConfigKey::Patrimony),
            "qrcode" => Ok(ConfigKey::QrCode),
            other => Err(format!("Chave de configuração desconhecida: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct InstitutionConfig {
    #[schema(example = "Secretaria Municipal de Educação")]
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PatrimonyConfig {
    #[schema(example = "PAT")]
    pub code_prefix: String,
    pub auto_generate: bool,
    pub require_photo: bool,
    pub require_location: bool,
}

impl Default for PatrimonyConfig {
    fn default() -> Self {
        Self {
            code_prefix: "PAT".to_string(),
            auto_generate: true,
            require_photo: false,
            require_location: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum QrImageFormat {
    Png,
    Svg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct QrCodeConfig {
    // Lado mínimo da imagem, em pixels
    #[schema(example = 300)]
    pub size: u32,
    pub include_logo: bool,
    pub format: QrImageFormat,
}

impl Default for QrCodeConfig {
    fn default() -> Self {
        Self {
            size: 300,
            include_logo: false,
            format: QrImageFormat::Png,
        }
    }
}

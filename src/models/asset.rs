// src/models/asset.rs

use serde::{Serialize, Deserialize};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "asset_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    Ativo,
    Inativo,
    Manutencao,
    Baixado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "asset_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetCategory {
    Mobiliario,
    Informatica,
    Eletronico,
    Eletrodomestico,
    Esportivo,
    Pedagogico,
    Veiculo,
    Outros,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 8] = [
        AssetCategory::Mobiliario,
        AssetCategory::Informatica,
        AssetCategory::Eletronico,
        AssetCategory::Eletrodomestico,
        AssetCategory::Esportivo,
        AssetCategory::Pedagogico,
        AssetCategory::Veiculo,
        AssetCategory::Outros,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Mobiliario => "MOBILIARIO",
            AssetCategory::Informatica => "INFORMATICA",
            AssetCategory::Eletronico => "ELETRONICO",
            AssetCategory::Eletrodomestico => "ELETRODOMESTICO",
            AssetCategory::Esportivo => "ESPORTIVO",
            AssetCategory::Pedagogico => "PEDAGOGICO",
            AssetCategory::Veiculo => "VEICULO",
            AssetCategory::Outros => "OUTROS",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetCategory {
    type Err = String;

    // Aceita minúsculas vindas da URL (/reports/category/informatica)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        AssetCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| format!("Categoria desconhecida: {}", s))
    }
}

// --- Bem patrimonial ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: Uuid,

    #[schema(example = "PAT-000123")]
    pub code: String,

    pub serial_number: Option<String>,

    #[schema(example = "Notebook Positivo")]
    pub name: String,

    pub description: Option<String>,
    pub category: AssetCategory,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub purchase_date: Option<NaiveDate>,

    // Nulo conta como zero em qualquer soma
    #[schema(value_type = Option<String>, example = "3599.90")]
    pub purchase_value: Option<Decimal>,

    pub status: AssetStatus,
    pub location: Option<String>,
    pub responsible: Option<String>,
    pub notes: Option<String>,
    pub tenant_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    pub fn value_or_zero(&self) -> Decimal {
        self.purchase_value.unwrap_or(Decimal::ZERO)
    }
}

// Visão pública (página aberta pelo QR Code)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicAssetView {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub category: AssetCategory,
    pub status: AssetStatus,
    pub location: Option<String>,
    pub tenant_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetPayload {
    // Opcional quando a numeração automática está ligada
    #[validate(length(min = 1, message = "O código do patrimônio não pode ser vazio."))]
    pub code: Option<String>,

    pub serial_number: Option<String>,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub description: Option<String>,
    pub category: AssetCategory,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub purchase_date: Option<NaiveDate>,

    #[schema(value_type = Option<String>, example = "3599.90")]
    pub purchase_value: Option<Decimal>,

    pub status: Option<AssetStatus>,
    pub location: Option<String>,
    pub responsible: Option<String>,
    pub notes: Option<String>,

    // Ignorado para usuários de escola: o bem vai para a escola do usuário
    pub tenant_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetPayload {
    #[validate(length(min = 1, message = "O código do patrimônio não pode ser vazio."))]
    pub code: Option<String>,
    pub serial_number: Option<String>,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<AssetCategory>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub purchase_value: Option<Decimal>,
    // Qualquer status pode ir para qualquer outro
    pub status: Option<AssetStatus>,
    pub location: Option<String>,
    pub responsible: Option<String>,
    pub notes: Option<String>,
    pub tenant_id: Option<Uuid>,
}

// Filtros do GET /api/assets
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AssetFilter {
    pub tenant_id: Option<Uuid>,
    pub status: Option<AssetStatus>,
    pub category: Option<AssetCategory>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("informatica".parse::<AssetCategory>(), Ok(AssetCategory::Informatica));
        assert_eq!(" VEICULO ".parse::<AssetCategory>(), Ok(AssetCategory::Veiculo));
        assert!("computadores".parse::<AssetCategory>().is_err());
    }

    #[test]
    fn status_uses_portuguese_wire_names() {
        let json = serde_json::to_string(&AssetStatus::Manutencao).unwrap();
        assert_eq!(json, "\"MANUTENCAO\"");
    }
}

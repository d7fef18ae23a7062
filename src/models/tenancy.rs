// src/models/tenancy.rs

use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tenant_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantType {
    Secretaria,
    Regional,
    Escola,
}

// ---
// 1. Tenant (Secretaria, Regional ou Escola)
// ---
// Dono dos seus usuários, bens e chamados.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,

    #[schema(example = "EMEF Monteiro Lobato")]
    pub name: String,

    #[serde(rename = "type")]
    pub tenant_type: TenantType,

    #[schema(example = "ESC-001")]
    pub code: String,

    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub director: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Referência curta usada dentro de relatórios e da página pública.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenantRef {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub tenant_type: TenantType,
}

impl From<&Tenant> for TenantRef {
    fn from(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id,
            name: tenant.name.clone(),
            code: tenant.code.clone(),
            tenant_type: tenant.tenant_type,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantPayload {
    #[validate(length(min = 1, message = "O nome da unidade é obrigatório."))]
    #[schema(example = "EMEF Monteiro Lobato")]
    pub name: String,

    #[serde(rename = "type")]
    pub tenant_type: TenantType,

    #[validate(length(min = 1, message = "O código da unidade é obrigatório."))]
    #[schema(example = "ESC-001")]
    pub code: String,

    pub address: Option<String>,
    pub phone: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub director: Option<String>,
}

// Edição parcial: campos ausentes mantêm o valor atual.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenantPayload {
    #[validate(length(min = 1, message = "O nome da unidade é obrigatório."))]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub tenant_type: Option<TenantType>,

    #[validate(length(min = 1, message = "O código da unidade é obrigatório."))]
    pub code: Option<String>,

    pub address: Option<String>,
    pub phone: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub director: Option<String>,
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_reads_type_field() {
        let payload: CreateTenantPayload = serde_json::from_value(serde_json::json!({
            "name": "EMEF Monteiro Lobato",
            "type": "ESCOLA",
            "code": "ESC-001"
        }))
        .unwrap();

        assert_eq!(payload.tenant_type, TenantType::Escola);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn create_payload_rejects_blank_name_and_bad_email() {
        let payload = CreateTenantPayload {
            name: String::new(),
            tenant_type: TenantType::Regional,
            code: "REG-01".into(),
            address: None,
            phone: None,
            email: Some("não-é-email".into()),
            director: None,
        };

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }
}

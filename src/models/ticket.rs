// src/models/ticket.rs

use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "ticket_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Aberto,
    EmAndamento,
    Resolvido,
    Fechado,
    Cancelado,
}

impl TicketStatus {
    /// Chamado ainda aguardando atendimento.
    pub fn is_open(&self) -> bool {
        matches!(self, TicketStatus::Aberto | TicketStatus::EmAndamento)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "ticket_priority", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketPriority {
    Baixa,
    Media,
    Alta,
    Urgente,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "ticket_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketCategory {
    Manutencao,
    Suporte,
    Baixa, // Pedido de baixa patrimonial
    Transferencia,
    Outros,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub asset_id: Uuid,
    pub tenant_id: Uuid,
    pub requester_id: Option<Uuid>,
    // Preenchido quando o chamado vem da página pública
    pub requester_name: Option<String>,
    pub assignee_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketPayload {
    #[validate(length(min = 3, message = "O título deve ter no mínimo 3 caracteres."))]
    pub title: String,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    pub category: TicketCategory,
    pub priority: Option<TicketPriority>,
    pub asset_id: Uuid,
}

// Chamado aberto por quem escaneou o QR Code, sem conta no sistema
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicTicketPayload {
    #[validate(length(min = 3, message = "O título deve ter no mínimo 3 caracteres."))]
    pub title: String,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    pub category: TicketCategory,

    #[validate(length(min = 2, message = "Informe o seu nome."))]
    pub requester_name: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketPayload {
    #[validate(length(min = 3, message = "O título deve ter no mínimo 3 caracteres."))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<TicketCategory>,
    pub priority: Option<TicketPriority>,
    pub status: Option<TicketStatus>,
    pub assignee_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TicketFilter {
    pub tenant_id: Option<Uuid>,
    pub asset_id: Option<Uuid>,
    pub status: Option<TicketStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_aberto_and_em_andamento_are_open() {
        assert!(TicketStatus::Aberto.is_open());
        assert!(TicketStatus::EmAndamento.is_open());
        assert!(!TicketStatus::Resolvido.is_open());
        assert!(!TicketStatus::Fechado.is_open());
        assert!(!TicketStatus::Cancelado.is_open());
    }
}

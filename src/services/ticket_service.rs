// src/services/ticket_service.rs

use uuid::Uuid;
use crate::{
    common::error::AppError,
    db::{ticket_repo::NewTicket, AssetRepository, TicketRepository},
    middleware::tenancy::TenantScope,
    models::{
        asset::Asset,
        ticket::{CreateTicketPayload, PublicTicketPayload, Ticket, TicketFilter, TicketPriority, UpdateTicketPayload},
    },
};

#[derive(Clone)]
pub struct TicketService {
    repo: TicketRepository,
    asset_repo: AssetRepository,
}

impl TicketService {
    pub fn new(repo: TicketRepository, asset_repo: AssetRepository) -> Self {
        Self { repo, asset_repo }
    }

    pub async fn list(&self, caller: TenantScope, mut filter: TicketFilter) -> Result<Vec<Ticket>, AppError> {
        filter.tenant_id = caller.narrow(filter.tenant_id)?;
        self.repo.list(&filter).await
    }

    pub async fn get(&self, caller: TenantScope, ticket_id: Uuid) -> Result<Ticket, AppError> {
        let ticket = self.repo
            .find_by_id(ticket_id)
            .await?
            .ok_or(AppError::NotFound("Chamado"))?;

        caller.ensure_admits(ticket.tenant_id)?;
        Ok(ticket)
    }

    /// A unidade do chamado é sempre a do bem.
    pub async fn create(
        &self,
        caller: TenantScope,
        requester_id: Uuid,
        payload: &CreateTicketPayload,
    ) -> Result<Ticket, AppError> {
        let asset = self.find_asset(payload.asset_id).await?;
        caller.ensure_admits(asset.tenant_id)?;

        let ticket = self.repo
            .create(NewTicket {
                title: &payload.title,
                description: &payload.description,
                category: payload.category,
                priority: payload.priority.unwrap_or(TicketPriority::Media),
                asset_id: asset.id,
                tenant_id: asset.tenant_id,
                requester_id: Some(requester_id),
                requester_name: None,
            })
            .await?;

        tracing::info!("🎫 Chamado {} aberto para o bem {}", ticket.id, asset.code);
        Ok(ticket)
    }

    /// Chamado aberto pela página pública do QR Code, sem conta.
    pub async fn create_public(&self, asset_id: Uuid, payload: &PublicTicketPayload) -> Result<Ticket, AppError> {
        let asset = self.find_asset(asset_id).await?;

        let ticket = self.repo
            .create(NewTicket {
                title: &payload.title,
                description: &payload.description,
                category: payload.category,
                priority: TicketPriority::Media,
                asset_id: asset.id,
                tenant_id: asset.tenant_id,
                requester_id: None,
                requester_name: Some(payload.requester_name.trim()),
            })
            .await?;

        tracing::info!("🎫 Chamado público {} aberto para o bem {}", ticket.id, asset.code);
        Ok(ticket)
    }

    pub async fn update(
        &self,
        caller: TenantScope,
        ticket_id: Uuid,
        payload: &UpdateTicketPayload,
    ) -> Result<Ticket, AppError> {
        self.get(caller, ticket_id).await?;

        self.repo
            .update(ticket_id, payload)
            .await?
            .ok_or(AppError::NotFound("Chamado"))
    }

    pub async fn delete(&self, caller: TenantScope, ticket_id: Uuid) -> Result<(), AppError> {
        self.get(caller, ticket_id).await?;

        if !self.repo.delete(ticket_id).await? {
            return Err(AppError::NotFound("Chamado"));
        }
        Ok(())
    }

    async fn find_asset(&self, asset_id: Uuid) -> Result<Asset, AppError> {
        self.asset_repo
            .find_by_id(self.asset_repo.pool(), asset_id)
            .await?
            .ok_or(AppError::NotFound("Bem"))
    }
}

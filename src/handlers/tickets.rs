// src/handlers/tickets.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{PermTickets, RequirePermission},
        tenancy::TenantScope,
    },
    models::ticket::{CreateTicketPayload, Ticket, TicketFilter, UpdateTicketPayload},
};

// GET /api/tickets
#[utoipa::path(
    get,
    path = "/api/tickets",
    tag = "Tickets",
    params(TicketFilter),
    responses(
        (status = 200, description = "Chamados, mais recentes primeiro", body = Vec<Ticket>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_tickets(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermTickets>,
    scope: TenantScope,
    Query(filter): Query<TicketFilter>,
) -> Result<impl IntoResponse, AppError> {
    let tickets = app_state.ticket_service.list(scope, filter).await?;
    Ok((StatusCode::OK, Json(tickets)))
}

// POST /api/tickets
#[utoipa::path(
    post,
    path = "/api/tickets",
    tag = "Tickets",
    request_body = CreateTicketPayload,
    responses(
        (status = 201, description = "Chamado aberto", body = Ticket),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Bem não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_ticket(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermTickets>,
    scope: TenantScope,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateTicketPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ticket = app_state.ticket_service.create(scope, user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

// GET /api/tickets/{id}
#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    tag = "Tickets",
    params(("id" = Uuid, Path, description = "ID do chamado")),
    responses(
        (status = 200, description = "Chamado", body = Ticket),
        (status = 404, description = "Chamado não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_ticket(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermTickets>,
    scope: TenantScope,
    Path(ticket_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let ticket = app_state.ticket_service.get(scope, ticket_id).await?;
    Ok((StatusCode::OK, Json(ticket)))
}

// PUT /api/tickets/{id}
#[utoipa::path(
    put,
    path = "/api/tickets/{id}",
    tag = "Tickets",
    params(("id" = Uuid, Path, description = "ID do chamado")),
    request_body = UpdateTicketPayload,
    responses(
        (status = 200, description = "Chamado atualizado", body = Ticket),
        (status = 404, description = "Chamado não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_ticket(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermTickets>,
    scope: TenantScope,
    Path(ticket_id): Path<Uuid>,
    Json(payload): Json<UpdateTicketPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ticket = app_state.ticket_service.update(scope, ticket_id, &payload).await?;
    Ok((StatusCode::OK, Json(ticket)))
}

// DELETE /api/tickets/{id}
#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    tag = "Tickets",
    params(("id" = Uuid, Path, description = "ID do chamado")),
    responses(
        (status = 204, description = "Chamado excluído"),
        (status = 404, description = "Chamado não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_ticket(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermTickets>,
    scope: TenantScope,
    Path(ticket_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.ticket_service.delete(scope, ticket_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

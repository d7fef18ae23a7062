// src/handlers/public.rs
//
// Rotas abertas: a página que o QR Code da etiqueta abre.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        asset::PublicAssetView,
        ticket::{PublicTicketPayload, Ticket},
    },
};

// GET /public/assets/{id}
#[utoipa::path(
    get,
    path = "/public/assets/{id}",
    tag = "Public",
    params(("id" = Uuid, Path, description = "ID do bem")),
    responses(
        (status = 200, description = "Dados públicos do bem", body = PublicAssetView),
        (status = 404, description = "Bem não encontrado")
    )
)]
pub async fn get_public_asset(
    State(app_state): State<AppState>,
    Path(asset_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let view = app_state.asset_service.public_view(asset_id).await?;
    Ok((StatusCode::OK, Json(view)))
}

// POST /public/assets/{id}/tickets
#[utoipa::path(
    post,
    path = "/public/assets/{id}/tickets",
    tag = "Public",
    params(("id" = Uuid, Path, description = "ID do bem")),
    request_body = PublicTicketPayload,
    responses(
        (status = 201, description = "Chamado aberto", body = Ticket),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Bem não encontrado")
    )
)]
pub async fn create_public_ticket(
    State(app_state): State<AppState>,
    Path(asset_id): Path<Uuid>,
    Json(payload): Json<PublicTicketPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ticket = app_state.ticket_service.create_public(asset_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

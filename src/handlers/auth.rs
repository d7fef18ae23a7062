use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{PermUsers, RequirePermission},
    },
    models::{
        access::{AccessProfile, RoleAccessPreview},
        auth::{AuthResponse, LoginUserPayload, User},
    },
    services::access_policy::{access_profile, role_preview},
};

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login realizado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas ou usuário desativado")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let response = app_state.auth_service
        .login_user(payload.email.trim(), &payload.password)
        .await?;

    Ok(Json(response))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário da sessão", body = User),
        (status = 401, description = "Sessão inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}

// Permissões e menu recalculados a partir do perfil gravado
#[utoipa::path(
    get,
    path = "/api/me/access",
    tag = "Auth",
    responses(
        (status = 200, description = "Permissões e menu do usuário", body = AccessProfile)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_access(AuthenticatedUser(user): AuthenticatedUser) -> Json<AccessProfile> {
    Json(access_profile(user.role))
}

#[utoipa::path(
    get,
    path = "/api/access/roles/{role}",
    tag = "Auth",
    params(("role" = String, Path, description = "Perfil, ex.: GESTOR_ESCOLAR")),
    responses(
        (status = 200, description = "Permissões que o perfil receberia", body = RoleAccessPreview),
        (status = 403, description = "Sem permissão para gerenciar usuários")
    ),
    security(("api_jwt" = []))
)]
pub async fn preview_role_access(
    _guard: RequirePermission<PermUsers>,
    Path(role): Path<String>,
) -> Json<RoleAccessPreview> {
    Json(role_preview(&role))
}

// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::{error::AppError, outcome::Outcome},
    middleware::auth::AuthenticatedUser,
    models::access::{Permissions, Role},
    services::access_policy::permissions_for,
};

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    fn description() -> &'static str;
    fn allows(role: Role, permissions: &Permissions) -> bool;
}

/// 2. O Extractor (Guardião)
pub struct RequirePermission<T>(pub PhantomData<T>);

/// Confere o perfil do usuário da sessão contra a permissão `T`.
pub fn ensure_permission<T: PermissionDef>(user: &AuthenticatedUser) -> Result<(), AppError> {
    // Permissões calculadas a partir do perfil gravado no banco
    let role = user.0.role;
    let permissions = permissions_for(role);

    if !T::allows(role, &permissions) {
        tracing::warn!("🚫 Perfil {} sem permissão para '{}'", role, T::description());
        return Err(AppError::Forbidden(format!(
            "Seu perfil não tem permissão para {}.",
            T::description()
        )));
    }
    Ok(())
}

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Usuário já validado pelo auth_guard
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        ensure_permission::<T>(&user)?;
        Ok(RequirePermission(PhantomData))
    }
}

/// 4. Mesmo guardião para painéis e relatórios: a recusa sai no envelope
/// `{message, error: true, kind}` com HTTP 200, como os demais erros dessas rotas.
pub struct RequirePermissionOutcome<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermissionOutcome<T>
where
    T: PermissionDef,
    S: Send + Sync,
{
    type Rejection = Outcome<()>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        RequirePermission::<T>::from_request_parts(parts, state)
            .await
            .map(|_| RequirePermissionOutcome(PhantomData))
            .map_err(|err| Outcome::from_error(err, "Erro ao verificar permissões"))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

pub struct PermDashboard;
impl PermissionDef for PermDashboard {
    fn description() -> &'static str { "acessar o painel" }
    fn allows(_: Role, p: &Permissions) -> bool { p.can_access_dashboard }
}

pub struct PermAssetsRead;
impl PermissionDef for PermAssetsRead {
    fn description() -> &'static str { "consultar o patrimônio" }
    fn allows(_: Role, p: &Permissions) -> bool { p.can_access_assets }
}

// Solicitantes consultam bens, mas não os cadastram
pub struct PermAssetsWrite;
impl PermissionDef for PermAssetsWrite {
    fn description() -> &'static str { "alterar o patrimônio" }
    fn allows(role: Role, p: &Permissions) -> bool { p.can_access_assets && role != Role::Solicitante }
}

pub struct PermUsers;
impl PermissionDef for PermUsers {
    fn description() -> &'static str { "gerenciar usuários" }
    fn allows(_: Role, p: &Permissions) -> bool { p.can_access_users }
}

pub struct PermSettings;
impl PermissionDef for PermSettings {
    fn description() -> &'static str { "alterar as configurações" }
    fn allows(_: Role, p: &Permissions) -> bool { p.can_access_settings }
}

pub struct PermTickets;
impl PermissionDef for PermTickets {
    fn description() -> &'static str { "acessar os chamados" }
    fn allows(_: Role, p: &Permissions) -> bool { p.can_access_tickets }
}

pub struct PermAllSchools;
impl PermissionDef for PermAllSchools {
    fn description() -> &'static str { "acessar todas as unidades" }
    fn allows(_: Role, p: &Permissions) -> bool { p.can_access_all_schools }
}

pub struct PermSuperAdmin;
impl PermissionDef for PermSuperAdmin {
    fn description() -> &'static str { "acessar o painel da secretaria" }
    fn allows(role: Role, _: &Permissions) -> bool { role == Role::SuperAdmin }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::tests::user_with;
    use uuid::Uuid;

    async fn check<T: PermissionDef>(role: Role) -> Result<(), AppError> {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        parts.extensions.insert(user_with(role, Some(Uuid::new_v4())));
        RequirePermission::<T>::from_request_parts(&mut parts, &())
            .await
            .map(|_| ())
    }

    #[tokio::test]
    async fn settings_are_reserved_to_super_admin() {
        assert!(check::<PermSettings>(Role::SuperAdmin).await.is_ok());
        for role in [Role::Admin, Role::GestorEscolar, Role::Solicitante] {
            let err = check::<PermSettings>(role).await.unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)));
        }
    }

    #[tokio::test]
    async fn requesters_read_but_do_not_write_assets() {
        assert!(check::<PermAssetsRead>(Role::Solicitante).await.is_ok());
        assert!(check::<PermAssetsWrite>(Role::Solicitante).await.is_err());
        assert!(check::<PermAssetsWrite>(Role::GestorEscolar).await.is_ok());
    }

    #[tokio::test]
    async fn super_admin_dashboard_rejects_admin() {
        assert!(check::<PermSuperAdmin>(Role::SuperAdmin).await.is_ok());
        assert!(check::<PermSuperAdmin>(Role::Admin).await.is_err());
    }

    #[tokio::test]
    async fn missing_session_is_unauthorized_not_forbidden() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        let result = RequirePermission::<PermTickets>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn aggregate_guard_answers_with_the_outcome_envelope() {
        use axum::response::IntoResponse;
        use http_body_util::BodyExt;

        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        parts.extensions.insert(user_with(Role::Solicitante, Some(Uuid::new_v4())));

        let rejection = RequirePermissionOutcome::<PermAllSchools>::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        let response = rejection.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], true);
        assert_eq!(body["kind"], "UNAUTHORIZED");
        assert_eq!(body["message"], "Seu perfil não tem permissão para acessar todas as unidades.");
    }

    #[tokio::test]
    async fn aggregate_guard_lets_administrators_through() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        parts.extensions.insert(user_with(Role::Admin, None));

        let result = RequirePermissionOutcome::<PermAllSchools>::from_request_parts(&mut parts, &()).await;
        assert!(result.is_ok());
    }
}

// src/middleware/tenancy.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::auth::AuthenticatedUser,
    services::access_policy::permissions_for,
};

// Recorte de dados do usuário da sessão.
// Administradores enxergam todas as unidades; os demais só a sua.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    All,
    Tenant(Uuid),
}

impl TenantScope {
    /// Deriva o recorte a partir do usuário (perfil + escola vinculada).
    pub fn for_user(user: &AuthenticatedUser) -> Result<Self, AppError> {
        if permissions_for(user.0.role).can_access_all_schools {
            return Ok(TenantScope::All);
        }

        user.0
            .tenant_id
            .map(TenantScope::Tenant)
            .ok_or_else(|| AppError::Forbidden("Usuário sem escola vinculada.".to_string()))
    }

    /// `None` = sem filtro.
    pub fn tenant_filter(&self) -> Option<Uuid> {
        match self {
            TenantScope::All => None,
            TenantScope::Tenant(id) => Some(*id),
        }
    }

    pub fn admits(&self, tenant_id: Uuid) -> bool {
        match self {
            TenantScope::All => true,
            TenantScope::Tenant(own) => *own == tenant_id,
        }
    }

    pub fn admits_optional(&self, tenant_id: Option<Uuid>) -> bool {
        match (self, tenant_id) {
            (TenantScope::All, _) => true,
            (TenantScope::Tenant(own), Some(id)) => *own == id,
            (TenantScope::Tenant(_), None) => false,
        }
    }

    /// Falha com Forbidden quando a unidade está fora do recorte.
    pub fn ensure_admits(&self, tenant_id: Uuid) -> Result<(), AppError> {
        if self.admits(tenant_id) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Você não tem acesso aos dados desta unidade.".to_string(),
            ))
        }
    }

    /// Restringe um filtro vindo da query string ao recorte do usuário.
    pub fn narrow(&self, requested: Option<Uuid>) -> Result<Option<Uuid>, AppError> {
        match (self, requested) {
            (TenantScope::All, requested) => Ok(requested),
            (TenantScope::Tenant(own), None) => Ok(Some(*own)),
            (TenantScope::Tenant(_), Some(id)) => {
                self.ensure_admits(id)?;
                Ok(Some(id))
            }
        }
    }
}

impl<S> FromRequestParts<S> for TenantScope
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        TenantScope::for_user(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::tests::user_with;
    use crate::models::access::Role;

    #[test]
    fn administrators_see_every_school() {
        let admin = user_with(Role::Admin, None);
        assert_eq!(TenantScope::for_user(&admin).unwrap(), TenantScope::All);
    }

    #[test]
    fn school_users_are_scoped_to_their_school() {
        let school = Uuid::new_v4();
        let manager = user_with(Role::GestorEscolar, Some(school));
        let scope = TenantScope::for_user(&manager).unwrap();

        assert_eq!(scope, TenantScope::Tenant(school));
        assert!(scope.admits(school));
        assert!(!scope.admits(Uuid::new_v4()));
    }

    #[test]
    fn school_user_without_school_is_refused() {
        let orphan = user_with(Role::Solicitante, None);
        let err = TenantScope::for_user(&orphan).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn narrow_defaults_to_own_school_and_blocks_others() {
        let own = Uuid::new_v4();
        let scope = TenantScope::Tenant(own);

        assert_eq!(scope.narrow(None).unwrap(), Some(own));
        assert_eq!(scope.narrow(Some(own)).unwrap(), Some(own));
        assert!(scope.narrow(Some(Uuid::new_v4())).is_err());
        assert_eq!(TenantScope::All.narrow(None).unwrap(), None);
    }

    #[test]
    fn users_without_school_only_fit_the_global_scope() {
        assert!(TenantScope::All.admits_optional(None));
        assert!(!TenantScope::Tenant(Uuid::new_v4()).admits_optional(None));
    }
}

// src/services/user_service.rs

use uuid::Uuid;
use crate::{
    common::error::AppError,
    db::{
        user_repo::{NewUser, UserChanges},
        TenantRepository, UserRepository,
    },
    models::{
        access::Role,
        auth::{CreateUserPayload, UpdateUserPayload, User},
    },
    services::auth::hash_password,
};

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    tenant_repo: TenantRepository,
}

impl UserService {
    pub fn new(user_repo: UserRepository, tenant_repo: TenantRepository) -> Self {
        Self { user_repo, tenant_repo }
    }

    pub async fn list(&self, tenant_id: Option<Uuid>) -> Result<Vec<User>, AppError> {
        self.user_repo.list(tenant_id).await
    }

    pub async fn get(&self, user_id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound("Usuário"))
    }

    pub async fn create(&self, caller: Role, payload: &CreateUserPayload) -> Result<User, AppError> {
        ensure_can_assign(caller, payload.role)?;
        self.ensure_tenant(payload.role, payload.tenant_id).await?;

        let password_hash = hash_password(&payload.password).await?;

        let user = self.user_repo
            .create_user(NewUser {
                name: &payload.name,
                email: payload.email.trim(),
                password_hash: &password_hash,
                role: payload.role,
                tenant_id: payload.tenant_id,
            })
            .await?;

        tracing::info!("👤 Usuário criado: {} ({})", user.email, user.role);
        Ok(user)
    }

    pub async fn update(&self, caller: Role, user_id: Uuid, payload: UpdateUserPayload) -> Result<User, AppError> {
        let current = self.get(user_id).await?;

        // O estado final (perfil + unidade) precisa continuar válido
        let role = payload.role.unwrap_or(current.role);
        let tenant_id = payload.tenant_id.unwrap_or(current.tenant_id);

        // Nem promover a SUPER_ADMIN nem mexer em um
        ensure_can_assign(caller, current.role)?;
        ensure_can_assign(caller, role)?;
        self.ensure_tenant(role, tenant_id).await?;

        let password_hash = match payload.password.as_deref() {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        let changes = UserChanges {
            name: payload.name,
            email: payload.email.map(|e| e.trim().to_string()),
            password_hash,
            role: payload.role,
            tenant_id: payload.tenant_id,
            active: payload.active,
        };

        self.user_repo
            .update_user(user_id, changes)
            .await?
            .ok_or(AppError::NotFound("Usuário"))
    }

    pub async fn delete(&self, caller: &User, user_id: Uuid) -> Result<(), AppError> {
        if caller.id == user_id {
            return Err(AppError::InvalidField {
                field: "id",
                message: "Você não pode excluir o próprio usuário.".to_string(),
            });
        }

        let target = self.get(user_id).await?;
        ensure_can_assign(caller.role, target.role)?;

        if !self.user_repo.delete_user(user_id).await? {
            return Err(AppError::NotFound("Usuário"));
        }
        tracing::info!("🗑️ Usuário {} excluído por {}", target.email, caller.email);
        Ok(())
    }

    // Perfis de escola exigem uma unidade existente
    async fn ensure_tenant(&self, role: Role, tenant_id: Option<Uuid>) -> Result<(), AppError> {
        let Some(tenant_id) = required_tenant(role, tenant_id)? else {
            return Ok(());
        };

        self.tenant_repo
            .find_by_id(self.tenant_repo.pool(), tenant_id)
            .await?
            .map(|_| ())
            .ok_or_else(AppError::unknown_tenant)
    }
}

/// Devolve a unidade que precisa existir, ou `None` quando o perfil
/// dispensa vínculo (e nenhum foi informado).
fn required_tenant(role: Role, tenant_id: Option<Uuid>) -> Result<Option<Uuid>, AppError> {
    match (role.is_administrative(), tenant_id) {
        (_, Some(id)) => Ok(Some(id)),
        (true, None) => Ok(None),
        (false, None) => Err(AppError::InvalidField {
            field: "tenantId",
            message: format!("Usuários com perfil {} precisam de uma unidade vinculada.", role),
        }),
    }
}

// Só um SUPER_ADMIN cria ou altera outro SUPER_ADMIN
fn ensure_can_assign(caller: Role, target: Role) -> Result<(), AppError> {
    if target == Role::SuperAdmin && caller != Role::SuperAdmin {
        return Err(AppError::Forbidden(
            "Apenas o super administrador pode gerenciar este perfil.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn school_roles_require_a_tenant() {
        for role in [Role::GestorEscolar, Role::Solicitante] {
            let err = required_tenant(role, None).unwrap_err();
            assert!(matches!(err, AppError::InvalidField { field: "tenantId", .. }));
        }
    }

    #[test]
    fn administrators_may_have_no_tenant() {
        assert_eq!(required_tenant(Role::Admin, None).unwrap(), None);
        assert_eq!(required_tenant(Role::SuperAdmin, None).unwrap(), None);
    }

    #[test]
    fn informed_tenant_is_always_checked() {
        let id = Uuid::new_v4();
        assert_eq!(required_tenant(Role::Admin, Some(id)).unwrap(), Some(id));
        assert_eq!(required_tenant(Role::Solicitante, Some(id)).unwrap(), Some(id));
    }

    #[test]
    fn admin_cannot_grant_super_admin() {
        assert!(ensure_can_assign(Role::Admin, Role::SuperAdmin).is_err());
        assert!(ensure_can_assign(Role::Admin, Role::GestorEscolar).is_ok());
        assert!(ensure_can_assign(Role::SuperAdmin, Role::SuperAdmin).is_ok());
    }
}

// src/db/user_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use crate::{
    common::{db_utils::map_unique_violation, error::AppError},
    models::{access::Role, auth::User},
};

// Dados já validados e com a senha em hash
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub tenant_id: Option<Uuid>,
}

#[derive(Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
    pub tenant_id: Option<Option<Uuid>>,
    pub active: Option<bool>,
}

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    /// Lista usuários; `tenant_id = None` lista todos.
    pub async fn list(&self, tenant_id: Option<Uuid>) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE ($1::uuid IS NULL OR tenant_id = $1)
            ORDER BY name ASC
            "#,
        )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    // Cria um novo usuário, com tratamento de erro específico para e-mails duplicados.
    pub async fn create_user(&self, input: NewUser<'_>) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role, tenant_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
            .bind(input.name)
            .bind(input.email)
            .bind(input.password_hash)
            .bind(input.role)
            .bind(input.tenant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, |_| AppError::EmailAlreadyExists))
    }

    pub async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, AppError> {
        // tenant_id usa um flag separado para permitir gravar NULL
        let (set_tenant, tenant_id) = match changes.tenant_id {
            Some(value) => (true, value),
            None => (false, None),
        };

        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                role = COALESCE($5, role),
                tenant_id = CASE WHEN $6 THEN $7 ELSE tenant_id END,
                active = COALESCE($8, active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(id)
            .bind(changes.name)
            .bind(changes.email)
            .bind(changes.password_hash)
            .bind(changes.role)
            .bind(set_tenant)
            .bind(tenant_id)
            .bind(changes.active)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, |_| AppError::EmailAlreadyExists))
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Registra um evento de autenticação (alimenta "ativos nos últimos 30 dias").
    pub async fn record_auth_event(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<(), AppError> {
        sqlx::query("INSERT INTO auth_events (user_id, occurred_at) VALUES ($1, $2)")
            .bind(user_id)
            .bind(at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

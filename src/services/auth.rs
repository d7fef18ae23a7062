// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{AuthResponse, Claims, User},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    ttl_hours: i64,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, ttl_hours: i64) -> Self {
        Self { user_repo, jwt_secret, ttl_hours }
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self.user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
        ?;

        if !is_password_valid {
            tracing::warn!("🔒 Tentativa de login com senha incorreta: {}", email);
            return Err(AppError::InvalidCredentials);
        }

        if !user.active {
            tracing::warn!("🔒 Login recusado para usuário desativado: {}", user.id);
            return Err(AppError::InactiveUser);
        }

        // Alimenta o indicador de "usuários ativos nos últimos 30 dias"
        self.user_repo.record_auth_event(user.id, Utc::now()).await?;
        tracing::info!("🔑 Login de {} ({})", user.email, user.role);

        let token = self.create_token(&user)?;
        Ok(AuthResponse { token, user })
    }

    /// Valida o token e relê o usuário do banco. O perfil usado para
    /// autorização é sempre o gravado, nunca o do token.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_claims(token, &self.jwt_secret)?;

        let user = self.user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.active {
            return Err(AppError::InactiveUser);
        }

        Ok(user)
    }

    pub fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(self.ttl_hours);

        let claims = Claims {
            sub: user.id,
            role: user.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

// Decodifica e valida assinatura + expiração (HS256)
fn decode_claims(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidToken)
}

/// Gera o hash bcrypt fora do runtime assíncrono.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))?
        ?;
    Ok(hashed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::access::Role;
    use uuid::Uuid;

    const SECRET: &str = "segredo-de-teste";

    fn token_for(sub: Uuid, exp_offset_secs: i64, secret: &str) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub,
            role: Role::Admin,
            exp: (now + exp_offset_secs) as usize,
            iat: now as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_ref())).unwrap()
    }

    #[test]
    fn valid_token_round_trips_subject() {
        let sub = Uuid::new_v4();
        let claims = decode_claims(&token_for(sub, 3600, SECRET), SECRET).unwrap();
        assert_eq!(claims.sub, sub);
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = token_for(Uuid::new_v4(), -3600, SECRET);
        assert!(matches!(decode_claims(&token, SECRET), Err(AppError::InvalidToken)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = token_for(Uuid::new_v4(), 3600, "outro-segredo");
        assert!(matches!(decode_claims(&token, SECRET), Err(AppError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decode_claims("nao.e.jwt", SECRET).is_err());
    }

    #[tokio::test]
    async fn hashed_password_verifies() {
        let hashed = hash_password("senha123").await.unwrap();
        assert!(verify("senha123", &hashed).unwrap());
        assert!(!verify("outra", &hashed).unwrap());
    }
}

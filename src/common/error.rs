use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Erro de validação de um campo específico, fora do derive
    #[error("Campo inválido '{field}': {message}")]
    InvalidField { field: &'static str, message: String },

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Código de patrimônio já existe: {0}")]
    AssetCodeAlreadyExists(String),

    #[error("Código de unidade já existe: {0}")]
    TenantCodeAlreadyExists(String),

    #[error("Unidade possui {users} usuário(s) e {assets} bem(ns) vinculados")]
    TenantHasDependents { users: i64, assets: i64 },

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário inativo")]
    InactiveUser,

    #[error("Acesso negado: {0}")]
    Forbidden(String),

    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Unidade informada no corpo que não existe no banco.
    pub fn unknown_tenant() -> Self {
        AppError::InvalidField {
            field: "tenantId",
            message: "A unidade informada não existe.".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidField { .. } => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists
            | AppError::AssetCodeAlreadyExists(_)
            | AppError::TenantCodeAlreadyExists(_)
            | AppError::TenantHasDependents { .. } => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken | AppError::InactiveUser => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Mensagem exibida diretamente pela UI.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(_) => "Um ou mais campos são inválidos.".to_string(),
            AppError::InvalidField { message, .. } => message.clone(),
            AppError::EmailAlreadyExists => "Este e-mail já está em uso.".to_string(),
            AppError::AssetCodeAlreadyExists(code) => {
                format!("Já existe um bem com o código '{}'.", code)
            }
            AppError::TenantCodeAlreadyExists(code) => {
                format!("Já existe uma unidade com o código '{}'.", code)
            }
            AppError::TenantHasDependents { users, assets } => format!(
                "A unidade possui {} usuário(s) e {} bem(ns) vinculados. Desative-a em vez de excluir.",
                users, assets
            ),
            AppError::InvalidCredentials => "E-mail ou senha inválidos.".to_string(),
            AppError::InvalidToken => "Token de autenticação inválido ou ausente.".to_string(),
            AppError::InactiveUser => "Usuário desativado.".to_string(),
            AppError::Forbidden(reason) => reason.clone(),
            AppError::NotFound(what) => format!("{} não encontrado(a).", what),
            _ => "Ocorreu um erro inesperado.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                json!({ "error": self.user_message(), "details": details })
            }
            AppError::InvalidField { field, message } => {
                let mut details = serde_json::Map::new();
                details.insert(field.to_string(), json!([message]));
                json!({ "error": self.user_message(), "details": details })
            }
            _ => {
                if status.is_server_error() {
                    tracing::error!("Erro Interno do Servidor: {}", self);
                }
                json!({ "error": self.user_message() })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_message() {
        let response = AppError::NotFound("Bem").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Bem não encontrado(a).");
    }

    #[tokio::test]
    async fn invalid_field_reports_field_details() {
        let response = AppError::InvalidField {
            field: "purchaseValue",
            message: "O valor não pode ser negativo.".into(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["details"]["purchaseValue"][0], "O valor não pode ser negativo.");
    }

    #[tokio::test]
    async fn database_errors_do_not_leak_details() {
        let response = AppError::DatabaseError(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Ocorreu um erro inesperado.");
    }

    #[test]
    fn dependents_block_tenant_deletion_with_conflict() {
        let err = AppError::TenantHasDependents { users: 2, assets: 10 };
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert!(err.user_message().contains("Desative-a"));
    }
}

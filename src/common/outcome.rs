// src/common/outcome.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::error::AppError;

// Tipo de erro de domínio devolvido pelos painéis e relatórios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    Validation,
    Unknown,
}

// Corpo de erro uniforme: { message, error: true, kind }
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorPayload {
    pub message: String,
    pub error: bool,
    pub kind: ErrorKind,
}

/// Resultado dos endpoints de leitura agregada.
///
/// Separa sucesso, erro de domínio e falha desconhecida. Os dois últimos
/// respondem com HTTP 200 e o corpo `{message, error: true}`; só falhas de
/// transporte mudam o status.
#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    DomainError { kind: ErrorKind, message: String },
    Failure { message: String },
}

impl<T> Outcome<T> {
    /// Converte o resultado de um serviço. Erros de infraestrutura são
    /// registrados no log e substituídos por `fallback_message`.
    pub fn from_result(result: Result<T, AppError>, fallback_message: &str) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => Outcome::from_error(err, fallback_message),
        }
    }

    pub fn from_error(err: AppError, fallback_message: &str) -> Self {
        let kind = match &err {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::ValidationError(_) | AppError::InvalidField { .. } => ErrorKind::Validation,
            AppError::InvalidToken
            | AppError::InvalidCredentials
            | AppError::InactiveUser
            | AppError::Forbidden(_) => ErrorKind::Unauthorized,
            _ => {
                tracing::error!("🔥 {}: {}", fallback_message, err);
                return Outcome::Failure {
                    message: fallback_message.to_string(),
                };
            }
        };

        Outcome::DomainError {
            kind,
            message: err.user_message(),
        }
    }
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        match self {
            Outcome::Success(value) => (StatusCode::OK, Json(value)).into_response(),
            Outcome::DomainError { kind, message } => (
                StatusCode::OK,
                Json(ErrorPayload { message, error: true, kind }),
            )
                .into_response(),
            Outcome::Failure { message } => (
                StatusCode::OK,
                Json(ErrorPayload {
                    message,
                    error: true,
                    kind: ErrorKind::Unknown,
                }),
            )
                .into_response(),
        }
    }
}

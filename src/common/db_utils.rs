use sqlx::{PgPool, Postgres, Transaction};

use crate::common::error::AppError;

// ---
// Helper de leitura consistente: painéis e relatórios
// ---
/// Abre uma transação somente leitura em REPEATABLE READ, para que todas as
/// consultas de um agregado enxerguem o mesmo instante do banco.
pub(crate) async fn begin_snapshot(pool: &PgPool) -> Result<Transaction<'static, Postgres>, AppError> {
    // O '?' converte sqlx::Error -> AppError::DatabaseError
    let mut tx = pool.begin().await?;

    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;

    Ok(tx)
}

// ---
// Helpers de tradução de erros do Postgres
// ---

/// Nome da constraint quando o erro é uma violação de unicidade.
pub(crate) fn unique_violation_constraint(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Some(db_err.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}

/// Converte a violação de unicidade em um erro de domínio; qualquer outro
/// erro vira `AppError::DatabaseError`.
pub(crate) fn map_unique_violation<F>(err: sqlx::Error, on_conflict: F) -> AppError
where
    F: FnOnce(&str) -> AppError,
{
    match unique_violation_constraint(&err) {
        Some(constraint) => on_conflict(&constraint),
        None => err.into(),
    }
}

/// Violação de chave estrangeira (ex.: escola inexistente).
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::{borrow::Cow, error::Error as StdError, fmt};

    // Erro do Postgres fabricado para exercitar a tradução sem banco
    #[derive(Debug)]
    struct ConstraintError {
        unique: bool,
        constraint: &'static str,
    }

    impl fmt::Display for ConstraintError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "violação da constraint {}", self.constraint)
        }
    }

    impl StdError for ConstraintError {}

    impl DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            self.constraint
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(if self.unique { "23505" } else { "23503" }))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::ForeignKeyViolation
            }
        }
    }

    /// `unique = true` simula 23505; `false`, 23503 (chave estrangeira).
    pub(crate) fn constraint_error(unique: bool, constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintError { unique, constraint }))
    }

    #[test]
    fn constraint_errors_are_classified() {
        assert!(is_foreign_key_violation(&constraint_error(false, "assets_tenant_id_fkey")));
        assert!(!is_foreign_key_violation(&constraint_error(true, "assets_code_key")));
        assert_eq!(
            unique_violation_constraint(&constraint_error(true, "assets_code_key")),
            Some("assets_code_key".to_string())
        );
    }

    #[test]
    fn non_database_errors_pass_through() {
        assert_eq!(unique_violation_constraint(&sqlx::Error::RowNotFound), None);
        assert!(!is_foreign_key_violation(&sqlx::Error::RowNotFound));

        let mapped = map_unique_violation(sqlx::Error::PoolTimedOut, |_| AppError::EmailAlreadyExists);
        assert!(matches!(mapped, AppError::DatabaseError(_)));
    }
}

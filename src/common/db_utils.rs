// src/common/db_utils.rs

use crate::common::error::{field_error, AppError};

/// Liga o nome de uma constraint do Postgres ao campo do formulário que a violou.
pub(crate) type ConstraintField = (&'static str, &'static str);

/// Traduz violações de UNIQUE / FOREIGN KEY em erro de validação no campo certo.
///
/// Qualquer outro erro de banco segue como `DatabaseError` (vira 500).
pub(crate) fn map_constraint_error(e: sqlx::Error, fields: &[ConstraintField]) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        let code = if db_err.is_unique_violation() {
            Some("unique")
        } else if db_err.is_foreign_key_violation() {
            Some("invalid_choice")
        } else {
            None
        };

        if let Some(code) = code {
            let field = db_err
                .constraint()
                .and_then(|name| fields.iter().find(|(c, _)| *c == name))
                .map(|(_, field)| *field)
                .unwrap_or("__all__");

            tracing::debug!("Violação de constraint {:?} mapeada para '{}'", db_err.constraint(), field);
            return field_error(field, code);
        }
    }
    e.into()
}

/// Padrão ILIKE para as caixas de busca: `None` ou vazio desliga o filtro.
pub(crate) fn search_pattern(q: Option<&str>) -> Option<String> {
    q.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")))
}

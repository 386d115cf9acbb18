// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::middleware::i18n::Locale;

/// Recursos que podem não ser encontrados numa busca por ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Department,
    StaffMember,
    Period,
    Assignment,
    EmergencyContact,
    User,
    AdminModel,
}

impl Resource {
    fn not_found_message(self, locale: &Locale) -> &'static str {
        match self {
            Resource::Department => locale.pick("Secretaria não encontrada.", "Department not found."),
            Resource::StaffMember => locale.pick("Plantonista não encontrado.", "Staff member not found."),
            Resource::Period => locale.pick("Período de plantão não encontrado.", "On-call period not found."),
            Resource::Assignment => locale.pick("Escala não encontrada.", "Assignment not found."),
            Resource::EmergencyContact => locale.pick("Contato emergencial não encontrado.", "Emergency contact not found."),
            Resource::User => locale.pick("Usuário não encontrado.", "User not found."),
            Resource::AdminModel => locale.pick("Tela do painel não encontrada.", "Admin screen not found."),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Recurso não encontrado: {0:?}")]
    NotFound(Resource),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso restrito à equipe administrativa")]
    Forbidden,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// A resposta de erro que efetivamente vai para o cliente, já traduzida.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte o erro interno numa resposta traduzida para o idioma do cliente.
    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let status = self.status();

        let (error, details) = match &self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .map(|e| {
                            let message = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| validation_message(&e.code, locale).to_string());
                            json!({ "code": e.code, "message": message })
                        })
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                (
                    locale.pick("Um ou mais campos são inválidos.", "One or more fields are invalid."),
                    Some(Value::Object(details)),
                )
            }
            AppError::NotFound(resource) => (resource.not_found_message(locale), None),
            AppError::InvalidCredentials => (
                locale.pick("E-mail ou senha inválidos.", "Invalid e-mail or password."),
                None,
            ),
            AppError::InvalidToken => (
                locale.pick(
                    "Token de autenticação inválido ou ausente.",
                    "Missing or invalid authentication token.",
                ),
                None,
            ),
            AppError::Forbidden => (
                locale.pick(
                    "Apenas a equipe administrativa pode acessar este recurso.",
                    "Only administrative staff can access this resource.",
                ),
                None,
            ),
            // Banco fora do ar, bcrypt, JWT, etc: loga o detalhe e devolve 500 genérico.
            e => {
                tracing::error!("🔥 Erro Interno do Servidor: {}", e);
                (
                    locale.pick("Ocorreu um erro inesperado.", "An unexpected error occurred."),
                    None,
                )
            }
        };

        ApiError {
            status,
            error: error.to_string(),
            details,
        }
    }
}

// Usado por extratores e middlewares que não têm acesso ao idioma.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}

/// Texto padrão para os códigos de validação usados pelos formulários.
fn validation_message(code: &str, locale: &Locale) -> &'static str {
    match code {
        "required" => locale.pick("Este campo é obrigatório.", "This field is required."),
        "length" => locale.pick("Tamanho inválido para este campo.", "Invalid length for this field."),
        "email" => locale.pick("Informe um e-mail válido.", "Enter a valid e-mail address."),
        "unique" => locale.pick(
            "Já existe um registro com este valor.",
            "A record with this value already exists.",
        ),
        "invalid_choice" => locale.pick(
            "Selecione uma opção válida.",
            "Select a valid choice.",
        ),
        "duplicate" => locale.pick(
            "Plantonista repetido na mesma escala.",
            "Staff member listed more than once.",
        ),
        "range_order" => locale.pick(
            "A data de fim não pode ser anterior à data de início.",
            "The end date must not be before the start date.",
        ),
        _ => locale.pick("Valor inválido.", "Invalid value."),
    }
}

/// Monta um `ValidationError` de um único campo, no formato dos formulários.
pub fn field_error(field: &'static str, code: &'static str) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, validator::ValidationError::new(code));
    AppError::ValidationError(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_http_status() {
        assert_eq!(AppError::NotFound(Resource::Period).status(), StatusCode::NOT_FOUND);
        assert_eq!(field_error("name", "unique").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_details_are_keyed_by_field() {
        let api = field_error("endsAt", "range_order").to_api_error(&Locale("en".into()));
        let details = api.details.expect("details");

        assert_eq!(details["endsAt"][0]["code"], "range_order");
        assert_eq!(
            details["endsAt"][0]["message"],
            "The end date must not be before the start date."
        );
    }

    #[test]
    fn range_order_message_allows_equal_dates() {
        let api = field_error("endsAt", "range_order").to_api_error(&Locale::default());
        let details = api.details.expect("details");

        assert_eq!(
            details["endsAt"][0]["message"],
            "A data de fim não pode ser anterior à data de início."
        );
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let api = AppError::DatabaseError(sqlx::Error::PoolTimedOut).to_api_error(&Locale::default());
        assert_eq!(api.error, "Ocorreu um erro inesperado.");
        assert!(api.details.is_none());
    }
}

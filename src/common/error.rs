use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::common::i18n::I18nStore;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("ID inválido: {0}")]
    InvalidIdentifier(String),

    #[error("CEP inválido: {0}")]
    InvalidCep(String),

    #[error("Corpo da requisição inválido: {0}")]
    InvalidPayload(String),

    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Contato {0} não encontrado")]
    ContactNotFound(i64),

    #[error("CEP {0} não encontrado")]
    CepNotFound(String),

    #[error("Serviço de CEP indisponível: {0}")]
    AddressLookupUnavailable(String),

    // Sinal interno do repositório: o ID já existe (corrida entre dois creates)
    #[error("ID {0} já está em uso")]
    DuplicateContactId(i64),

    #[error("Não foi possível atribuir um ID após {0} tentativas")]
    IdAssignmentExhausted(u32),

    // A sequência chegou em i64::MAX (só acontece com linha gravada fora da API)
    #[error("Sequência de IDs esgotada")]
    IdSequenceExhausted,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Falha do armazenamento que não é um sqlx::Error (store em memória, tabela de IDs sem linha)
    #[error("Armazenamento indisponível: {0}")]
    StoreUnavailable(String),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidIdentifier(_)
            | AppError::InvalidCep(_)
            | AppError::InvalidPayload(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ContactNotFound(_) | AppError::CepNotFound(_) => StatusCode::NOT_FOUND,
            AppError::AddressLookupUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::DuplicateContactId(_)
            | AppError::IdAssignmentExhausted(_)
            | AppError::IdSequenceExhausted
            | AppError::DatabaseError(_)
            | AppError::StoreUnavailable(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Chave da mensagem traduzida (ver `I18nStore`).
    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::InvalidIdentifier(_) => "invalid_id",
            AppError::InvalidCep(_) => "invalid_cep",
            AppError::InvalidPayload(_) => "invalid_payload",
            AppError::ValidationError(_) => "validation_failed",
            AppError::ContactNotFound(_) => "contact_not_found",
            AppError::CepNotFound(_) => "cep_not_found",
            AppError::AddressLookupUnavailable(_) => "cep_unavailable",
            _ => "internal_error",
        }
    }

    /// Converte para a resposta HTTP no idioma do cliente.
    /// Detalhes internos (SQL, stack) ficam só no log.
    pub fn to_api_error(self, locale: &str, i18n: &I18nStore) -> ApiError {
        let status = self.status();
        let message = i18n.translate(locale, self.message_key());

        if status.is_server_error() {
            tracing::error!("🔥 Erro Interno do Servidor: {}", self);
        } else {
            tracing::debug!("Requisição recusada ({}): {}", status, self);
        }

        let details = match &self {
            AppError::ValidationError(errors) => Some(validation_details(errors)),
            _ => None,
        };

        ApiError { status, message, details }
    }
}

// Agrupa os códigos de erro por campo: { "name": ["required"] }
fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), messages);
    }
    json!(details)
}

// O que de fato sai para o cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

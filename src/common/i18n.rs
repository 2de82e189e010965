// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LOCALE: &str = "pt";

const PT: &[(&str, &str)] = &[
    ("invalid_id", "ID inválido"),
    ("invalid_cep", "CEP inválido. Informe 8 dígitos."),
    ("invalid_payload", "Corpo da requisição inválido."),
    ("validation_failed", "Um ou mais campos são inválidos."),
    ("contact_not_found", "Contato não encontrado"),
    ("cep_not_found", "CEP não encontrado ou inválido."),
    ("cep_unavailable", "Falha ao buscar CEP. Tente novamente."),
    ("internal_error", "Ocorreu um erro inesperado."),
    ("contact_updated", "Contato atualizado com sucesso"),
    ("contact_deleted", "Contato excluído com sucesso"),
];

const EN: &[(&str, &str)] = &[
    ("invalid_id", "Invalid ID"),
    ("invalid_cep", "Invalid CEP. It must have 8 digits."),
    ("invalid_payload", "Invalid request body."),
    ("validation_failed", "One or more fields are invalid."),
    ("contact_not_found", "Contact not found"),
    ("cep_not_found", "CEP not found or invalid."),
    ("cep_unavailable", "Failed to look up CEP. Please try again."),
    ("internal_error", "An unexpected error occurred."),
    ("contact_updated", "Contact updated successfully"),
    ("contact_deleted", "Contact deleted successfully"),
];

// Tabela de mensagens por idioma. Montada uma vez e compartilhada via AppState.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();
        messages.insert("pt", PT.iter().copied().collect());
        messages.insert("en", EN.iter().copied().collect());
        Self { messages }
    }

    /// Traduz a chave. Idioma desconhecido cai no português; chave desconhecida volta crua.
    pub fn translate(&self, locale: &str, key: &str) -> String {
        self.messages
            .get(locale)
            .and_then(|table| table.get(key))
            .or_else(|| {
                self.messages
                    .get(DEFAULT_LOCALE)
                    .and_then(|table| table.get(key))
            })
            .map(|m| m.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

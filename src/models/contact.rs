// src/models/contact.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// --- CONTATO (O Documento) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    // ID de aplicação, sequencial. Não confundir com qualquer ID interno do banco.
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Ana Souza")]
    pub name: String,
    #[schema(example = "11999999999")]
    pub phone: String,
    #[schema(example = "ana@email.com")]
    pub email: String,
    pub company: String,

    // Endereço. Normalmente preenchido pela consulta de CEP, mas editável.
    #[schema(example = "01001000")]
    pub cep: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,

    pub observation: String,
    pub is_active: bool,

    #[schema(example = "cliente")]
    pub contact_type: String,
}

impl Contact {
    /// Monta o documento a partir do rascunho, com o ID já calculado.
    pub fn from_draft(id: i64, draft: NewContact) -> Self {
        Self {
            id,
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
            company: draft.company,
            cep: draft.cep,
            logradouro: draft.logradouro,
            numero: draft.numero,
            complemento: draft.complemento,
            bairro: draft.bairro,
            localidade: draft.localidade,
            uf: draft.uf,
            observation: draft.observation,
            is_active: draft.is_active,
            contact_type: draft.contact_type,
        }
    }
}

// --- RASCUNHO (POST) ---

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewContact {
    // O front manda `id: 0` junto com o formulário. Aceitamos e descartamos.
    #[serde(default, rename = "id")]
    #[schema(ignore)]
    pub discarded_id: Option<Value>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ana Souza")]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "11999999999")]
    pub phone: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "ana@email.com")]
    pub email: String,

    #[serde(default)]
    pub company: String,

    #[serde(default)]
    #[validate(custom(function = "validate_cep"))]
    #[schema(example = "01001000")]
    pub cep: String,
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub numero: String,
    #[serde(default)]
    pub complemento: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub uf: String,

    #[serde(default)]
    pub observation: String,

    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Texto livre. A interface sugere `cliente`, `fornecedor` ou `parceiro`.
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "cliente")]
    pub contact_type: String,
}

// --- PATCH (PUT) ---

/// Atualização parcial. `None` mantém o valor atual; a lista de campos é fechada.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactPatch {
    // O ID vem do path, nunca do corpo
    #[serde(default, rename = "id")]
    #[schema(ignore)]
    pub discarded_id: Option<Value>,

    #[validate(length(min = 1, message = "required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    pub phone: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub company: Option<String>,

    #[validate(custom(function = "validate_cep"))]
    pub cep: Option<String>,
    pub logradouro: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub localidade: Option<String>,
    pub uf: Option<String>,

    pub observation: Option<String>,
    pub is_active: Option<bool>,

    #[validate(length(min = 1, message = "required"))]
    pub contact_type: Option<String>,
}

impl ContactPatch {
    /// Aplica somente os campos presentes. O `id` do contato nunca é tocado.
    pub fn apply_to(&self, contact: &mut Contact) {
        fn set(target: &mut String, value: &Option<String>) {
            if let Some(v) = value {
                target.clone_from(v);
            }
        }

        set(&mut contact.name, &self.name);
        set(&mut contact.phone, &self.phone);
        set(&mut contact.email, &self.email);
        set(&mut contact.company, &self.company);
        set(&mut contact.cep, &self.cep);
        set(&mut contact.logradouro, &self.logradouro);
        set(&mut contact.numero, &self.numero);
        set(&mut contact.complemento, &self.complemento);
        set(&mut contact.bairro, &self.bairro);
        set(&mut contact.localidade, &self.localidade);
        set(&mut contact.uf, &self.uf);
        set(&mut contact.observation, &self.observation);
        set(&mut contact.contact_type, &self.contact_type);

        if let Some(active) = self.is_active {
            contact.is_active = active;
        }
    }
}

// CEP vazio é permitido (campo opcional); se vier, são 8 dígitos.
pub fn validate_cep(cep: &str) -> Result<(), ValidationError> {
    if cep.is_empty() || (cep.len() == 8 && cep.bytes().all(|b| b.is_ascii_digit())) {
        return Ok(());
    }

    let mut err = ValidationError::new("invalid_cep");
    err.message = Some("invalid_cep".into());
    Err(err)
}

// --- FILTRO DE STATUS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    Active,
    Inactive,
    #[default]
    All,
}

impl StatusFilter {
    /// Traduz o parâmetro `?active=`. Qualquer valor desconhecido vira `All`.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("true") => StatusFilter::Active,
            Some("false") => StatusFilter::Inactive,
            _ => StatusFilter::All,
        }
    }

    /// O valor de `is_active` a filtrar, ou `None` para trazer tudo.
    pub fn as_flag(self) -> Option<bool> {
        match self {
            StatusFilter::Active => Some(true),
            StatusFilter::Inactive => Some(false),
            StatusFilter::All => None,
        }
    }
}

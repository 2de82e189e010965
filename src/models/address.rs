// src/models/address.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Endereço devolvido pela consulta de CEP. Mesmos nomes de campo do Contact,
// então o front pode copiar direto para o formulário.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[schema(example = "01001000")]
    pub cep: String,
    #[schema(example = "Praça da Sé")]
    pub logradouro: String,
    #[schema(example = "Sé")]
    pub bairro: String,
    #[schema(example = "São Paulo")]
    pub localidade: String,
    #[schema(example = "SP")]
    pub uf: String,
}

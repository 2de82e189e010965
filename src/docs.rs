// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Contatos ---
        handlers::contacts::list_contacts,
        handlers::contacts::create_contact,
        handlers::contacts::update_contact,
        handlers::contacts::delete_contact,

        // --- Endereço ---
        handlers::cep::lookup_cep,
    ),
    components(
        schemas(
            models::contact::Contact,
            models::contact::NewContact,
            models::contact::ContactPatch,
            models::address::Address,
            handlers::contacts::CreatedContact,
            handlers::contacts::MessageResponse,
        )
    ),
    tags(
        (name = "Contatos", description = "Cadastro de contatos"),
        (name = "Endereço", description = "Consulta de endereço por CEP")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_type_documents_the_suggested_values() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let description = doc["components"]["schemas"]["NewContact"]["properties"]["contactType"]
            ["description"]
            .as_str()
            .unwrap_or_default();

        for suggested in ["cliente", "fornecedor", "parceiro"] {
            assert!(description.contains(suggested), "faltou {suggested}");
        }
    }
}

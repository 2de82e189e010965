// src/handlers/contacts.rs

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::contact::{Contact, ContactPatch, NewContact, StatusFilter},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListContactsQuery {
    /// `true`, `false` ou `all` (padrão)
    #[param(example = "true")]
    pub active: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedContact {
    #[schema(example = 1)]
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Contato atualizado com sucesso")]
    pub message: String,
}

// O ID do path tem que ser inteiro base 10, senão 400 antes de tocar no banco
fn parse_contact_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::InvalidIdentifier(raw.to_string()))
}

fn payload<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::InvalidPayload(rejection.body_text()))
}

// GET /api/contacts
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "Contatos",
    params(ListContactsQuery),
    responses(
        (status = 200, description = "Lista de contatos", body = Vec<Contact>),
        (status = 500, description = "Erro ao acessar o banco")
    )
)]
pub async fn list_contacts(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ListContactsQuery>,
) -> Result<impl IntoResponse, ApiError> {

    let filter = StatusFilter::from_query(query.active.as_deref());

    let contacts = app_state.contact_service
        .list_contacts(filter)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(contacts)))
}

// POST /api/contacts
#[utoipa::path(
    post,
    path = "/api/contacts",
    tag = "Contatos",
    request_body = NewContact,
    responses(
        (status = 201, description = "Contato criado", body = CreatedContact),
        (status = 400, description = "Dados inválidos"),
        (status = 500, description = "Erro ao acessar o banco")
    )
)]
pub async fn create_contact(
    State(app_state): State<AppState>,
    locale: Locale,
    body: Result<Json<NewContact>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let draft = payload(body)
        .map_err(|e| e.to_api_error(&locale.0, &app_state.i18n_store))?;

    let id = app_state.contact_service
        .create_contact(draft)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(CreatedContact { id })))
}

// PUT /api/contacts/{id}
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    tag = "Contatos",
    request_body = ContactPatch,
    params(
        ("id" = i64, Path, description = "ID do contato")
    ),
    responses(
        (status = 200, description = "Contato atualizado", body = MessageResponse),
        (status = 400, description = "ID ou dados inválidos"),
        (status = 404, description = "Contato não encontrado"),
        (status = 500, description = "Erro ao acessar o banco")
    )
)]
pub async fn update_contact(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(raw_id): Path<String>,
    body: Result<Json<ContactPatch>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {

    // O ID é conferido antes do corpo
    let id = parse_contact_id(&raw_id)
        .map_err(|e| e.to_api_error(&locale.0, &app_state.i18n_store))?;

    let patch = payload(body)
        .map_err(|e| e.to_api_error(&locale.0, &app_state.i18n_store))?;

    app_state.contact_service
        .update_contact(id, patch)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    let message = app_state.i18n_store.translate(&locale.0, "contact_updated");
    Ok((StatusCode::OK, Json(MessageResponse { message })))
}

// DELETE /api/contacts/{id}
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "Contatos",
    params(
        ("id" = i64, Path, description = "ID do contato")
    ),
    responses(
        (status = 200, description = "Contato excluído", body = MessageResponse),
        (status = 400, description = "ID inválido"),
        (status = 404, description = "Contato não encontrado"),
        (status = 500, description = "Erro ao acessar o banco")
    )
)]
pub async fn delete_contact(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let id = parse_contact_id(&raw_id)
        .map_err(|e| e.to_api_error(&locale.0, &app_state.i18n_store))?;

    app_state.contact_service
        .delete_contact(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    let message = app_state.i18n_store.translate(&locale.0, "contact_deleted");
    Ok((StatusCode::OK, Json(MessageResponse { message })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_id_must_be_a_whole_integer() {
        assert_eq!(parse_contact_id("42").unwrap(), 42);
        assert!(matches!(parse_contact_id("abc"), Err(AppError::InvalidIdentifier(_))));
        assert!(matches!(parse_contact_id("12abc"), Err(AppError::InvalidIdentifier(_))));
        assert!(matches!(parse_contact_id("1.5"), Err(AppError::InvalidIdentifier(_))));
    }
}

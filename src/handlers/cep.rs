// src/handlers/cep.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::address::Address,
};

// GET /api/cep/{cep}
#[utoipa::path(
    get,
    path = "/api/cep/{cep}",
    tag = "Endereço",
    params(
        ("cep" = String, Path, description = "CEP com 8 dígitos (máscara é aceita)")
    ),
    responses(
        (status = 200, description = "Endereço encontrado", body = Address),
        (status = 400, description = "CEP inválido"),
        (status = 404, description = "CEP não encontrado"),
        (status = 502, description = "Serviço de CEP indisponível")
    )
)]
pub async fn lookup_cep(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(cep): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let address = app_state.cep_service
        .lookup(&cep)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale.0, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(address)))
}

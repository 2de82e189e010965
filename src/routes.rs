// src/routes.rs

use axum::{routing::{get, put}, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// Monta o router completo. O `main` e os testes de integração usam o mesmo.
pub fn app(app_state: AppState) -> Router {
    // Não existe GET /contacts/{id}: a única leitura é a listagem
    let contact_routes = Router::new()
        .route("/"
               ,get(handlers::contacts::list_contacts)
               .post(handlers::contacts::create_contact)
        )
        .route("/{id}"
               ,put(handlers::contacts::update_contact)
               .delete(handlers::contacts::delete_contact)
        );

    let cep_routes = Router::new()
        .route("/{cep}", get(handlers::cep::lookup_cep));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/contacts", contact_routes)
        .nest("/api/cep", cep_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

// src/services/contact_service.rs

use std::sync::Arc;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::ContactStore,
    models::contact::{Contact, ContactPatch, NewContact, StatusFilter},
    services::id_policy::MAX_ID_ATTEMPTS,
};

#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    pub async fn list_contacts(&self, filter: StatusFilter) -> Result<Vec<Contact>, AppError> {
        self.store.find(filter.as_flag()).await
    }

    /// Cria o contato e devolve o ID atribuído.
    ///
    /// O store reserva o ID a partir da marca d'água, que nunca desce: ID excluído não
    /// volta. Se mesmo assim o insert esbarrar num ID já gravado (linha inserida por
    /// fora da API), reserva outro, até `MAX_ID_ATTEMPTS` vezes.
    pub async fn create_contact(&self, draft: NewContact) -> Result<i64, AppError> {
        draft.validate()?;

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = self.store.reserve_id().await?;
            let contact = Contact::from_draft(id, draft.clone());

            match self.store.insert(&contact).await {
                Ok(()) => {
                    tracing::info!("📇 Contato {} criado", id);
                    return Ok(id);
                }
                Err(AppError::DuplicateContactId(taken)) => {
                    tracing::warn!(
                        "ID {} já estava gravado (tentativa {}/{})",
                        taken,
                        attempt,
                        MAX_ID_ATTEMPTS
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::IdAssignmentExhausted(MAX_ID_ATTEMPTS))
    }

    pub async fn update_contact(&self, id: i64, patch: ContactPatch) -> Result<(), AppError> {
        patch.validate()?;

        if !self.store.update(id, &patch).await? {
            return Err(AppError::ContactNotFound(id));
        }

        tracing::info!("✏️ Contato {} atualizado", id);
        Ok(())
    }

    pub async fn delete_contact(&self, id: i64) -> Result<(), AppError> {
        if !self.store.delete(id).await? {
            return Err(AppError::ContactNotFound(id));
        }

        tracing::info!("🗑️ Contato {} excluído", id);
        Ok(())
    }
}

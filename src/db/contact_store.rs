// src/db/contact_store.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::contact::{Contact, ContactPatch},
};

/// Porta de persistência dos contatos.
///
/// O serviço recebe um `Arc<dyn ContactStore>` já pronto, então em produção ele fala
/// com o Postgres e nos testes com a versão em memória.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Lista contatos. `Some(flag)` filtra por `is_active`, `None` traz todos.
    async fn find(&self, is_active: Option<bool>) -> Result<Vec<Contact>, AppError>;

    /// Reserva o próximo ID de forma atômica.
    ///
    /// A reserva parte da marca d'água (maior ID já entregue ou gravado) e a avança,
    /// então um ID excluído nunca é entregue de novo.
    async fn reserve_id(&self) -> Result<i64, AppError>;

    /// Insere o documento. ID repetido devolve `AppError::DuplicateContactId`.
    async fn insert(&self, contact: &Contact) -> Result<(), AppError>;

    /// Atualização parcial. Devolve `false` se nenhum contato tinha esse ID.
    async fn update(&self, id: i64, patch: &ContactPatch) -> Result<bool, AppError>;

    /// Remoção definitiva. Devolve `false` se nenhum contato tinha esse ID.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

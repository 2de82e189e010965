// src/db/memory_store.rs

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::contact_store::ContactStore,
    models::contact::{Contact, ContactPatch},
    services::id_policy::next_id,
};

#[derive(Default)]
struct Collection {
    contacts: Vec<Contact>,
    // Maior ID já reservado. Só sobe.
    high_water: Option<i64>,
}

// Coleção em memória, na ordem de inserção. Serve para testes e para rodar sem Postgres.
#[derive(Default)]
pub struct MemoryContactStore {
    collection: RwLock<Collection>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Já começa com esses documentos (usado nos testes).
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let high_water = contacts.iter().map(|c| c.id).max();
        Self {
            collection: RwLock::new(Collection { contacts, high_water }),
        }
    }

    pub async fn snapshot(&self) -> Vec<Contact> {
        self.collection.read().await.contacts.clone()
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn find(&self, is_active: Option<bool>) -> Result<Vec<Contact>, AppError> {
        let collection = self.collection.read().await;
        Ok(collection
            .contacts
            .iter()
            .filter(|c| is_active.is_none_or(|flag| c.is_active == flag))
            .cloned()
            .collect())
    }

    async fn reserve_id(&self) -> Result<i64, AppError> {
        let mut collection = self.collection.write().await;
        let stored_max = collection.contacts.iter().map(|c| c.id).max();
        let id = next_id(collection.high_water.max(stored_max))?;
        collection.high_water = Some(id);
        Ok(id)
    }

    async fn insert(&self, contact: &Contact) -> Result<(), AppError> {
        let mut collection = self.collection.write().await;
        if collection.contacts.iter().any(|c| c.id == contact.id) {
            return Err(AppError::DuplicateContactId(contact.id));
        }
        collection.high_water = collection.high_water.max(Some(contact.id));
        collection.contacts.push(contact.clone());
        Ok(())
    }

    async fn update(&self, id: i64, patch: &ContactPatch) -> Result<bool, AppError> {
        let mut collection = self.collection.write().await;
        match collection.contacts.iter_mut().find(|c| c.id == id) {
            Some(contact) => {
                patch.apply_to(contact);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut collection = self.collection.write().await;
        let before = collection.contacts.len();
        collection.contacts.retain(|c| c.id != id);
        Ok(collection.contacts.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reserved_ids_survive_deletes() {
        let store = MemoryContactStore::new();
        assert_eq!(store.reserve_id().await.unwrap(), 1);
        assert_eq!(store.reserve_id().await.unwrap(), 2);
        assert!(!store.delete(2).await.unwrap());
        assert_eq!(store.reserve_id().await.unwrap(), 3);
    }
}

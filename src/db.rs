pub mod contact_store;
pub use contact_store::ContactStore;
pub mod contact_repo;
pub use contact_repo::PgContactRepository;
pub mod memory_store;
pub use memory_store::MemoryContactStore;

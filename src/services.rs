pub mod id_policy;
pub mod contact_service;
pub use contact_service::ContactService;
pub mod cep_service;
pub use cep_service::CepService;

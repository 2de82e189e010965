pub mod contacts;
pub mod cep;

//! Backend do gerenciador de contatos: API REST sobre um cadastro de contatos
//! com IDs sequenciais e consulta de endereço por CEP.

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

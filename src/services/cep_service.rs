// src/services/cep_service.rs

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::{common::error::AppError, models::address::Address};

// Resposta do ViaCEP. CEP inexistente vem com HTTP 200 e `"erro": true`
// (algumas versões mandam `"erro": "true"`).
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    erro: Option<Value>,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

impl ViaCepResponse {
    fn is_not_found(&self) -> bool {
        match &self.erro {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(s)) => s != "false",
            Some(_) => true,
        }
    }
}

/// Remove máscara ("01001-000" -> "01001000") e exige exatamente 8 dígitos.
pub fn normalize_cep(raw: &str) -> Result<String, AppError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 8 {
        return Err(AppError::InvalidCep(raw.to_string()));
    }
    Ok(digits)
}

// Cliente da consulta de endereço. Não é usado pelo ContactService: só o front
// (via /api/cep) consulta antes de mandar o formulário.
#[derive(Clone)]
pub struct CepService {
    client: Client,
    base_url: String,
}

impl CepService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Falha ao montar cliente HTTP do CEP: {}", e))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub async fn lookup(&self, raw_cep: &str) -> Result<Address, AppError> {
        let cep = normalize_cep(raw_cep)?;
        let url = format!("{}/ws/{}/json/", self.base_url, cep);
        tracing::debug!("Consultando CEP: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::AddressLookupUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::AddressLookupUnavailable(format!(
                "status {} para o CEP {}",
                status, cep
            )));
        }

        let body: ViaCepResponse = response
            .json()
            .await
            .map_err(|e| AppError::AddressLookupUnavailable(e.to_string()))?;

        if body.is_not_found() {
            return Err(AppError::CepNotFound(cep));
        }

        Ok(Address {
            cep,
            logradouro: body.logradouro,
            bairro: body.bairro,
            localidade: body.localidade,
            uf: body.uf,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(url: &str) -> CepService {
        CepService::new(url, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn normalize_strips_mask() {
        assert_eq!(normalize_cep("01001-000").unwrap(), "01001000");
        assert!(matches!(normalize_cep("123"), Err(AppError::InvalidCep(_))));
    }

    #[tokio::test]
    async fn found_cep_maps_to_address() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ws/01001000/json/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"cep":"01001-000","logradouro":"Praça da Sé","complemento":"lado ímpar",
                    "bairro":"Sé","localidade":"São Paulo","uf":"SP","ibge":"3550308"}"#,
            )
            .create_async()
            .await;

        let address = service(&server.url()).lookup("01001-000").await.unwrap();

        mock.assert_async().await;
        assert_eq!(address.cep, "01001000");
        assert_eq!(address.logradouro, "Praça da Sé");
        assert_eq!(address.uf, "SP");
    }

    #[tokio::test]
    async fn erro_flag_means_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ws/99999999/json/")
            .with_status(200)
            .with_body(r#"{"erro": "true"}"#)
            .create_async()
            .await;

        let result = service(&server.url()).lookup("99999999").await;
        assert!(matches!(result, Err(AppError::CepNotFound(cep)) if cep == "99999999"));
    }

    #[tokio::test]
    async fn upstream_failure_is_not_a_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/ws/01001000/json/")
            .with_status(500)
            .create_async()
            .await;

        let result = service(&server.url()).lookup("01001000").await;
        assert!(matches!(result, Err(AppError::AddressLookupUnavailable(_))));
    }

    #[tokio::test]
    async fn invalid_cep_skips_the_network() {
        // Porta fechada: se tentasse a requisição, o erro seria outro
        let result = service("http://127.0.0.1:9").lookup("abc").await;
        assert!(matches!(result, Err(AppError::InvalidCep(_))));
    }
}

// src/config.rs

use anyhow::{bail, Context};
use sqlx::postgres::PgPoolOptions;
use std::{env, str::FromStr, sync::Arc, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{contact_repo::is_plain_identifier, ContactStore, MemoryContactStore, PgContactRepository},
    services::{CepService, ContactService},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub contacts_table: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub run_migrations: bool,
    pub cep_api_url: String,
    pub cep_timeout: Duration,
    pub bind_addr: String,
}

impl Settings {
    /// Lê o `.env` (se existir) e depois as variáveis de ambiente.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta as configurações a partir de qualquer fonte chave -> valor.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = match lookup("CONTACT_STORE").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("CONTACT_STORE inválido: '{}' (use postgres ou memory)", other),
        };

        let database_url = lookup("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL deve ser definida");
        }

        let contacts_table = lookup("CONTACTS_TABLE").unwrap_or_else(|| "contacts".to_string());
        if !is_plain_identifier(&contacts_table) {
            bail!("CONTACTS_TABLE inválida: '{}'", contacts_table);
        }

        Ok(Self {
            store_backend,
            database_url,
            contacts_table,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 3)?),
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", true)?,
            cep_api_url: lookup("CEP_API_URL").unwrap_or_else(|| "https://viacep.com.br".to_string()),
            cep_timeout: Duration::from_secs(parse_or(&lookup, "CEP_TIMEOUT_SECS", 5)?),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} inválida: '{}'", key, raw)),
        None => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub contact_service: ContactService,
    pub cep_service: CepService,
    pub i18n_store: Arc<I18nStore>,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let store: Arc<dyn ContactStore> = match settings.store_backend {
            StoreBackend::Postgres => {
                let database_url = settings
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL deve ser definida")?;

                // Pool preguiçoso: a conexão só é aberta na primeira consulta e depois reaproveitada
                let db_pool = PgPoolOptions::new()
                    .max_connections(settings.db_max_connections)
                    .acquire_timeout(settings.db_acquire_timeout)
                    .connect_lazy(database_url)?;

                let repo = PgContactRepository::new(db_pool, &settings.contacts_table);
                if settings.run_migrations {
                    repo.ensure_schema().await?;
                }
                Arc::new(repo)
            }
            StoreBackend::Memory => {
                tracing::warn!("⚠️ Usando armazenamento em memória: os dados somem ao reiniciar");
                Arc::new(MemoryContactStore::new())
            }
        };

        Self::with_store(store, settings)
    }

    /// Monta o gráfico de dependências em cima de um store já pronto (usado nos testes).
    pub fn with_store(store: Arc<dyn ContactStore>, settings: &Settings) -> anyhow::Result<Self> {
        let cep_service = CepService::new(settings.cep_api_url.clone(), settings.cep_timeout)?;

        Ok(Self {
            contact_service: ContactService::new(store),
            cep_service,
            i18n_store: Arc::new(I18nStore::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_with_only_database_url() {
        let s = settings(&[("DATABASE_URL", "postgres://localhost/contact_manager")]).unwrap();

        assert_eq!(s.store_backend, StoreBackend::Postgres);
        assert_eq!(s.contacts_table, "contacts");
        assert_eq!(s.db_max_connections, 5);
        assert!(s.run_migrations);
        assert_eq!(s.cep_api_url, "https://viacep.com.br");
        assert_eq!(s.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn postgres_requires_database_url() {
        assert!(settings(&[]).is_err());
        assert!(settings(&[("CONTACT_STORE", "memory")]).is_ok());
    }

    #[test]
    fn rejects_unsafe_table_names_and_bad_numbers() {
        assert!(settings(&[("CONTACT_STORE", "memory"), ("CONTACTS_TABLE", "x; drop")]).is_err());
        assert!(settings(&[("CONTACT_STORE", "memory"), ("DB_MAX_CONNECTIONS", "many")]).is_err());
        assert!(settings(&[("CONTACT_STORE", "mongo")]).is_err());
    }

    #[test]
    fn table_name_is_configurable() {
        let s = settings(&[("CONTACT_STORE", "memory"), ("CONTACTS_TABLE", "contatos")]).unwrap();
        assert_eq!(s.contacts_table, "contatos");
    }

    #[test]
    fn reserved_words_are_accepted_as_table_names() {
        // O repositório põe o nome entre aspas, então `order` funciona
        let s = settings(&[("CONTACT_STORE", "memory"), ("CONTACTS_TABLE", "order")]).unwrap();
        assert_eq!(s.contacts_table, "order");
    }
}

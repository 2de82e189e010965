// src/db/contact_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::contact_store::ContactStore,
    models::contact::{Contact, ContactPatch},
};

const COLUMNS: &str = "id, name, phone, email, company, cep, logradouro, numero, complemento, \
                       bairro, localidade, uf, observation, is_active, contact_type";

// Sufixo da tabela auxiliar que guarda a marca d'água dos IDs
const ID_TABLE_SUFFIX: &str = "_ids";

// SQLSTATE 22003: numeric_value_out_of_range (BIGINT estourou)
const OUT_OF_RANGE: &str = "22003";

/// Nome de tabela aceitável para interpolar no SQL (não dá pra usar bind em identificador).
/// O limite deixa espaço para o sufixo da tabela de IDs dentro dos 63 bytes do Postgres.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    name.len() <= 63 - ID_TABLE_SUFFIX.len() && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Identificador entre aspas duplas: palavras reservadas (`user`, `order`) viram nomes válidos.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

// O repositório de contatos, responsável por todas as interações com a tabela de contatos
#[derive(Clone)]
pub struct PgContactRepository {
    pool: PgPool,
    // Já entre aspas, prontos para o format!
    table: String,
    id_table: String,
}

impl PgContactRepository {
    pub fn new(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            table: quote_ident(table),
            id_table: quote_ident(&format!("{table}{ID_TABLE_SUFFIX}")),
        }
    }

    /// Cria as tabelas se ainda não existirem.
    ///
    /// A PRIMARY KEY em `id` garante a unicidade; a tabela de IDs tem uma única linha
    /// com o maior ID já entregue, e só cresce.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        let contacts_sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id           BIGINT  PRIMARY KEY,
                name         TEXT    NOT NULL,
                phone        TEXT    NOT NULL,
                email        TEXT    NOT NULL,
                company      TEXT    NOT NULL DEFAULT '',
                cep          TEXT    NOT NULL DEFAULT '',
                logradouro   TEXT    NOT NULL DEFAULT '',
                numero       TEXT    NOT NULL DEFAULT '',
                complemento  TEXT    NOT NULL DEFAULT '',
                bairro       TEXT    NOT NULL DEFAULT '',
                localidade   TEXT    NOT NULL DEFAULT '',
                uf           TEXT    NOT NULL DEFAULT '',
                observation  TEXT    NOT NULL DEFAULT '',
                is_active    BOOLEAN NOT NULL DEFAULT TRUE,
                contact_type TEXT    NOT NULL
            )
            "#,
            table = self.table
        );

        let id_table_sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {id_table} (
                singleton BOOLEAN PRIMARY KEY DEFAULT TRUE CHECK (singleton),
                last_id   BIGINT  NOT NULL DEFAULT 0
            )
            "#,
            id_table = self.id_table
        );

        let seed_sql = format!(
            "INSERT INTO {} (singleton, last_id) VALUES (TRUE, 0) ON CONFLICT (singleton) DO NOTHING",
            self.id_table
        );

        // Um comando por query: o protocolo preparado não aceita vários de uma vez
        sqlx::query(&contacts_sql).execute(&self.pool).await?;
        sqlx::query(&id_table_sql).execute(&self.pool).await?;
        sqlx::query(&seed_sql).execute(&self.pool).await?;

        tracing::info!("✅ Tabelas {} e {} prontas", self.table, self.id_table);
        Ok(())
    }
}

#[async_trait]
impl ContactStore for PgContactRepository {
    async fn find(&self, is_active: Option<bool>) -> Result<Vec<Contact>, AppError> {
        let contacts = match is_active {
            Some(flag) => {
                let sql = format!(
                    "SELECT {COLUMNS} FROM {} WHERE is_active = $1 ORDER BY id",
                    self.table
                );
                sqlx::query_as::<_, Contact>(&sql)
                    .bind(flag)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {COLUMNS} FROM {} ORDER BY id", self.table);
                sqlx::query_as::<_, Contact>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(contacts)
    }

    async fn reserve_id(&self) -> Result<i64, AppError> {
        // O UPDATE trava a linha única: dois creates simultâneos saem com IDs diferentes.
        // GREATEST cobre linhas gravadas por fora, com ID acima da marca.
        let sql = format!(
            "UPDATE {} SET last_id = GREATEST(last_id, (SELECT COALESCE(MAX(id), 0) FROM {})) + 1 \
             RETURNING last_id",
            self.id_table, self.table
        );

        let reserved = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.code().as_deref() == Some(OUT_OF_RANGE) {
                        return AppError::IdSequenceExhausted;
                    }
                }
                e.into()
            })?;

        reserved.ok_or_else(|| {
            AppError::StoreUnavailable(format!(
                "tabela {} sem a linha de controle (rode com RUN_MIGRATIONS=true)",
                self.id_table
            ))
        })
    }

    async fn insert(&self, contact: &Contact) -> Result<(), AppError> {
        let sql = format!(
            "INSERT INTO {} ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
            self.table
        );

        sqlx::query(&sql)
            .bind(contact.id)
            .bind(&contact.name)
            .bind(&contact.phone)
            .bind(&contact.email)
            .bind(&contact.company)
            .bind(&contact.cep)
            .bind(&contact.logradouro)
            .bind(&contact.numero)
            .bind(&contact.complemento)
            .bind(&contact.bairro)
            .bind(&contact.localidade)
            .bind(&contact.uf)
            .bind(&contact.observation)
            .bind(contact.is_active)
            .bind(&contact.contact_type)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // Violação da PRIMARY KEY: outro create pegou o mesmo ID antes
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::DuplicateContactId(contact.id);
                    }
                }
                e.into()
            })?;

        Ok(())
    }

    async fn update(&self, id: i64, patch: &ContactPatch) -> Result<bool, AppError> {
        // COALESCE: parâmetro NULL mantém o valor atual da coluna
        let sql = format!(
            r#"
            UPDATE {}
            SET
                name         = COALESCE($2, name),
                phone        = COALESCE($3, phone),
                email        = COALESCE($4, email),
                company      = COALESCE($5, company),
                cep          = COALESCE($6, cep),
                logradouro   = COALESCE($7, logradouro),
                numero       = COALESCE($8, numero),
                complemento  = COALESCE($9, complemento),
                bairro       = COALESCE($10, bairro),
                localidade   = COALESCE($11, localidade),
                uf           = COALESCE($12, uf),
                observation  = COALESCE($13, observation),
                is_active    = COALESCE($14, is_active),
                contact_type = COALESCE($15, contact_type)
            WHERE id = $1
            "#,
            self.table
        );

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(patch.name.as_deref())
            .bind(patch.phone.as_deref())
            .bind(patch.email.as_deref())
            .bind(patch.company.as_deref())
            .bind(patch.cep.as_deref())
            .bind(patch.logradouro.as_deref())
            .bind(patch.numero.as_deref())
            .bind(patch.complemento.as_deref())
            .bind(patch.bairro.as_deref())
            .bind(patch.localidade.as_deref())
            .bind(patch.uf.as_deref())
            .bind(patch.observation.as_deref())
            .bind(patch.is_active)
            .bind(patch.contact_type.as_deref())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }
}

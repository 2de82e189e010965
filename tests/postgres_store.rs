use sqlx::{postgres::PgPoolOptions, PgPool};

use contatos::{
    common::error::AppError,
    db::{contact_repo::quote_ident, ContactStore, PgContactRepository},
    models::contact::{Contact, ContactPatch},
};

// Cada teste usa a própria tabela, então podem rodar em paralelo no mesmo banco.
async fn fresh_repo(test: &str, table: &str) -> Option<(PgPool, PgContactRepository)> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("skipping {test}: DATABASE_URL not set");
            return None;
        }
    };
    let pool = match PgPoolOptions::new().max_connections(2).connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("skipping {test}: {e}");
            return None;
        }
    };

    drop_tables(&pool, table).await;
    let repo = PgContactRepository::new(pool.clone(), table);
    repo.ensure_schema().await.unwrap();
    Some((pool, repo))
}

async fn drop_tables(pool: &PgPool, table: &str) {
    let sql = format!(
        "DROP TABLE IF EXISTS {}, {}",
        quote_ident(table),
        quote_ident(&format!("{table}_ids"))
    );
    sqlx::query(&sql).execute(pool).await.unwrap();
}

fn contact(id: i64, active: bool) -> Contact {
    Contact {
        id,
        name: format!("Contato {id}"),
        phone: "11999999999".into(),
        email: format!("c{id}@x.com"),
        company: "ACME".into(),
        cep: "01001000".into(),
        logradouro: "Praça da Sé".into(),
        numero: "10".into(),
        complemento: String::new(),
        bairro: "Sé".into(),
        localidade: "São Paulo".into(),
        uf: "SP".into(),
        observation: String::new(),
        is_active: active,
        contact_type: "cliente".into(),
    }
}

fn ids(contacts: Vec<Contact>) -> Vec<i64> {
    contacts.into_iter().map(|c| c.id).collect()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL and local Postgres; non-CI integration test"]
async fn empty_table_starts_at_one_and_never_reuses_the_top_id() {
    let table = "contatos_it_reserve";
    let Some((pool, repo)) = fresh_repo("empty_table_starts_at_one", table).await else {
        return;
    };

    assert_eq!(repo.reserve_id().await.unwrap(), 1);
    repo.insert(&contact(1, true)).await.unwrap();
    assert_eq!(repo.reserve_id().await.unwrap(), 2);
    repo.insert(&contact(2, true)).await.unwrap();

    assert!(repo.delete(2).await.unwrap());
    assert_eq!(repo.reserve_id().await.unwrap(), 3);

    drop_tables(&pool, table).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL and local Postgres; non-CI integration test"]
async fn rows_written_outside_the_api_push_the_mark_up() {
    let table = "contatos_it_outside";
    let Some((pool, repo)) = fresh_repo("rows_written_outside_the_api", table).await else {
        return;
    };

    repo.insert(&contact(10, true)).await.unwrap();
    assert_eq!(repo.reserve_id().await.unwrap(), 11);

    drop_tables(&pool, table).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL and local Postgres; non-CI integration test"]
async fn duplicate_insert_is_reported_as_duplicate_id() {
    let table = "contatos_it_duplicate";
    let Some((pool, repo)) = fresh_repo("duplicate_insert", table).await else {
        return;
    };

    repo.insert(&contact(1, true)).await.unwrap();
    let err = repo.insert(&contact(1, false)).await.unwrap_err();

    assert!(matches!(err, AppError::DuplicateContactId(1)));
    assert_eq!(repo.find(None).await.unwrap(), vec![contact(1, true)]);

    drop_tables(&pool, table).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL and local Postgres; non-CI integration test"]
async fn one_field_patch_keeps_every_other_column() {
    let table = "contatos_it_patch";
    let Some((pool, repo)) = fresh_repo("one_field_patch", table).await else {
        return;
    };
    repo.insert(&contact(1, true)).await.unwrap();

    let patch = ContactPatch { phone: Some("21888888888".into()), ..Default::default() };
    assert!(repo.update(1, &patch).await.unwrap());

    let expected = Contact { phone: "21888888888".into(), ..contact(1, true) };
    assert_eq!(repo.find(None).await.unwrap(), vec![expected]);

    let missing = ContactPatch { name: Some("X".into()), ..Default::default() };
    assert!(!repo.update(2, &missing).await.unwrap());

    drop_tables(&pool, table).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL and local Postgres; non-CI integration test"]
async fn find_filters_by_status_in_id_order() {
    let table = "contatos_it_find";
    let Some((pool, repo)) = fresh_repo("find_filters_by_status", table).await else {
        return;
    };
    for (id, active) in [(3, true), (1, true), (2, false)] {
        repo.insert(&contact(id, active)).await.unwrap();
    }

    assert_eq!(ids(repo.find(Some(true)).await.unwrap()), vec![1, 3]);
    assert_eq!(ids(repo.find(Some(false)).await.unwrap()), vec![2]);
    assert_eq!(ids(repo.find(None).await.unwrap()), vec![1, 2, 3]);

    assert!(!repo.delete(99).await.unwrap());
    assert_eq!(ids(repo.find(None).await.unwrap()), vec![1, 2, 3]);

    drop_tables(&pool, table).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL and local Postgres; non-CI integration test"]
async fn reserved_word_works_as_table_name() {
    let table = "select";
    let Some((pool, repo)) = fresh_repo("reserved_word_works_as_table_name", table).await else {
        return;
    };

    let id = repo.reserve_id().await.unwrap();
    repo.insert(&contact(id, true)).await.unwrap();
    assert_eq!(ids(repo.find(None).await.unwrap()), vec![1]);

    drop_tables(&pool, table).await;
}

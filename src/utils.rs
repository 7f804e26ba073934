use std::{error::Error, fmt::Debug};

use actix_web::web;
use diesel::{r2d2::ConnectionManager, Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use r2d2::{Pool, PooledConnection};
use thiserror::Error;

use crate::{db_interaction::PgStore, error::ShopError, telemetry::spawn_blocking_with_tracing};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub fn error_fmt_chain(f: &mut std::fmt::Formatter<'_>, source: &Option<impl Error>) -> std::fmt::Result{
    if let Some(error) = source{
        write!(f, "\n\tCaused By:\n\t")?;
        write!(f, "{:?}", &error)?;
        error_fmt_chain(f, &error.source())
    } else {
        Ok(())
    }
}

pub fn build_pool(database_url: &str, max_connections: u32) -> Result<DbPool, r2d2::Error> {
    Pool::builder()
        .max_size(max_connections)
        .build(ConnectionManager::<PgConnection>::new(database_url))
}

pub fn run_migrations(pool: &DbPool) -> Result<(), anyhow::Error> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

    Ok(())
}

pub async fn get_pooled_connection(
    pool: &web::Data<DbPool>
) -> Result<DbConnection, PoolGetError>{
    let pool_clone = pool.clone();

    let res = spawn_blocking_with_tracing(move || {
        pool_clone.get()
    })
    .await??;

    Ok(res)
}

#[derive(Error)]
pub enum PoolGetError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to get connection from pool")]
    DbPoolError(#[from] r2d2::Error),
}

impl Debug for PoolGetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Runs `operation` on a pooled connection inside a single transaction.
// Any error returned by the operation rolls back every write it made.
#[tracing::instrument(
    "Running store operation in transaction",
    skip_all
)]
pub async fn run_in_transaction<T, F>(
    pool: &web::Data<DbPool>,
    operation: F
) -> Result<T, ShopError>
where
    F: FnOnce(&mut PgStore<'_>) -> Result<T, ShopError> + Send + 'static,
    T: Send + 'static,
{
    let mut conn = get_pooled_connection(pool)
        .await
        .map_err(|e| ShopError::Persistence(e.into()))?;

    spawn_blocking_with_tracing(move || {
        conn.transaction::<T, ShopError, _>(|conn| {
            let mut store = PgStore::new(conn);
            operation(&mut store)
        })
    })
    .await
    .map_err(|e| ShopError::Persistence(e.into()))?
}

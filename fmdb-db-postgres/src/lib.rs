//! PostgreSQL persistence for the farmer-markets directory.
//!
//! Implements the repository traits of `fmdb-core` on top of a
//! pooled diesel connection. Simple lookups go through the diesel
//! DSL, the aggregate and distance listings use hand-written
//! parameterized SQL.

#[macro_use]
extern crate diesel;

use std::cell::RefCell;

use anyhow::Result as Fallible;
use diesel::{pg::PgConnection, r2d2};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

mod models;
mod repo_impl;
mod schema;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

type Connection = PgConnection;

type ConnectionManager = r2d2::ConnectionManager<Connection>;
type ConnectionPool = r2d2::Pool<ConnectionManager>;
type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

#[derive(Clone)]
pub struct Connections {
    pool: ConnectionPool,
}

impl Connections {
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        // Establish a test connection before building the pool so
        // that an unreachable or misconfigured database fails fast
        // instead of being retried by r2d2.
        use diesel::Connection as _;
        let _ = PgConnection::establish(url)?;
        let manager = ConnectionManager::new(url);
        let pool = ConnectionPool::builder()
            .max_size(pool_size)
            .build(manager)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> Fallible<Db> {
        let conn = self.pool.get().inspect_err(|err| {
            log::error!("Failed to obtain pooled database connection: {err}");
        })?;
        Ok(Db {
            conn: RefCell::new(conn),
        })
    }
}

/// A checked-out connection. The repository traits take `&self`, so
/// the inner connection is handed out through a `RefCell`.
pub struct Db {
    conn: RefCell<PooledConnection>,
}

pub fn run_embedded_database_migrations(db: &Db) -> Fallible<()> {
    log::info!("Running embedded database migrations");
    db.conn
        .borrow_mut()
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow::anyhow!("Database migration failed: {err}"))?;
    Ok(())
}

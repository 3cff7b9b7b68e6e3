use clap::Parser;

mod cfg;
mod console;

use self::cfg::Cfg;

#[derive(Debug, Parser)]
#[command(version, about = "Directory of farmer markets with ratings and geo search")]
struct Args {
    /// Database URL (overrides DATABASE_URL)
    #[arg(long, value_name = "URL")]
    db_url: Option<String>,

    /// Apply pending database migrations and exit
    #[arg(long)]
    migrate_only: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let mut cfg = Cfg::from_env_or_default();
    if let Some(db_url) = args.db_url {
        cfg.db_url = db_url;
    }

    let connections =
        fmdb_db_postgres::Connections::init(&cfg.db_url, cfg.db_connection_pool_size)?;
    let db = connections.conn()?;
    fmdb_db_postgres::run_embedded_database_migrations(&db)?;
    if args.migrate_only {
        return Ok(());
    }

    console::run(&db, &cfg)
}

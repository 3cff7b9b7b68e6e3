use std::env;

use fmdb_core::util::{paging::PageBounds, validate::DEFAULT_RADIUS_MILES};

const DEFAULT_DB_URL: &str = "postgres://localhost/farmermarketsdb";
const DB_CONNECTION_POOL_SIZE: u32 = 10;
const DEFAULT_NEAREST_LIMIT: u64 = 20;

#[derive(Debug, Clone)]
pub struct Cfg {
    pub db_url: String,
    pub db_connection_pool_size: u32,
    pub page_bounds: PageBounds,
    pub default_radius_miles: f64,
    pub nearest_limit: u64,
}

impl Cfg {
    pub fn from_env_or_default() -> Self {
        let mut cfg = Self::default();
        if let Ok(db_url) = env::var("DATABASE_URL") {
            cfg.db_url = db_url;
        }
        if let Some(pool_size) = parse_var("DB_CONNECTION_POOL_SIZE") {
            cfg.db_connection_pool_size = pool_size;
        }
        if let Some(per_page) = parse_var("DEFAULT_PER_PAGE") {
            cfg.page_bounds.default_per_page = cfg.page_bounds.clamp_per_page(per_page);
        }
        if let Some(radius) = parse_var("DEFAULT_RADIUS_MILES") {
            cfg.default_radius_miles = radius;
        }
        if let Some(limit) = parse_var("NEAREST_MARKETS_LIMIT") {
            cfg.nearest_limit = limit;
        }
        cfg
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    let value = env::var(key).ok()?;
    let parsed = value.parse().ok();
    if parsed.is_none() {
        log::warn!("Ignoring unparseable value of {key}: {value}");
    }
    parsed
}

impl Default for Cfg {
    fn default() -> Self {
        Self {
            db_url: DEFAULT_DB_URL.to_string(),
            db_connection_pool_size: DB_CONNECTION_POOL_SIZE,
            page_bounds: PageBounds::default(),
            default_radius_miles: DEFAULT_RADIUS_MILES,
            nearest_limit: DEFAULT_NEAREST_LIMIT,
        }
    }
}

//! Process configuration loaded from the environment (and `.env`, via `dotenvy` in `main`).
//!
//! Only the ambient settings live here. Provider credentials and `SITE_ID` are read through
//! [`crate::providers::EnvSource`] at seed time.

use crate::error::SeedError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:db.sqlite3";
pub const DEFAULT_LOGLEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// sqlx SQLite URL of the allauth store. The file must already exist.
    pub database_url: String,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            loglevel: DEFAULT_LOGLEVEL.to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by `DATABASE_URL` / `LOGLEVEL`.
    pub fn load() -> Result<Self, SeedError> {
        Ok(Self::figment().extract()?)
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["database_url", "loglevel"]))
    }
}

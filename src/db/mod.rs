//! Database module: row models, schema, and the SQLite-backed store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring the allauth rows this tool touches
//! - `schema.rs`: SQL DDL compatible with the django-allauth tables (used to bootstrap stores)
//! - `sqlite.rs`: `SocialAppStorage`, the lookups and writes the seeder needs

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{AppField, DbSite, DbSocialApp, FieldChange, NewSocialApp};
pub use sqlite::{SocialAppStorage, SqlitePool};

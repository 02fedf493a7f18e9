pub mod command;
pub mod config;
pub mod db;
pub mod error;
pub mod notice;
pub mod providers;
pub mod service;

pub use error::SeedError;
pub use service::seeder::{CredentialSeeder, SeedReport};

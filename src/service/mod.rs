pub mod seeder;

pub use seeder::{CredentialSeeder, ProviderOutcome, SeedAction, SeedReport};

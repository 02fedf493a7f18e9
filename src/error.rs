use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SeedError {
    #[error("SITE_ID must be an integer, got: {raw}")]
    InvalidSiteId { raw: String },

    #[error("Site with id={id} does not exist. Create it in /admin or via migrations.")]
    SiteNotFound { id: i64 },

    #[error("Multiple SocialApp rows exist for provider '{provider}'")]
    AmbiguousProvider { provider: String },

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl From<figment::Error> for SeedError {
    fn from(e: figment::Error) -> Self {
        SeedError::Config(Box::new(e))
    }
}

impl SeedError {
    /// Errors raised by validating the command input, as opposed to store or config failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SeedError::InvalidSiteId { .. }
                | SeedError::SiteNotFound { .. }
                | SeedError::AmbiguousProvider { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_error_messages() {
        let e = SeedError::InvalidSiteId {
            raw: "abc".to_string(),
        };
        assert_eq!(e.to_string(), "SITE_ID must be an integer, got: abc");
        assert!(e.is_validation());

        let e = SeedError::SiteNotFound { id: 7 };
        assert_eq!(
            e.to_string(),
            "Site with id=7 does not exist. Create it in /admin or via migrations."
        );
    }

    #[test]
    fn database_errors_are_not_validation() {
        let e: SeedError = SqlxError::RowNotFound.into();
        assert!(!e.is_validation());
        assert!(e.to_string().starts_with("Database error:"));
    }
}

use crate::providers::ProviderCredential;
use serde::Serialize;
use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbSite {
    pub id: i64,
    pub domain: String,
    pub name: String,
}

/// A `socialaccount_socialapp` row, minus the columns this tool never reads.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbSocialApp {
    pub id: i64,
    pub provider: String,
    pub name: String,
    pub client_id: String,
    pub secret: String,
}

/// Values for a row created on first sight of a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSocialApp {
    pub provider: String,
    pub name: String,
    pub client_id: String,
    pub secret: String,
}

impl From<&ProviderCredential> for NewSocialApp {
    fn from(c: &ProviderCredential) -> Self {
        Self {
            provider: c.provider.to_string(),
            name: c.name.to_string(),
            client_id: c.client_id.as_str().to_string(),
            secret: c.secret.secret().to_string(),
        }
    }
}

/// Columns the seeder manages on an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppField {
    Name,
    ClientId,
    Secret,
}

impl AppField {
    pub fn column(self) -> &'static str {
        match self {
            AppField::Name => "name",
            AppField::ClientId => "client_id",
            AppField::Secret => "secret",
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct FieldChange {
    pub field: AppField,
    pub value: String,
}

impl fmt::Debug for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self.field {
            AppField::Secret => "[redacted]",
            _ => self.value.as_str(),
        };
        f.debug_struct("FieldChange")
            .field("field", &self.field)
            .field("value", &value)
            .finish()
    }
}

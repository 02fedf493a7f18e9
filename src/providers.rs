//! Supported identity providers and how their credentials are read from the environment.

use crate::error::SeedError;
use oauth2::{ClientId, ClientSecret};
use std::collections::HashMap;

pub const SITE_ID_VAR: &str = "SITE_ID";
pub const DEFAULT_SITE_ID: &str = "1";

/// Where the seeder reads its variables from. Missing and unset are the same thing.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

fn read_trimmed<E: EnvSource + ?Sized>(env: &E, key: &str, default: &str) -> String {
    env.var(key)
        .as_deref()
        .unwrap_or(default)
        .trim()
        .to_string()
}

/// Parse `SITE_ID`, defaulting to site 1.
pub fn site_id_from_env<E: EnvSource + ?Sized>(env: &E) -> Result<i64, SeedError> {
    let raw = read_trimmed(env, SITE_ID_VAR, DEFAULT_SITE_ID);
    parse_integer(&raw).ok_or(SeedError::InvalidSiteId { raw })
}

/// Decimal integer with an optional sign; single underscores may group digits (`1_000`).
fn parse_integer(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return None;
    }
    raw.replace('_', "").parse().ok()
}

/// Static description of one provider: its allauth key, display name, and env variable names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderSpec {
    pub provider: &'static str,
    pub name: &'static str,
    pub client_id_var: &'static str,
    pub secret_var: &'static str,
}

/// Processed in this order.
pub const PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        provider: "google",
        name: "Google",
        client_id_var: "GOOGLE_CLIENT_ID",
        secret_var: "GOOGLE_CLIENT_SECRET",
    },
    ProviderSpec {
        provider: "facebook",
        name: "Facebook",
        client_id_var: "FACEBOOK_APP_ID",
        secret_var: "FACEBOOK_APP_SECRET",
    },
];

#[derive(Debug, Clone)]
pub struct ProviderCredential {
    pub provider: &'static str,
    pub name: &'static str,
    pub client_id: ClientId,
    pub secret: ClientSecret,
}

impl ProviderSpec {
    /// Returns `None` when either value is empty after trimming.
    pub fn credential<E: EnvSource + ?Sized>(&self, env: &E) -> Option<ProviderCredential> {
        let client_id = read_trimmed(env, self.client_id_var, "");
        let secret = read_trimmed(env, self.secret_var, "");
        if client_id.is_empty() || secret.is_empty() {
            return None;
        }
        Some(ProviderCredential {
            provider: self.provider,
            name: self.name,
            client_id: ClientId::new(client_id),
            secret: ClientSecret::new(secret),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn site_id_defaults_to_one() {
        assert_eq!(site_id_from_env(&env(&[])).unwrap(), 1);
    }

    #[test]
    fn site_id_is_trimmed() {
        assert_eq!(site_id_from_env(&env(&[("SITE_ID", "  42\n")])).unwrap(), 42);
    }

    #[test]
    fn site_id_rejects_non_integers() {
        for raw in ["abc", "1.5", ""] {
            let err = site_id_from_env(&env(&[("SITE_ID", raw)])).unwrap_err();
            assert!(matches!(err, SeedError::InvalidSiteId { .. }), "accepted {raw:?}");
        }
        let err = site_id_from_env(&env(&[("SITE_ID", " abc ")])).unwrap_err();
        assert_eq!(err.to_string(), "SITE_ID must be an integer, got: abc");
    }

    #[test]
    fn site_id_accepts_digit_grouping() {
        assert_eq!(site_id_from_env(&env(&[("SITE_ID", "1_0")])).unwrap(), 10);
        assert_eq!(site_id_from_env(&env(&[("SITE_ID", "+1_000")])).unwrap(), 1000);
        for raw in ["_1", "1_", "1__0", "-_1", "_"] {
            let err = site_id_from_env(&env(&[("SITE_ID", raw)])).unwrap_err();
            assert!(matches!(err, SeedError::InvalidSiteId { .. }), "accepted {raw:?}");
        }
    }

    #[test]
    fn credential_requires_both_values() {
        let google = PROVIDERS[0];
        assert!(google.credential(&env(&[])).is_none());
        assert!(google.credential(&env(&[("GOOGLE_CLIENT_ID", "cid")])).is_none());
        assert!(
            google
                .credential(&env(&[("GOOGLE_CLIENT_ID", "cid"), ("GOOGLE_CLIENT_SECRET", "   ")]))
                .is_none()
        );
    }

    #[test]
    fn credential_values_are_trimmed() {
        let facebook = PROVIDERS[1];
        let cred = facebook
            .credential(&env(&[("FACEBOOK_APP_ID", " 1234 "), ("FACEBOOK_APP_SECRET", "s3cret\n")]))
            .unwrap();
        assert_eq!(cred.provider, "facebook");
        assert_eq!(cred.name, "Facebook");
        assert_eq!(cred.client_id.as_str(), "1234");
        assert_eq!(cred.secret.secret(), "s3cret");
        assert!(!format!("{cred:?}").contains("s3cret"));
    }

    #[test]
    fn providers_are_ordered() {
        let keys: Vec<_> = PROVIDERS.iter().map(|p| p.provider).collect();
        assert_eq!(keys, ["google", "facebook"]);
    }
}

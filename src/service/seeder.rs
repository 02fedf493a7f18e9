use crate::db::models::{AppField, DbSite, DbSocialApp, FieldChange, NewSocialApp};
use crate::db::sqlite::SocialAppStorage;
use crate::error::SeedError;
use crate::notice::{Notice, NoticeSink, trace_notice};
use crate::providers::{EnvSource, PROVIDERS, ProviderCredential, ProviderSpec, site_id_from_env};
use serde::Serialize;
use subtle::ConstantTimeEq;
use tracing::debug;

/// What happened to one provider's app row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SeedAction {
    /// Credentials missing from the environment; store untouched.
    Skipped,
    Created,
    Updated { fields: Vec<AppField> },
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderOutcome {
    pub provider: &'static str,
    #[serde(flatten)]
    pub action: SeedAction,
    /// True when this run added the target site to the app.
    pub site_linked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub site_id: i64,
    pub outcomes: Vec<ProviderOutcome>,
}

impl SeedReport {
    pub fn outcome(&self, provider: &str) -> Option<&ProviderOutcome> {
        self.outcomes.iter().find(|o| o.provider == provider)
    }
}

/// Upserts one SocialApp per configured provider and links each to the target site.
pub struct CredentialSeeder<'a> {
    storage: &'a SocialAppStorage,
    providers: &'a [ProviderSpec],
}

impl<'a> CredentialSeeder<'a> {
    pub fn new(storage: &'a SocialAppStorage) -> Self {
        Self {
            storage,
            providers: PROVIDERS,
        }
    }

    pub fn with_providers(storage: &'a SocialAppStorage, providers: &'a [ProviderSpec]) -> Self {
        Self { storage, providers }
    }

    /// Resolve the site, then process every provider in order.
    ///
    /// Site validation failures abort before any provider is touched. Provider steps are
    /// independent: an error on a later provider leaves earlier writes in place.
    pub async fn run<E, S>(&self, env: &E, sink: &mut S) -> Result<SeedReport, SeedError>
    where
        E: EnvSource + ?Sized,
        S: NoticeSink + ?Sized,
    {
        let site = self.resolve_site(env).await?;
        debug!(site_id = site.id, domain = %site.domain, "target site resolved");

        let mut outcomes = Vec::with_capacity(self.providers.len());
        for spec in self.providers {
            let outcome = match spec.credential(env) {
                Some(cred) => self.seed_provider(&cred, &site, sink).await?,
                None => {
                    notify(
                        sink,
                        Notice::warning(format!(
                            "Skipping {} (missing env credentials)",
                            spec.provider
                        )),
                    );
                    ProviderOutcome {
                        provider: spec.provider,
                        action: SeedAction::Skipped,
                        site_linked: false,
                    }
                }
            };
            outcomes.push(outcome);
        }

        Ok(SeedReport {
            site_id: site.id,
            outcomes,
        })
    }

    async fn resolve_site<E: EnvSource + ?Sized>(&self, env: &E) -> Result<DbSite, SeedError> {
        let site_id = site_id_from_env(env)?;
        self.storage
            .get_site(site_id)
            .await?
            .ok_or(SeedError::SiteNotFound { id: site_id })
    }

    async fn seed_provider<S: NoticeSink + ?Sized>(
        &self,
        cred: &ProviderCredential,
        site: &DbSite,
        sink: &mut S,
    ) -> Result<ProviderOutcome, SeedError> {
        let provider = cred.provider;
        let (app, created) = self.storage.get_or_create(&NewSocialApp::from(cred)).await?;

        let action = if created {
            notify(sink, Notice::success(format!("Created {provider} SocialApp")));
            SeedAction::Created
        } else {
            let changes = diff_fields(&app, cred);
            if changes.is_empty() {
                notify(sink, Notice::info(format!("No changes for {provider}")));
                SeedAction::Unchanged
            } else {
                debug!(provider, changes = ?changes, "updating SocialApp");
                self.storage.update_fields(app.id, &changes).await?;
                notify(sink, Notice::success(format!("Updated {provider} SocialApp")));
                SeedAction::Updated {
                    fields: changes.iter().map(|c| c.field).collect(),
                }
            }
        };

        let site_linked = if self.storage.is_linked(app.id, site.id).await? {
            false
        } else {
            self.storage.link_site(app.id, site.id).await?;
            notify(
                sink,
                Notice::success(format!("Linked site {} to {provider}", site.id)),
            );
            true
        };

        Ok(ProviderOutcome {
            provider,
            action,
            site_linked,
        })
    }
}

/// Managed columns whose stored value differs from the supplied credential.
fn diff_fields(app: &DbSocialApp, cred: &ProviderCredential) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    if app.name != cred.name {
        changes.push(FieldChange {
            field: AppField::Name,
            value: cred.name.to_string(),
        });
    }
    if app.client_id != cred.client_id.as_str() {
        changes.push(FieldChange {
            field: AppField::ClientId,
            value: cred.client_id.as_str().to_string(),
        });
    }
    let secret = cred.secret.secret();
    if !bool::from(app.secret.as_bytes().ct_eq(secret.as_bytes())) {
        changes.push(FieldChange {
            field: AppField::Secret,
            value: secret.to_string(),
        });
    }
    changes
}

fn notify<S: NoticeSink + ?Sized>(sink: &mut S, notice: Notice) {
    trace_notice(&notice);
    sink.emit(notice);
}

use crate::db::models::{DbSite, DbSocialApp, FieldChange, NewSocialApp};
use crate::db::schema::SQLITE_INIT;
use crate::error::SeedError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, QueryBuilder, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct SocialAppStorage {
    pool: SqlitePool,
}

impl SocialAppStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open an existing store. A missing database file is a connection error, not a new store.
    pub async fn connect(database_url: &str) -> Result<Self, SeedError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_opts)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), SeedError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn get_site(&self, id: i64) -> Result<Option<DbSite>, SeedError> {
        let site = sqlx::query_as::<_, DbSite>(
            "SELECT id, domain, name FROM django_site WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(site)
    }

    /// Look up the app for `provider`, which this tool treats as a unique key.
    pub async fn find_by_provider(&self, provider: &str) -> Result<Option<DbSocialApp>, SeedError> {
        let mut rows = sqlx::query_as::<_, DbSocialApp>(
            r#"SELECT id, provider, name, client_id, secret
               FROM socialaccount_socialapp WHERE provider = ? ORDER BY id LIMIT 2"#,
        )
        .bind(provider)
        .fetch_all(&self.pool)
        .await?;

        if rows.len() > 1 {
            return Err(SeedError::AmbiguousProvider {
                provider: provider.to_string(),
            });
        }
        Ok(rows.pop())
    }

    /// Insert a new app. Unmanaged NOT NULL columns get the same empty values the ORM would write.
    pub async fn create(&self, app: &NewSocialApp) -> Result<DbSocialApp, SeedError> {
        let settings = serde_json::json!({}).to_string();
        let id = sqlx::query(
            r#"
            INSERT INTO socialaccount_socialapp (
                provider, name, client_id, secret, "key", provider_id, settings
            ) VALUES (?, ?, ?, ?, '', '', ?)
            "#,
        )
        .bind(&app.provider)
        .bind(&app.name)
        .bind(&app.client_id)
        .bind(&app.secret)
        .bind(settings)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(DbSocialApp {
            id,
            provider: app.provider.clone(),
            name: app.name.clone(),
            client_id: app.client_id.clone(),
            secret: app.secret.clone(),
        })
    }

    /// Returns the app for `app.provider`, creating it when absent. The flag is true on create.
    pub async fn get_or_create(&self, app: &NewSocialApp) -> Result<(DbSocialApp, bool), SeedError> {
        match self.find_by_provider(&app.provider).await? {
            Some(existing) => Ok((existing, false)),
            None => Ok((self.create(app).await?, true)),
        }
    }

    /// Write only the listed columns of one app. No-op for an empty list.
    pub async fn update_fields(&self, id: i64, changes: &[FieldChange]) -> Result<(), SeedError> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE socialaccount_socialapp SET ");
        let mut set = qb.separated(", ");
        for change in changes {
            set.push(format!("{} = ", change.field.column()));
            set.push_bind_unseparated(change.value.clone());
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.build().execute(&self.pool).await?;
        Ok(())
    }

    pub async fn site_ids(&self, app_id: i64) -> Result<Vec<i64>, SeedError> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT site_id FROM socialaccount_socialapp_sites WHERE socialapp_id = ? ORDER BY site_id",
        )
        .bind(app_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    pub async fn is_linked(&self, app_id: i64, site_id: i64) -> Result<bool, SeedError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT 1 FROM socialaccount_socialapp_sites WHERE socialapp_id = ? AND site_id = ?",
        )
        .bind(app_id)
        .bind(site_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    pub async fn link_site(&self, app_id: i64, site_id: i64) -> Result<(), SeedError> {
        sqlx::query(
            r#"INSERT INTO socialaccount_socialapp_sites (socialapp_id, site_id) VALUES (?, ?)
               ON CONFLICT (socialapp_id, site_id) DO NOTHING"#,
        )
        .bind(app_id)
        .bind(site_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

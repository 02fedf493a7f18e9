//! SQL DDL for the tables owned by django's sites framework and django-allauth.
//! Mirrors what their migrations produce on SQLite, restricted to the columns read or written here.

/// SQLite schema with:
/// - `django_site`: the sites framework table, never written by the seeder
/// - `socialaccount_socialapp`: one OAuth client per row; `key`, `provider_id`, `settings` are
///   NOT NULL without DB defaults, the same as the ORM-managed table
/// - `socialaccount_socialapp_sites`: the many-to-many join, unique per (app, site)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS django_site (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    domain VARCHAR(100) NOT NULL UNIQUE,
    name VARCHAR(50) NOT NULL
);

CREATE TABLE IF NOT EXISTS socialaccount_socialapp (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    provider VARCHAR(30) NOT NULL,
    name VARCHAR(40) NOT NULL,
    client_id VARCHAR(191) NOT NULL,
    secret VARCHAR(191) NOT NULL,
    "key" VARCHAR(191) NOT NULL,
    provider_id VARCHAR(200) NOT NULL,
    settings TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS socialaccount_socialapp_sites (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    socialapp_id INTEGER NOT NULL REFERENCES socialaccount_socialapp (id) DEFERRABLE INITIALLY DEFERRED,
    site_id INTEGER NOT NULL REFERENCES django_site (id) DEFERRABLE INITIALLY DEFERRED
);

CREATE UNIQUE INDEX IF NOT EXISTS socialaccount_socialapp_sites_socialapp_id_site_id_uniq
    ON socialaccount_socialapp_sites (socialapp_id, site_id);
"#;

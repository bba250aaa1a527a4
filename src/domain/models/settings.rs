//! Typed startup settings for the haishop service.
//!
//! [`Settings`] is the immutable product of the loader: constructed once
//! at process startup, then passed by reference to the components that
//! need it. Nothing here mutates after construction and nothing reads
//! the process environment; that separation keeps tests free of global
//! state.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use url::Url;

use super::environment::Environment;

/// Replacement token used wherever a secret value would otherwise be
/// printed or serialized.
pub const REDACTED: &str = "[redacted]";

/// The secret key shipped in the example environment file. Production
/// deployments must replace it; the loader rejects it there.
pub const PLACEHOLDER_SECRET_KEY: &str =
    "django-insecure-v%%g938(07j#*8y^l&gaw^d%_a$e#lqb$m0$1q^==2zy1(c2!8";

/// Prefix of framework-generated development keys, equally rejected in
/// production.
pub const PLACEHOLDER_SECRET_PREFIX: &str = "django-insecure-";

/// Documented defaults, kept as raw variable values so absent keys flow
/// through the exact same coercion and validation as explicit ones.
pub mod defaults {
    /// `DB_ENGINE` default, the backend the original deployment used.
    pub const DB_ENGINE: &str = "django.db.backends.mysql";
    /// `DB_NAME` default.
    pub const DB_NAME: &str = "haishop";
    /// `DB_USER` default.
    pub const DB_USER: &str = "root";
    /// `DB_PASSWORD` default (development only; production sets its own).
    pub const DB_PASSWORD: &str = "123456";
    /// `DB_HOST` default.
    pub const DB_HOST: &str = "127.0.0.1";
    /// `DB_PORT` default.
    pub const DB_PORT: &str = "3306";
    /// `REDIS_URL` default.
    pub const REDIS_URL: &str = "redis://localhost:6379/1";
    /// `REDIS_MAX_CONNECTIONS` default.
    pub const REDIS_MAX_CONNECTIONS: &str = "100";
    /// `REDIS_KEY_PREFIX` default.
    pub const REDIS_KEY_PREFIX: &str = "haishop";
    /// `LANGUAGE_CODE` default.
    pub const LANGUAGE_CODE: &str = "zh-hans";
    /// `TIME_ZONE` default.
    pub const TIME_ZONE: &str = "Asia/Shanghai";
    /// `PRODUCT_IMAGE_PATH` default.
    pub const PRODUCT_IMAGE_PATH: &str = "media/products/";
    /// `PRODUCT_CACHE_TIMEOUT` default, in seconds.
    pub const PRODUCT_CACHE_TIMEOUT: &str = "3600";
    /// `RELATED_PRODUCTS_LIMIT` default.
    pub const RELATED_PRODUCTS_LIMIT: &str = "5";
    /// `ALLOWED_HOSTS` default, applied only while debug is on.
    pub const ALLOWED_HOSTS_DEBUG: &str = "localhost,127.0.0.1";
}

/// Persistent-connection lifetime applied outside development, seconds.
pub const HARDENED_CONN_MAX_AGE_SECS: u64 = 60;

/// Cache socket timeout applied outside development, seconds.
pub const HARDENED_SOCKET_TIMEOUT_SECS: u64 = 5;

/// Default cache entry TTL applied outside development, seconds.
pub const HARDENED_CACHE_TTL_SECS: u64 = 300;

/// The complete, validated configuration of a haishop process.
///
/// Loaded once by [`SettingsLoader`](crate::SettingsLoader) before any
/// request serving begins, then shared read-only. Two loads from the
/// same environment snapshot compare equal.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Deployment environment, from `DJANGO_ENV` (required).
    pub environment: Environment,

    /// Debug mode, from `DEBUG`. Defaults to on only in development.
    pub debug: bool,

    /// Signing secret, from `SECRET_KEY` (required, never a placeholder
    /// in production). Redacted from `Debug` and serialized output.
    pub secret_key: String,

    /// Hosts the service may be addressed as, from the comma-separated
    /// `ALLOWED_HOSTS`. Required whenever debug is off.
    pub allowed_hosts: Vec<String>,

    /// Database connection parameters.
    pub database: DatabaseSettings,

    /// Cache connection parameters.
    pub cache: CacheSettings,

    /// Locale and time zone.
    pub locale: LocaleSettings,

    /// Product catalog limits.
    pub products: ProductSettings,
}

impl Settings {
    /// Whether this process runs with the production profile.
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    /// A copy with every secret already replaced with [`REDACTED`],
    /// for output paths that read the fields directly.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.secret_key = REDACTED.to_string();
        if !copy.database.password.is_empty() {
            copy.database.password = REDACTED.to_string();
        }
        copy.cache.password = copy.cache.password.as_deref().map(|_| REDACTED.to_string());
        copy.cache.url = copy.cache.safe_url();
        copy
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("environment", &self.environment)
            .field("debug", &self.debug)
            .field("secret_key", &REDACTED)
            .field("allowed_hosts", &self.allowed_hosts)
            .field("database", &self.database)
            .field("cache", &self.cache)
            .field("locale", &self.locale)
            .field("products", &self.products)
            .finish()
    }
}

// Serialization carries the same redactions as `Debug`, so an emitted
// `Settings` never holds clear-text secrets. `Deserialize` stays
// derived and reads back exactly what was emitted.
impl Serialize for Settings {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Settings", 8)?;
        state.serialize_field("environment", &self.environment)?;
        state.serialize_field("debug", &self.debug)?;
        state.serialize_field("secret_key", REDACTED)?;
        state.serialize_field("allowed_hosts", &self.allowed_hosts)?;
        state.serialize_field("database", &self.database)?;
        state.serialize_field("cache", &self.cache)?;
        state.serialize_field("locale", &self.locale)?;
        state.serialize_field("products", &self.products)?;
        state.end()
    }
}

/// Recognized database backends, from `DB_ENGINE`.
///
/// Accepts the original deployment's full backend paths
/// (`django.db.backends.mysql`) as well as bare engine names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    /// MySQL / MariaDB.
    Mysql,
    /// PostgreSQL.
    Postgresql,
    /// SQLite, file-backed.
    Sqlite3,
    /// Oracle.
    Oracle,
}

/// Raised when `DB_ENGINE` names a backend outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized database engine {0:?} (expected one of: mysql, postgresql, sqlite3, oracle)")]
pub struct UnknownEngine(pub String);

impl DatabaseEngine {
    /// The short engine token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Postgresql => "postgresql",
            Self::Sqlite3 => "sqlite3",
            Self::Oracle => "oracle",
        }
    }

    /// The full backend path the original deployment configured.
    pub fn backend_path(self) -> &'static str {
        match self {
            Self::Mysql => "django.db.backends.mysql",
            Self::Postgresql => "django.db.backends.postgresql",
            Self::Sqlite3 => "django.db.backends.sqlite3",
            Self::Oracle => "django.db.backends.oracle",
        }
    }
}

impl FromStr for DatabaseEngine {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let short = token.strip_prefix("django.db.backends.").unwrap_or(token);
        match short.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::Mysql),
            "postgresql" | "postgres" => Ok(Self::Postgresql),
            "sqlite3" | "sqlite" => Ok(Self::Sqlite3),
            "oracle" => Ok(Self::Oracle),
            _ => Err(UnknownEngine(s.to_string())),
        }
    }
}

impl fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database connection parameters, from the `DB_*` variables.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseSettings {
    /// Backend engine, from `DB_ENGINE`.
    pub engine: DatabaseEngine,

    /// Database name, from `DB_NAME`. Must be non-empty.
    pub name: String,

    /// Connection user, from `DB_USER`.
    pub user: String,

    /// Connection password, from `DB_PASSWORD`. May be empty; redacted
    /// from `Debug` and serialized output when it is not.
    pub password: String,

    /// Server host, from `DB_HOST`. Must be non-empty.
    pub host: String,

    /// Server port, from `DB_PORT`. Must be non-zero.
    pub port: u16,

    /// How long a connection may be reused, in seconds. Zero means a
    /// fresh connection per unit of work; hardened environments keep
    /// connections alive for [`HARDENED_CONN_MAX_AGE_SECS`].
    pub conn_max_age_secs: u64,
}

impl DatabaseSettings {
    /// The single `host:port` endpoint these parameters describe.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection reuse lifetime as a [`Duration`].
    pub fn conn_max_age(&self) -> Duration {
        Duration::from_secs(self.conn_max_age_secs)
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { REDACTED };
        f.debug_struct("DatabaseSettings")
            .field("engine", &self.engine)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &password)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("conn_max_age_secs", &self.conn_max_age_secs)
            .finish()
    }
}

impl Serialize for DatabaseSettings {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let password = if self.password.is_empty() { "" } else { REDACTED };
        let mut state = serializer.serialize_struct("DatabaseSettings", 7)?;
        state.serialize_field("engine", &self.engine)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("user", &self.user)?;
        state.serialize_field("password", password)?;
        state.serialize_field("host", &self.host)?;
        state.serialize_field("port", &self.port)?;
        state.serialize_field("conn_max_age_secs", &self.conn_max_age_secs)?;
        state.end()
    }
}

/// Cache connection parameters, from the `REDIS_*` variables.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CacheSettings {
    /// Connection URI, from `REDIS_URL`. Scheme must be `redis`,
    /// `rediss` or `unix`. Serialized through [`Self::safe_url`].
    pub url: Url,

    /// Server password, from `REDIS_PASSWORD`. Absent or empty means
    /// no authentication. Redacted from `Debug` and serialized output.
    pub password: Option<String>,

    /// Connection pool ceiling, from `REDIS_MAX_CONNECTIONS` (> 0).
    pub max_connections: u32,

    /// Key namespace prefix, from `REDIS_KEY_PREFIX` (non-empty).
    pub key_prefix: String,

    /// Socket timeout, seconds. Unset in development, set to
    /// [`HARDENED_SOCKET_TIMEOUT_SECS`] elsewhere.
    pub socket_timeout_secs: Option<u64>,

    /// Default entry TTL, seconds. Unset in development, set to
    /// [`HARDENED_CACHE_TTL_SECS`] elsewhere.
    pub default_ttl_secs: Option<u64>,

    /// Whether cached payloads are compressed. On outside development.
    pub compression: bool,
}

impl CacheSettings {
    /// The URI to actually dial: `REDIS_PASSWORD` is merged into the
    /// URI when the URI itself carries no password. Unix-socket URIs
    /// have no authority section and are returned untouched.
    pub fn connection_url(&self) -> Url {
        let mut url = self.url.clone();
        let inline_password = url.password().is_some();
        match self.password.as_deref() {
            Some(password) if !inline_password => {
                let _ = url.set_password(Some(password));
            }
            _ => {}
        }
        url
    }

    /// Socket timeout as a [`Duration`], when the profile sets one.
    pub fn socket_timeout(&self) -> Option<Duration> {
        self.socket_timeout_secs.map(Duration::from_secs)
    }

    /// Default entry TTL as a [`Duration`], when the profile sets one.
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl_secs.map(Duration::from_secs)
    }

    /// The URI with any inline password masked, for display.
    pub fn safe_url(&self) -> Url {
        let mut url = self.url.clone();
        if url.password().is_some() {
            let _ = url.set_password(Some("redacted"));
        }
        url
    }
}

impl fmt::Debug for CacheSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = self.password.as_deref().map(|_| REDACTED);
        f.debug_struct("CacheSettings")
            .field("url", &self.safe_url().as_str())
            .field("password", &password)
            .field("max_connections", &self.max_connections)
            .field("key_prefix", &self.key_prefix)
            .field("socket_timeout_secs", &self.socket_timeout_secs)
            .field("default_ttl_secs", &self.default_ttl_secs)
            .field("compression", &self.compression)
            .finish()
    }
}

impl Serialize for CacheSettings {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let password = self.password.as_deref().map(|_| REDACTED);
        let mut state = serializer.serialize_struct("CacheSettings", 7)?;
        state.serialize_field("url", &self.safe_url())?;
        state.serialize_field("password", &password)?;
        state.serialize_field("max_connections", &self.max_connections)?;
        state.serialize_field("key_prefix", &self.key_prefix)?;
        state.serialize_field("socket_timeout_secs", &self.socket_timeout_secs)?;
        state.serialize_field("default_ttl_secs", &self.default_ttl_secs)?;
        state.serialize_field("compression", &self.compression)?;
        state.end()
    }
}

/// Locale and time zone, from `LANGUAGE_CODE` and `TIME_ZONE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleSettings {
    /// Normalized language tag, validated against the recognized
    /// catalog (`zh-hans` by default).
    pub language_code: String,

    /// IANA time zone (`Asia/Shanghai` by default).
    pub time_zone: Tz,
}

/// Product catalog limits, from the `PRODUCT_*` variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSettings {
    /// Image directory relative to the media root, from
    /// `PRODUCT_IMAGE_PATH`. Never absolute, never escaping the root.
    pub image_path: PathBuf,

    /// Catalog cache lifetime in seconds, from `PRODUCT_CACHE_TIMEOUT`
    /// (> 0).
    pub cache_timeout_secs: u64,

    /// Upper bound on related products returned per query, from
    /// `RELATED_PRODUCTS_LIMIT` (> 0).
    pub related_limit: u32,

    /// Whether draft products appear in catalog responses. On only in
    /// development.
    pub show_drafts: bool,
}

impl ProductSettings {
    /// Lowest accepted product rating.
    pub const RATING_MIN: u8 = 1;
    /// Highest accepted product rating.
    pub const RATING_MAX: u8 = 10;
    /// Hard ceiling on search results per page.
    pub const SEARCH_RESULT_LIMIT: usize = 50;
    /// Hard ceiling on facet values per search response.
    pub const SEARCH_FACET_LIMIT: usize = 10;

    /// Catalog cache lifetime as a [`Duration`].
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_timeout_secs)
    }

    /// Resolves the image directory under a media root.
    pub fn image_dir_under(&self, media_root: &Path) -> PathBuf {
        media_root.join(&self.image_path)
    }
}

//! Single-pass settings loading with aggregated violations.

use std::path::{Component, PathBuf};

use chrono_tz::Tz;
use tracing::debug;
use url::Url;

use crate::domain::errors::{ConfigError, ConfigReport, LoadResult};
use crate::domain::models::environment::Environment;
use crate::domain::models::locales;
use crate::domain::models::settings::{
    defaults, CacheSettings, DatabaseEngine, DatabaseSettings, LocaleSettings, ProductSettings,
    Settings, HARDENED_CACHE_TTL_SECS, HARDENED_CONN_MAX_AGE_SECS, HARDENED_SOCKET_TIMEOUT_SECS,
    PLACEHOLDER_SECRET_KEY, PLACEHOLDER_SECRET_PREFIX, REDACTED,
};

use super::coerce::{parse_bool, parse_port, parse_positive_u32, parse_positive_u64, split_list};
use super::source::EnvSource;

const REASON_ENV: &str = "expected one of: development, staging, production";
const REASON_ENGINE: &str = "expected one of: mysql, postgresql, sqlite3, oracle";
const REASON_URL: &str = "expected a URL (redis://, rediss:// or unix://)";

/// Loads [`Settings`] from an environment snapshot.
///
/// Precedence (highest to lowest):
/// 1. Process environment variables
/// 2. The conventional `./.env` file, when present
/// 3. Documented defaults
///
/// A load walks every variable exactly once and reports every
/// violation it finds; it never stops at the first bad value. The
/// violations appear in a fixed key order with cross-field checks
/// last, so the same snapshot always yields the same report.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Loads from the process environment plus `./.env`.
    pub fn load() -> LoadResult<Settings> {
        let source = EnvSource::from_process().with_default_env_file();
        Self::load_from(&source)
    }

    /// Loads from an explicit snapshot. Deterministic for its input:
    /// the same snapshot produces the same settings or the same
    /// report, however many times it is loaded.
    pub fn load_from(source: &EnvSource) -> LoadResult<Settings> {
        let mut reader = Reader::new(source);
        let settings = Self::read(&mut reader);
        match settings {
            Some(settings) if reader.errors.is_empty() => {
                debug!(
                    environment = %settings.environment,
                    debug = settings.debug,
                    "settings loaded"
                );
                Ok(settings)
            }
            _ => Err(ConfigReport::new(reader.errors)),
        }
    }

    // Every field is read before the first `?`, so one pass records
    // every violation even though assembly short-circuits.
    fn read(reader: &mut Reader) -> Option<Settings> {
        let environment = reader.environment();
        // Profile defaults fall back to development while DJANGO_ENV
        // itself is in error, so one bad value does not cascade.
        let profile = environment.unwrap_or(Environment::Development);

        let debug = reader.bool_or("DEBUG", profile.debug_default());
        let secret_key = reader.secret_key();
        let allowed_hosts = reader.hosts(debug);

        let engine = reader.engine();
        let db_name = reader.non_empty_or("DB_NAME", defaults::DB_NAME);
        let db_user = reader.trimmed_or("DB_USER", defaults::DB_USER);
        let db_password = reader.verbatim_or("DB_PASSWORD", defaults::DB_PASSWORD);
        let db_host = reader.non_empty_or("DB_HOST", defaults::DB_HOST);
        let db_port = reader.port_or("DB_PORT", defaults::DB_PORT);

        let redis_url = reader.redis_url();
        let redis_password = reader.optional_secret("REDIS_PASSWORD");
        let redis_max_connections =
            reader.positive_u32_or("REDIS_MAX_CONNECTIONS", defaults::REDIS_MAX_CONNECTIONS);
        let redis_key_prefix = reader.non_empty_or("REDIS_KEY_PREFIX", defaults::REDIS_KEY_PREFIX);

        let language_code = reader.language_code();
        let time_zone = reader.time_zone();

        let image_path = reader.image_path();
        let product_cache_timeout =
            reader.positive_u64_or("PRODUCT_CACHE_TIMEOUT", defaults::PRODUCT_CACHE_TIMEOUT);
        let related_limit =
            reader.positive_u32_or("RELATED_PRODUCTS_LIMIT", defaults::RELATED_PRODUCTS_LIMIT);

        if let (Some(Environment::Production), Some(secret)) = (environment, secret_key.as_deref())
        {
            if secret == PLACEHOLDER_SECRET_KEY {
                reader.invalid(
                    "SECRET_KEY",
                    REDACTED,
                    "the placeholder secret key must be replaced in production",
                );
            } else if secret.starts_with(PLACEHOLDER_SECRET_PREFIX) {
                reader.invalid(
                    "SECRET_KEY",
                    REDACTED,
                    "development keys (django-insecure-*) are not allowed in production",
                );
            }
        }

        let hardened = !profile.is_development();

        Some(Settings {
            environment: environment?,
            debug: debug?,
            secret_key: secret_key?,
            allowed_hosts: allowed_hosts?,
            database: DatabaseSettings {
                engine: engine?,
                name: db_name?,
                user: db_user,
                password: db_password,
                host: db_host?,
                port: db_port?,
                conn_max_age_secs: if hardened { HARDENED_CONN_MAX_AGE_SECS } else { 0 },
            },
            cache: CacheSettings {
                url: redis_url?,
                password: redis_password,
                max_connections: redis_max_connections?,
                key_prefix: redis_key_prefix?,
                socket_timeout_secs: hardened.then_some(HARDENED_SOCKET_TIMEOUT_SECS),
                default_ttl_secs: hardened.then_some(HARDENED_CACHE_TTL_SECS),
                compression: hardened,
            },
            locale: LocaleSettings {
                language_code: language_code?,
                time_zone: time_zone?,
            },
            products: ProductSettings {
                image_path: image_path?,
                cache_timeout_secs: product_cache_timeout?,
                related_limit: related_limit?,
                show_drafts: profile.show_drafts_default(),
            },
        })
    }
}

/// Walks one snapshot, collecting violations instead of stopping.
///
/// Invariant: every method that returns `None` has already pushed at
/// least one error.
struct Reader<'a> {
    source: &'a EnvSource,
    errors: Vec<ConfigError>,
}

impl<'a> Reader<'a> {
    fn new(source: &'a EnvSource) -> Self {
        Self {
            source,
            errors: Vec::new(),
        }
    }

    fn raw(&self, key: &str) -> Option<&'a str> {
        self.source.get(key)
    }

    fn missing(&mut self, key: &'static str) {
        self.errors.push(ConfigError::MissingRequiredConfig { key });
    }

    fn invalid(&mut self, key: &'static str, raw: impl Into<String>, reason: impl Into<String>) {
        self.errors.push(ConfigError::InvalidConfigValue {
            key,
            raw: raw.into(),
            reason: reason.into(),
        });
    }

    fn required(&mut self, key: &'static str) -> Option<&'a str> {
        let raw = self.raw(key);
        if raw.is_none() {
            self.missing(key);
        }
        raw
    }

    /// Coerces the value of `key`, or its raw default when absent.
    /// Defaults always pass their own coercion.
    fn coerced<T>(
        &mut self,
        key: &'static str,
        default: &str,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        let raw = self.raw(key).unwrap_or(default);
        match parse(raw) {
            Ok(value) => Some(value),
            Err(reason) => {
                self.invalid(key, raw, reason);
                None
            }
        }
    }

    fn environment(&mut self) -> Option<Environment> {
        let raw = self.required("DJANGO_ENV")?;
        match raw.parse::<Environment>() {
            Ok(environment) => Some(environment),
            Err(_) => {
                self.invalid("DJANGO_ENV", raw, REASON_ENV);
                None
            }
        }
    }

    fn secret_key(&mut self) -> Option<String> {
        let raw = self.required("SECRET_KEY")?;
        if raw.trim().is_empty() {
            self.invalid("SECRET_KEY", REDACTED, "must not be empty");
            return None;
        }
        Some(raw.to_string())
    }

    fn bool_or(&mut self, key: &'static str, default: bool) -> Option<bool> {
        match self.raw(key) {
            Some(raw) => match parse_bool(raw) {
                Ok(value) => Some(value),
                Err(reason) => {
                    self.invalid(key, raw, reason);
                    None
                }
            },
            None => Some(default),
        }
    }

    /// `ALLOWED_HOSTS` is only required while debug is off. While
    /// `DEBUG` itself is in error the requirement is skipped, so its
    /// violation is reported once, not twice.
    fn hosts(&mut self, debug: Option<bool>) -> Option<Vec<String>> {
        let required = debug == Some(false);
        match self.raw("ALLOWED_HOSTS") {
            Some(raw) => {
                let hosts = split_list(raw);
                if required && hosts.is_empty() {
                    self.invalid(
                        "ALLOWED_HOSTS",
                        raw,
                        "must list at least one host when debug is off",
                    );
                    return None;
                }
                Some(hosts)
            }
            None if required => {
                self.missing("ALLOWED_HOSTS");
                None
            }
            None => Some(split_list(defaults::ALLOWED_HOSTS_DEBUG)),
        }
    }

    fn engine(&mut self) -> Option<DatabaseEngine> {
        self.coerced("DB_ENGINE", defaults::DB_ENGINE, |raw| {
            raw.parse::<DatabaseEngine>()
                .map_err(|_| REASON_ENGINE.to_string())
        })
    }

    fn non_empty_or(&mut self, key: &'static str, default: &str) -> Option<String> {
        self.coerced(key, default, |raw| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err("must not be empty".to_string())
            } else {
                Ok(trimmed.to_string())
            }
        })
    }

    fn trimmed_or(&mut self, key: &str, default: &str) -> String {
        self.raw(key).unwrap_or(default).trim().to_string()
    }

    fn verbatim_or(&mut self, key: &str, default: &str) -> String {
        self.raw(key).unwrap_or(default).to_string()
    }

    fn optional_secret(&mut self, key: &str) -> Option<String> {
        self.raw(key)
            .filter(|raw| !raw.is_empty())
            .map(str::to_string)
    }

    fn port_or(&mut self, key: &'static str, default: &str) -> Option<u16> {
        self.coerced(key, default, parse_port)
    }

    fn positive_u32_or(&mut self, key: &'static str, default: &str) -> Option<u32> {
        self.coerced(key, default, parse_positive_u32)
    }

    fn positive_u64_or(&mut self, key: &'static str, default: &str) -> Option<u64> {
        self.coerced(key, default, parse_positive_u64)
    }

    /// `REDIS_URL` may carry `user:password@` userinfo, so its
    /// violations never echo the value verbatim: a parsed URL is
    /// reported with the userinfo masked, an unparsable one that could
    /// hold credentials is reported as [`REDACTED`].
    fn redis_url(&mut self) -> Option<Url> {
        let raw = self.raw("REDIS_URL").unwrap_or(defaults::REDIS_URL);
        let url = match Url::parse(raw.trim()) {
            Ok(url) => url,
            Err(_) => {
                let shown = if raw.contains('@') { REDACTED } else { raw };
                self.invalid("REDIS_URL", shown, REASON_URL);
                return None;
            }
        };
        let rejection = match url.scheme() {
            "redis" | "rediss" if url.host_str().is_none() => Some("missing host".to_string()),
            "redis" | "rediss" | "unix" => None,
            other => Some(format!(
                "unsupported scheme {other:?} (expected redis, rediss or unix)"
            )),
        };
        match rejection {
            None => Some(url),
            Some(reason) => {
                let shown = masked_url(&url);
                self.invalid("REDIS_URL", shown, reason);
                None
            }
        }
    }

    fn language_code(&mut self) -> Option<String> {
        self.coerced("LANGUAGE_CODE", defaults::LANGUAGE_CODE, |raw| {
            let tag = locales::normalize(raw);
            if locales::is_recognized(&tag) {
                Ok(tag)
            } else {
                Err("unrecognized language tag".to_string())
            }
        })
    }

    fn time_zone(&mut self) -> Option<Tz> {
        self.coerced("TIME_ZONE", defaults::TIME_ZONE, |raw| {
            raw.trim()
                .parse::<Tz>()
                .map_err(|_| "unrecognized IANA time zone".to_string())
        })
    }

    fn image_path(&mut self) -> Option<PathBuf> {
        self.coerced("PRODUCT_IMAGE_PATH", defaults::PRODUCT_IMAGE_PATH, |raw| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err("must not be empty".to_string());
            }
            let path = PathBuf::from(trimmed);
            if path.is_absolute() {
                return Err("must be relative to the media root".to_string());
            }
            if path
                .components()
                .any(|component| matches!(component, Component::ParentDir))
            {
                return Err("must stay inside the media root".to_string());
            }
            Ok(path)
        })
    }
}

/// Renders a URL for a diagnostic with its userinfo masked, the same
/// way [`CacheSettings::safe_url`] masks it for display.
fn masked_url(url: &Url) -> String {
    let mut masked = url.clone();
    if !masked.username().is_empty() {
        let _ = masked.set_username("redacted");
    }
    if masked.password().is_some() {
        let _ = masked.set_password(Some("redacted"));
    }
    masked.to_string()
}

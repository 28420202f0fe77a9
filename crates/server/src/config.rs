use shared_types::{AppConfig, FeatureFlags};
use std::sync::OnceLock;

static FLAGS: OnceLock<FeatureFlags> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Read `config.toml`, parse feature flags, and store them in the global
/// `OnceLock`. Only the first call has effect.
///
/// If the file is missing or unparseable, all flags default to `false`.
pub fn load_feature_flags() {
    FLAGS.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => parse_feature_flags(&contents),
        Err(e) => {
            eprintln!("[config] {CONFIG_PATH} not found ({e}), all integrations disabled");
            FeatureFlags::default()
        }
    });
}

fn parse_feature_flags(contents: &str) -> FeatureFlags {
    let config: AppConfig = toml::from_str(contents).unwrap_or_else(|e| {
        eprintln!("[config] Failed to parse {CONFIG_PATH}: {e}, all integrations disabled");
        AppConfig::default()
    });
    eprintln!("[config] Feature flags: {:?}", config.features);
    config.features
}

/// Get the loaded feature flags. Returns all-false defaults if
/// `load_feature_flags()` hasn't been called yet.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags {
        mailgun: false,
        s3: false,
        telemetry: false,
        rate_limit: false,
    };
    FLAGS.get().unwrap_or(&DEFAULT)
}

/// Which `Store` implementation backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

/// Runtime settings resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store: StoreKind,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    /// Account that is granted the admin role when it registers or logs in.
    pub admin_email: Option<String>,
    /// Inbox receiving new-application alerts.
    pub notify_admin_email: String,
    pub app_name: String,
    pub cookie_secure: bool,
    pub cookie_domain: Option<String>,
    /// Request body ceiling; uploads are checked against their own policy.
    pub max_upload_bytes: usize,
    pub mailgun_api_key: Option<String>,
    pub mailgun_domain: Option<String>,
    pub mailgun_from: Option<String>,
    pub mailgun_webhook_signing_key: Option<String>,
    pub rate_limit_max: u32,
    pub rate_limit_window_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreKind::Memory,
            database_url: None,
            database_max_connections: 10,
            bind_addr: "0.0.0.0:8080".to_string(),
            jwt_secret: String::new(),
            session_ttl_hours: 12,
            admin_email: None,
            notify_admin_email: "innovexarena@gmail.com".to_string(),
            app_name: "Innovex Arena".to_string(),
            cookie_secure: false,
            cookie_domain: None,
            max_upload_bytes: 6 * 1024 * 1024,
            mailgun_api_key: None,
            mailgun_domain: None,
            mailgun_from: None,
            mailgun_webhook_signing_key: None,
            rate_limit_max: 20,
            rate_limit_window_secs: 60,
        }
    }
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(name: &str) -> Result<Option<T>, String> {
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| format!("{name} has an invalid value: {raw}")),
        None => Ok(None),
    }
}

impl Settings {
    /// Resolve settings from the process environment (after loading `.env`).
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        let defaults = Settings::default();

        let database_url = var("DATABASE_URL");
        let store = match var("STORE").as_deref() {
            Some("memory") => StoreKind::Memory,
            Some("postgres") | None => StoreKind::Postgres,
            Some(other) => return Err(format!("STORE must be 'postgres' or 'memory', got '{other}'")),
        };
        if store == StoreKind::Postgres && database_url.is_none() {
            return Err("DATABASE_URL must be set (or STORE=memory)".to_string());
        }

        let jwt_secret = var("JWT_SECRET").ok_or_else(|| "JWT_SECRET must be set".to_string())?;

        Ok(Self {
            store,
            database_url,
            database_max_connections: parsed("DATABASE_MAX_CONNECTIONS")?
                .unwrap_or(defaults.database_max_connections),
            bind_addr: var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            jwt_secret,
            session_ttl_hours: parsed("SESSION_TTL_HOURS")?.unwrap_or(defaults.session_ttl_hours),
            admin_email: var("ADMIN_EMAIL"),
            notify_admin_email: var("NOTIFY_ADMIN_EMAIL").unwrap_or(defaults.notify_admin_email),
            app_name: var("APP_NAME").unwrap_or(defaults.app_name),
            cookie_secure: parsed("COOKIE_SECURE")?.unwrap_or(false),
            cookie_domain: var("COOKIE_DOMAIN"),
            max_upload_bytes: parsed("MAX_UPLOAD_BYTES")?.unwrap_or(defaults.max_upload_bytes),
            mailgun_api_key: var("MAILGUN_API_KEY"),
            mailgun_domain: var("MAILGUN_DOMAIN"),
            mailgun_from: var("MAILGUN_FROM"),
            mailgun_webhook_signing_key: var("MAILGUN_WEBHOOK_SIGNING_KEY"),
            rate_limit_max: parsed("RATE_LIMIT_MAX")?.unwrap_or(defaults.rate_limit_max),
            rate_limit_window_secs: parsed("RATE_LIMIT_WINDOW_SECS")?
                .unwrap_or(defaults.rate_limit_window_secs),
        })
    }

    /// True when `email` is the configured bootstrap admin (case-insensitive).
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_email
            .as_deref()
            .is_some_and(|admin| admin.trim().eq_ignore_ascii_case(email.trim()))
    }
}

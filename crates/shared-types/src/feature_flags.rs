use serde::{Deserialize, Serialize};

/// Optional integrations toggled from `config.toml`.
///
/// Every flag defaults to `false`, so a missing or partial config file
/// runs the site with email delivery logged instead of sent, uploads
/// disabled, no OTLP export and no rate limiting.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FeatureFlags {
    #[serde(default)]
    pub mailgun: bool,
    #[serde(default)]
    pub s3: bool,
    #[serde(default)]
    pub telemetry: bool,
    #[serde(default)]
    pub rate_limit: bool,
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
}

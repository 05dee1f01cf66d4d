use crate::shared::form_engine::UploadPolicy;
use contracts::shared::Lang;
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub upload: UploadPolicy,
    pub languages: LanguageConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend port on the same host as the dashboard
    pub port: u16,
    pub upload_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            upload_path: "/api/upload".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct LanguageConfig {
    /// Tab opened first on every form
    pub default: Lang,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000
upload_path = "/api/upload"

[upload]
allowed_mime_types = ["image/jpeg", "image/png", "image/webp", "image/svg+xml", "image/gif"]
max_size_bytes = 5242880

[languages]
default = "az"
"#;

/// Parse a configuration document
pub fn parse_config(source: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(source)
}

static CONFIG: Lazy<AppConfig> = Lazy::new(|| match parse_config(DEFAULT_CONFIG) {
    Ok(config) => config,
    Err(e) => {
        log::warn!("invalid embedded config, using defaults: {}", e);
        AppConfig::default()
    }
});

pub fn config() -> &'static AppConfig {
    &CONFIG
}

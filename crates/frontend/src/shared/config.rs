use crate::shared::collection::notify::Notice;
use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub list: ListConfig,
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Empty: same host as the page, on `port`
    #[serde(default)]
    pub base_url: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    pub default_page_size: u32,
    pub page_size_options: Vec<u32>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct NotificationsConfig {
    pub success_ttl_ms: u32,
    pub error_ttl_ms: u32,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
port = 8000

[list]
default_page_size = 10
page_size_options = [10, 25, 50, 100]

[notifications]
success_ttl_ms = 3000
error_ttl_ms = 6000
"#;

/// Id of the optional `<script type="application/toml">` element overriding the defaults
pub const CONFIG_ELEMENT_ID: &str = "app-config";

impl AppConfig {
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(contents).context("invalid app config")?;
        anyhow::ensure!(config.list.default_page_size > 0, "default_page_size must be positive");
        Ok(config)
    }

    pub fn page_size_options(&self) -> Vec<u32> {
        let mut options = self.list.page_size_options.clone();
        if !options.contains(&self.list.default_page_size) {
            options.push(self.list.default_page_size);
        }
        options.retain(|size| *size > 0);
        options.sort_unstable();
        options
    }
}

/// Load configuration
///
/// Search order:
/// 1. `<script id="app-config" type="application/toml">` in the host page
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<AppConfig> {
    let inline = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    if let Some(contents) = inline.filter(|c| !c.trim().is_empty()) {
        log::info!("Loading config from #{}", CONFIG_ELEMENT_ID);
        return AppConfig::from_toml(&contents);
    }

    log::info!("Using default embedded configuration");
    AppConfig::from_toml(DEFAULT_CONFIG)
}

/// Config for the app: the loaded one, or the embedded default plus a
/// warning to show once the toast host is up
pub fn load_config_or_default() -> (AppConfig, Option<Notice>) {
    config_or_default(load_config())
}

fn config_or_default(loaded: anyhow::Result<AppConfig>) -> (AppConfig, Option<Notice>) {
    match loaded {
        Ok(config) => (config, None),
        Err(err) => {
            log::error!("{:#}, falling back to defaults", err);
            let notice = Notice::warning("Settings", format!("{:#}. Default settings are used.", err));
            (default_config(), Some(notice))
        }
    }
}

fn default_config() -> AppConfig {
    AppConfig {
        api: ApiConfig {
            base_url: String::new(),
            port: 8000,
        },
        list: ListConfig {
            default_page_size: 10,
            page_size_options: vec![10, 25, 50, 100],
        },
        notifications: NotificationsConfig {
            success_ttl_ms: 3000,
            error_ttl_ms: 6000,
        },
    }
}

use std::sync::OnceLock;

use super::StaticConfig;

static CONFIG: OnceLock<StaticConfig> = OnceLock::new();

/// Get the global configuration instance
///
/// Loads it on first use if `init_config()` has not run yet.
pub fn get_config() -> &'static StaticConfig {
    CONFIG.get_or_init(StaticConfig::load)
}

/// Initialize the global configuration
///
/// Loads configuration from "config.toml" in the current directory,
/// then applies `ASTROLAB__*` environment overrides.
///
/// # Examples
/// ```no_run
/// use astrolab::config::init_config;
/// init_config();
/// ```
pub fn init_config() {
    CONFIG.get_or_init(StaticConfig::load);
}

/// Initialize the global configuration from a specific TOML file
///
/// Has no effect once the configuration is loaded.
pub fn init_config_from(path: &str) {
    CONFIG.get_or_init(|| StaticConfig::load_with_env(path));
}

use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - bugs: bug tracker server address and page size
/// - demo: demo app server address
/// - database: database connection
/// - auth: session token settings
/// - glue: endpoints used by the `vars` and `whois` commands
/// - native: shared library location
/// - logging: log level, format and output
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub bugs: BugsConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub glue: GlueConfig,
    #[serde(default)]
    pub native: NativeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：ASTROLAB，分隔符：__
    /// 示例：ASTROLAB__BUGS__PORT=9000
    pub fn load() -> Self {
        Self::load_with_env("config.toml")
    }

    /// Like [`load`](Self::load) with a different TOML path
    pub fn load_with_env(path: &str) -> Self {
        // .env is optional
        let _ = dotenvy::dotenv();
        Self::load_from(path)
    }

    pub fn load_from(path: &str) -> Self {
        use config::{Config, Environment, File};

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("ASTROLAB")
                    .separator("__")
                    .try_parsing(true),
            );

        // Logging is not up yet at this point, so report on stderr.
        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Bug tracker server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BugsConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_bugs_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Number of bugs on the index page
    #[serde(default = "default_latest_count")]
    pub latest_count: u64,
}

/// Demo web app server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_demo_port")]
    pub port: u16,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
}

/// Session token settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret; empty means a random secret per process
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u64,
    #[serde(default)]
    pub cookie_secure: bool,
}

/// Endpoints for the HTTP glue commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlueConfig {
    #[serde(default = "default_vars_url")]
    pub vars_url: String,
    /// `{service}` is replaced by each service name
    #[serde(default = "default_vars_service_url")]
    pub vars_service_url: String,
    #[serde(default = "default_vars_services")]
    pub vars_services: Vec<String>,
    #[serde(default = "default_whois_url")]
    pub whois_url: String,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeConfig {
    #[serde(default = "default_library_path")]
    pub library_path: String,
    #[serde(default = "default_video_id")]
    pub video_id: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_bugs_port() -> u16 {
    8000
}

fn default_demo_port() -> u16 {
    5000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_latest_count() -> u64 {
    5
}

fn default_database_url() -> String {
    "astrolab.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

fn default_session_minutes() -> u64 {
    24 * 60
}

fn default_vars_url() -> String {
    "https://bot.astrophena.name/debug/vars".to_string()
}

fn default_vars_service_url() -> String {
    "https://{service}.astrophena.name/debug/vars".to_string()
}

fn default_vars_services() -> Vec<String> {
    vec!["bot".to_string(), "go".to_string(), "webdav".to_string()]
}

fn default_whois_url() -> String {
    "https://feed.coin-tone.ts.net/_proxy/whois".to_string()
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_library_path() -> String {
    "./lib.so".to_string()
}

fn default_video_id() -> String {
    "dQw4w9WgXcQ".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for BugsConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_bugs_port(),
            workers: default_workers(),
            latest_count: default_latest_count(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_demo_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            session_minutes: default_session_minutes(),
            cookie_secure: false,
        }
    }
}

impl Default for GlueConfig {
    fn default() -> Self {
        Self {
            vars_url: default_vars_url(),
            vars_service_url: default_vars_service_url(),
            vars_services: default_vars_services(),
            whois_url: default_whois_url(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            library_path: default_library_path(),
            video_id: default_video_id(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_ports() {
        let config = StaticConfig::default();
        assert_eq!(config.bugs.port, 8000);
        assert_eq!(config.demo.port, 5000);
        assert_eq!(config.bugs.latest_count, 5);
        assert_eq!(config.native.library_path, "./lib.so");
        assert!(config.auth.jwt_secret.is_empty());
    }

    #[test]
    fn sample_config_parses_back() {
        let sample = StaticConfig::generate_sample_config();
        let parsed: StaticConfig = toml::from_str(&sample).expect("sample config is valid TOML");
        assert_eq!(parsed.glue.whois_url, default_whois_url());
        assert_eq!(parsed.glue.vars_services, default_vars_services());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: StaticConfig = toml::from_str("[bugs]\nport = 9001\n").unwrap();
        assert_eq!(parsed.bugs.port, 9001);
        assert_eq!(parsed.bugs.host, "127.0.0.1");
        assert_eq!(parsed.database.database_url, "astrolab.db");
    }

    #[test]
    fn save_to_file_writes_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        StaticConfig::default().save_to_file(&path).unwrap();
        let loaded = StaticConfig::load_from(path.to_str().unwrap());
        assert_eq!(loaded.demo.port, 5000);
    }
}

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub google_ai: GoogleAiConfig,
    pub kakao: KakaoConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Gemini text-generation provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GoogleAiConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub timeout_secs: u64,
}

/// Kakao Local (places search) provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KakaoConfig {
    pub api_key: String,
    /// Search radius around the user's coordinate, in meters
    pub radius_m: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from config.toml file
    /// 2. Override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    pub fn load() -> Result<Self, anyhow::Error> {
        // 1. Load from config file
        let mut config = if let Some(config_path) = Self::find_config_file() {
            Self::from_toml(&config_path)?
        } else {
            tracing::warn!("Configuration file not found, using defaults");
            Config::default()
        };

        // 2. Override with environment variables
        config.apply_env_overrides();

        // 3. Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8000)
    /// - APP_DATABASE_URL: Database URL (default: sqlite://data/talky.db)
    /// - GOOGLE_API_KEY: Gemini API key
    /// - KAKAO_API_KEY: Kakao Local REST API key
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,talky_backend=debug")
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
                tracing::info!("Override server.port from env: {}", self.server.port);
            }
        }

        if let Ok(db_url) = std::env::var("APP_DATABASE_URL") {
            self.database.url = db_url;
            tracing::info!("Override database.url from env");
        }

        if let Ok(key) = std::env::var("GOOGLE_API_KEY") {
            self.google_ai.api_key = key;
            tracing::info!("Override google_ai.api_key from env");
        }

        if let Ok(key) = std::env::var("KAKAO_API_KEY") {
            self.kakao.api_key = key;
            tracing::info!("Override kakao.api_key from env");
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.google_ai.api_key.is_empty() {
            tracing::warn!("google_ai.api_key is empty; generation calls will be rejected upstream");
        }
        if self.kakao.api_key.is_empty() {
            tracing::warn!("kakao.api_key is empty; GPS-based resolution will always fall through");
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.database.url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.kakao.radius_m == 0 {
            anyhow::bail!("kakao.radius_m must be > 0");
        }
        if self.google_ai.timeout_secs == 0 || self.kakao.timeout_secs == 0 {
            anyhow::bail!("provider timeouts must be > 0");
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8000 }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: "sqlite://data/talky.db".to_string() }
    }
}

impl Default for GoogleAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-1.5-flash-latest".to_string(),
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

impl Default for KakaoConfig {
    fn default() -> Self {
        Self { api_key: String::new(), radius_m: 200, timeout_secs: 10 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,talky_backend=debug".to_string(),
            file: Some("logs/talky-backend.log".to_string()),
        }
    }
}

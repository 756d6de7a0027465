//! Client configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a default so an empty file is valid.

pub mod logging;
pub mod notifications;
pub mod preferences;
pub mod refresh;
pub mod server;

use serde::{Deserialize, Serialize};

pub use self::logging::LoggingConfig;
pub use self::notifications::NotificationsConfig;
pub use self::preferences::PreferencesConfig;
pub use self::refresh::RefreshConfig;
pub use self::server::ServerConfig;

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
///
/// `TEAMCONNECT__SERVER__BASE_URL=http://10.0.0.5:8000` overrides
/// `server.base_url`.
pub const ENV_PREFIX: &str = "TEAMCONNECT";

/// Root client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server connection settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Dashboard auto-refresh settings.
    #[serde(default)]
    pub refresh: RefreshConfig,
    /// Local preference store settings.
    #[serde(default)]
    pub preferences: PreferencesConfig,
    /// Toast notification settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file plus `TEAMCONNECT__*` environment
    /// variables. A missing file falls back to defaults.
    pub fn load(path: &str) -> Result<Self, AppError> {
        Self::load_layers(&[path])
    }

    /// Load a base file, then an environment-specific overlay
    /// (`config/{env}.toml`) on top of it.
    pub fn load_with_env(path: &str, env: &str) -> Result<Self, AppError> {
        let overlay = format!("config/{env}");
        Self::load_layers(&[path, &overlay])
    }

    fn load_layers(paths: &[&str]) -> Result<Self, AppError> {
        let mut builder = config::Config::builder();
        for path in paths {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        parsed.validate()?;
        tracing::debug!("Loaded configuration from {:?}", paths);
        Ok(parsed)
    }

    /// Reject settings the client cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        let url = url::Url::parse(&self.server.base_url).map_err(|e| {
            AppError::configuration(format!(
                "server.base_url '{}' is not a valid URL: {e}",
                self.server.base_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::configuration(format!(
                "server.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if !self.refresh.dashboard_path.starts_with('/') {
            return Err(AppError::configuration(
                "refresh.dashboard_path must start with '/'",
            ));
        }

        let intervals = [
            ("refresh.refresh_interval_ms", self.refresh.refresh_interval_ms),
            (
                "refresh.activity_poll_interval_ms",
                self.refresh.activity_poll_interval_ms,
            ),
            (
                "refresh.inactivity_threshold_ms",
                self.refresh.inactivity_threshold_ms,
            ),
            (
                "server.request_timeout_seconds",
                self.server.request_timeout_seconds,
            ),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(AppError::configuration(format!("{name} must be non-zero")));
            }
        }

        Ok(())
    }
}

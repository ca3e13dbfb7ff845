//! Client configuration.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::ConfigError;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.pushover.net/1/";

/// Environment variable prefix used by [`PushoverConfig::from_env`].
pub const ENV_PREFIX: &str = "PUSHOVER";

/// Application token and user key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Application API token.
    pub app_token: String,
    /// User or group key.
    pub user_key: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(app_token: impl Into<String>, user_key: impl Into<String>) -> Self {
        Self {
            app_token: app_token.into(),
            user_key: user_key.into(),
        }
    }

    /// `token` and `user` form parameters.
    pub(crate) fn form_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("token", self.app_token.clone()),
            ("user", self.user_key.clone()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_token", &"<redacted>")
            .field("user_key", &"<redacted>")
            .finish()
    }
}

/// Pushover client configuration.
#[derive(Debug, Clone)]
pub struct PushoverConfig {
    /// Credentials.
    pub credentials: Credentials,
    /// API base URL, ending in `/`.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Reject sounds missing from the service's catalogue.
    pub strict_sounds: bool,
}

impl PushoverConfig {
    /// Create a configuration with default endpoint and timeouts.
    pub fn new(app_token: impl Into<String>, user_key: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(app_token, user_key),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("breeze/{}", env!("CARGO_PKG_VERSION")),
            strict_sounds: false,
        }
    }

    /// Load configuration from `PUSHOVER_*` environment variables, after
    /// reading a `.env` file from the working directory if there is one.
    ///
    /// `PUSHOVER_APP_TOKEN` and `PUSHOVER_USER_KEY` are required.
    /// `PUSHOVER_BASE_URL`, `PUSHOVER_TIMEOUT_SECS` and
    /// `PUSHOVER_STRICT_SOUNDS` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Ignore if .env doesn't exist
        Self::from_source(&EnvSource::process())
    }

    /// Load configuration from an explicit variable source.
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        let mut config = Self::new(source.require("APP_TOKEN")?, source.require("USER_KEY")?);

        if let Some(base_url) = source.get("BASE_URL") {
            config = config.base_url(base_url);
        }

        if let Some(raw) = source.get("TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: source.key("TIMEOUT_SECS"),
                value: raw.to_string(),
            })?;
            config = config.timeout(Duration::from_secs(secs));
        }

        if let Some(raw) = source.get("STRICT_SOUNDS") {
            let strict = parse_bool(raw).ok_or_else(|| ConfigError::Invalid {
                key: source.key("STRICT_SOUNDS"),
                value: raw.to_string(),
            })?;
            config = config.strict_sounds(strict);
        }

        Ok(config)
    }

    /// Set the API base URL. A trailing `/` is added if missing.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable or disable strict sound checking.
    pub fn strict_sounds(mut self, strict: bool) -> Self {
        self.strict_sounds = strict;
        self
    }

    /// The configured credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Prefixed key/value source for configuration, usually the process
/// environment.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Snapshot `PUSHOVER_*` variables from the process environment.
    pub fn process() -> Self {
        let prefix = format!("{}_", ENV_PREFIX);
        let vars = std::env::vars()
            .filter(|(key, _)| key.starts_with(&prefix))
            .collect();
        Self {
            prefix: ENV_PREFIX.to_string(),
            vars,
        }
    }

    /// Read `PUSHOVER_*` entries from a `.env` file without touching the
    /// process environment.
    pub fn from_dotenv_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let load_error = |e: dotenvy::Error| ConfigError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let prefix = format!("{}_", ENV_PREFIX);
        let mut vars = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(load_error)? {
            let (key, value) = item.map_err(load_error)?;
            if key.starts_with(&prefix) {
                vars.insert(key, value);
            }
        }

        Ok(Self {
            prefix: ENV_PREFIX.to_string(),
            vars,
        })
    }

    /// Build a source from explicit `(key, value)` pairs using full names.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: ENV_PREFIX.to_string(),
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }

    /// Look up a variable by its unprefixed name. Blank values count as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(&self.key(name))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn require(&self, name: &str) -> Result<String, ConfigError> {
        self.get(name)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::Missing(self.key(name)))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PushoverConfig::new("app", "user");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.strict_sounds);
        assert!(config.user_agent.starts_with("breeze/"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = PushoverConfig::new("app", "user").base_url("http://localhost:8080/1");
        assert_eq!(config.base_url, "http://localhost:8080/1/");
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let credentials = Credentials::new("secret-token", "secret-user");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_from_source() {
        let source = EnvSource::from_pairs([
            ("PUSHOVER_APP_TOKEN", "app"),
            ("PUSHOVER_USER_KEY", "user"),
            ("PUSHOVER_TIMEOUT_SECS", "5"),
            ("PUSHOVER_STRICT_SOUNDS", "yes"),
        ]);
        let config = PushoverConfig::from_source(&source).unwrap();

        assert_eq!(config.credentials().app_token, "app");
        assert_eq!(config.credentials().user_key, "user");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.strict_sounds);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_source_missing_token() {
        let source = EnvSource::from_pairs([("PUSHOVER_USER_KEY", "user")]);
        match PushoverConfig::from_source(&source) {
            Err(ConfigError::Missing(key)) => assert_eq!(key, "PUSHOVER_APP_TOKEN"),
            other => panic!("expected missing key, got {:?}", other),
        }
    }

    #[test]
    fn test_from_source_invalid_timeout() {
        let source = EnvSource::from_pairs([
            ("PUSHOVER_APP_TOKEN", "app"),
            ("PUSHOVER_USER_KEY", "user"),
            ("PUSHOVER_TIMEOUT_SECS", "soon"),
        ]);
        assert!(matches!(
            PushoverConfig::from_source(&source),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_from_dotenv_file() {
        let path = std::env::temp_dir().join(format!("breeze-{}.env", std::process::id()));
        std::fs::write(
            &path,
            "PUSHOVER_APP_TOKEN=file-app\nPUSHOVER_USER_KEY=file-user\nPUSHOVER_STRICT_SOUNDS=on\nOTHER=ignored\n",
        )
        .unwrap();

        let source = EnvSource::from_dotenv_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(source.get("APP_TOKEN"), Some("file-app"));
        assert!(source.vars.get("OTHER").is_none());

        let config = PushoverConfig::from_source(&source).unwrap();
        assert_eq!(config.credentials().user_key, "file-user");
        assert!(config.strict_sounds);
    }

    #[test]
    fn test_from_dotenv_file_missing() {
        let result = EnvSource::from_dotenv_file("/nonexistent/breeze/.env");
        assert!(matches!(result, Err(ConfigError::Load { .. })));
    }
}

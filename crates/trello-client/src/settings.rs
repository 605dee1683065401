//! Configuration registry.
//!
//! [`Configuration`] holds the settings every request depends on: the target
//! environment, the API credentials and the application name. It is a plain
//! value owned by the client that uses it; [`Configuration::reset`] puts it
//! back into its initial state.
//!
//! Settings start out empty. Reading an empty setting is a configuration
//! error, as is writing an empty value, an unknown setting name or an
//! environment outside [`Environment::ALL`].
//!
//! ```rust
//! use trello_client::{Configuration, Environment};
//!
//! let mut config = Configuration::new();
//! assert!(config.key().is_err());
//!
//! config.set_environment(Environment::Production);
//! config.set_key("my-key")?;
//! assert_eq!(config.service_url()?, "https://api.trello.com/1");
//! # Ok::<(), trello_client::Error>(())
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::{API_VERSION, DEFAULT_APPLICATION_NAME};

/// Deployment context selecting hosts and credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Development,
    Sandbox,
    Production,
    Qa,
}

impl Environment {
    /// Every recognized environment.
    pub const ALL: [Environment; 4] = [
        Environment::Development,
        Environment::Sandbox,
        Environment::Production,
        Environment::Qa,
    ];

    /// The setting value naming this environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
            Environment::Qa => "qa",
        }
    }

    /// API host for this environment.
    ///
    /// Every environment resolves to the public API host.
    pub fn server_name(&self) -> &'static str {
        match self {
            Environment::Production
            | Environment::Qa
            | Environment::Sandbox
            | Environment::Development => "api.trello.com",
        }
    }

    /// Whether requests in this environment use TLS. Always on.
    pub fn ssl_on(&self) -> bool {
        match self {
            Environment::Development
            | Environment::Production
            | Environment::Qa
            | Environment::Sandbox => true,
        }
    }

    /// Authorization host for this environment.
    pub fn auth_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://auth.venmo.com",
            Environment::Qa => "https://auth.qa.venmo.com",
            Environment::Sandbox => "https://auth.sandbox.venmo.com",
            Environment::Development => "http://auth.venmo.dev:9292",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| Error::config(format!("\"{s}\" is not a valid environment.")))
    }
}

/// Name of a configuration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Environment,
    Key,
    Secret,
    Token,
    ApplicationName,
}

impl Setting {
    /// Every recognized setting.
    pub const ALL: [Setting; 5] = [
        Setting::Environment,
        Setting::Key,
        Setting::Secret,
        Setting::Token,
        Setting::ApplicationName,
    ];

    /// The setting's name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Setting::Environment => "environment",
            Setting::Key => "key",
            Setting::Secret => "secret",
            Setting::Token => "token",
            Setting::ApplicationName => "applicationName",
        }
    }

    /// Environment variable read by [`Configuration::from_env`].
    pub fn env_var(&self) -> &'static str {
        match self {
            Setting::Environment => "TRELLO_ENVIRONMENT",
            Setting::Key => "TRELLO_KEY",
            Setting::Secret => "TRELLO_SECRET",
            Setting::Token => "TRELLO_TOKEN",
            Setting::ApplicationName => "TRELLO_APPLICATION_NAME",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Setting {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Setting::ALL
            .into_iter()
            .find(|setting| setting.as_str() == s)
            .ok_or_else(|| Error::config(format!("{s} is not a valid configuration setting.")))
    }
}

/// Settings for talking to the Trello API.
///
/// Secrets are redacted in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    environment: String,
    key: String,
    secret: String,
    token: String,
    application_name: String,
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |value: &str| if value.is_empty() { "" } else { "[REDACTED]" };
        f.debug_struct("Configuration")
            .field("environment", &self.environment)
            .field("key", &redacted(&self.key))
            .field("secret", &redacted(&self.secret))
            .field("token", &redacted(&self.token))
            .field("application_name", &self.application_name)
            .finish()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            environment: String::new(),
            key: String::new(),
            secret: String::new(),
            token: String::new(),
            application_name: DEFAULT_APPLICATION_NAME.to_string(),
        }
    }
}

impl Configuration {
    /// Create a configuration with every setting empty except the
    /// application name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from `TRELLO_*` environment variables.
    ///
    /// Each variable is optional; the ones present are validated like any
    /// other write. See [`Setting::env_var`] for the variable names.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings from any variable source keyed by [`Setting::env_var`]
    /// names. Missing and empty values are skipped.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();
        for setting in Setting::ALL {
            match lookup(setting.env_var()) {
                Some(value) if !value.is_empty() => config.set(setting.as_str(), value)?,
                _ => {}
            }
        }
        Ok(config)
    }

    /// Restore the initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check that `value` may be stored under `key`.
    pub fn validate(key: Option<&str>, value: Option<&str>) -> Result<()> {
        let key = key.unwrap_or_default();
        let value = value.unwrap_or_default();

        if key.is_empty() && value.is_empty() {
            return Err(Error::config("nothing to validate"));
        }

        if key == Setting::Environment.as_str() {
            value.parse::<Environment>()?;
        }

        key.parse::<Setting>()?;

        if value.is_empty() {
            return Err(Error::config(format!("{key} cannot be empty.")));
        }

        Ok(())
    }

    /// Store a setting after validation.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        Self::validate(Some(key), Some(&value))?;
        let setting: Setting = key.parse()?;
        *self.slot_mut(setting) = value;
        Ok(())
    }

    /// Read a setting, failing if it is unknown or still empty.
    pub fn get(&self, key: &str) -> Result<&str> {
        let setting: Setting = key.parse()?;
        self.value(setting)
    }

    /// Store `value` when it is present and non-empty, otherwise read the
    /// current value.
    ///
    /// Returns `None` after a write and `Some(value)` after a read.
    pub fn set_or_get(&mut self, name: &str, value: Option<&str>) -> Result<Option<String>> {
        match value {
            Some(value) if !value.is_empty() => {
                self.set(name, value)?;
                Ok(None)
            }
            _ => self.get(name).map(|value| Some(value.to_string())),
        }
    }

    /// Returns true if the setting holds a value.
    pub fn is_set(&self, setting: Setting) -> bool {
        !self.slot(setting).is_empty()
    }

    fn value(&self, setting: Setting) -> Result<&str> {
        let value = self.slot(setting);
        if value.is_empty() {
            return Err(Error::config(format!("{setting} needs to be set.")));
        }
        Ok(value)
    }

    fn slot(&self, setting: Setting) -> &str {
        match setting {
            Setting::Environment => &self.environment,
            Setting::Key => &self.key,
            Setting::Secret => &self.secret,
            Setting::Token => &self.token,
            Setting::ApplicationName => &self.application_name,
        }
    }

    fn slot_mut(&mut self, setting: Setting) -> &mut String {
        match setting {
            Setting::Environment => &mut self.environment,
            Setting::Key => &mut self.key,
            Setting::Secret => &mut self.secret,
            Setting::Token => &mut self.token,
            Setting::ApplicationName => &mut self.application_name,
        }
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    /// The configured environment.
    pub fn environment(&self) -> Result<Environment> {
        self.value(Setting::Environment)?.parse()
    }

    /// Set the environment.
    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment.as_str().to_string();
    }

    /// The API key.
    pub fn key(&self) -> Result<&str> {
        self.value(Setting::Key)
    }

    /// Set the API key.
    pub fn set_key(&mut self, key: impl Into<String>) -> Result<()> {
        self.set(Setting::Key.as_str(), key)
    }

    /// The API secret.
    pub fn secret(&self) -> Result<&str> {
        self.value(Setting::Secret)
    }

    /// Set the API secret.
    pub fn set_secret(&mut self, secret: impl Into<String>) -> Result<()> {
        self.set(Setting::Secret.as_str(), secret)
    }

    /// The member token.
    pub fn token(&self) -> Result<&str> {
        self.value(Setting::Token)
    }

    /// Set the member token.
    pub fn set_token(&mut self, token: impl Into<String>) -> Result<()> {
        self.set(Setting::Token.as_str(), token)
    }

    /// The application name.
    pub fn application_name(&self) -> Result<&str> {
        self.value(Setting::ApplicationName)
    }

    /// Set the application name.
    pub fn set_application_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.set(Setting::ApplicationName.as_str(), name)
    }

    /// Builder form of [`Configuration::set_environment`].
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.set_environment(environment);
        self
    }

    /// Builder form of [`Configuration::set_key`].
    pub fn with_key(mut self, key: impl Into<String>) -> Result<Self> {
        self.set_key(key)?;
        Ok(self)
    }

    /// Builder form of [`Configuration::set_secret`].
    pub fn with_secret(mut self, secret: impl Into<String>) -> Result<Self> {
        self.set_secret(secret)?;
        Ok(self)
    }

    /// Builder form of [`Configuration::set_token`].
    pub fn with_token(mut self, token: impl Into<String>) -> Result<Self> {
        self.set_token(token)?;
        Ok(self)
    }

    /// Builder form of [`Configuration::set_application_name`].
    pub fn with_application_name(mut self, name: impl Into<String>) -> Result<Self> {
        self.set_application_name(name)?;
        Ok(self)
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    /// Full service URL: base URL plus version path.
    pub fn service_url(&self) -> Result<String> {
        Ok(format!("{}{}", self.base_url()?, self.version_path()))
    }

    /// Gateway URL, e.g. `https://api.trello.com`.
    pub fn base_url(&self) -> Result<String> {
        Ok(format!("{}://{}", self.protocol()?, self.server_name()?))
    }

    /// Path segment selecting the API version.
    pub fn version_path(&self) -> String {
        format!("/{API_VERSION}")
    }

    /// `https` when SSL is on, `http` otherwise.
    pub fn protocol(&self) -> Result<&'static str> {
        Ok(if self.ssl_on()? { "https" } else { "http" })
    }

    /// API host for the configured environment.
    pub fn server_name(&self) -> Result<&'static str> {
        Ok(self.environment()?.server_name())
    }

    /// Authorization host for the configured environment.
    pub fn auth_url(&self) -> Result<&'static str> {
        Ok(self.environment()?.auth_url())
    }

    /// Whether the configured environment uses TLS.
    pub fn ssl_on(&self) -> Result<bool> {
        Ok(self.environment()?.ssl_on())
    }
}

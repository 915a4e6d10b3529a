//! The configuration structs used to build the AppConfig, and their impls.
use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::config::{ConfigError, ConfigResult};

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    #[serde(default)]
    pub mailchimp_config: MailchimpConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

/// Everything about Mailchimp that isn't a secret.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MailchimpConfig {
    /// Replaces `https://<dc>.api.mailchimp.com` when set.
    pub base_url: Option<String>,
}

// ###################################
// ->   IMPLs
// ###################################
impl AppConfig {
    /// Layers `base.toml`, then `<environment>.toml` from `config_dir`, then `APP_` env variables.
    /// Nested keys in env variables are separated with `__`, e.g. `APP_NET_CONFIG__APP_PORT`.
    pub fn figment(config_dir: &Path, environment: Environment) -> Figment {
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            .merge(Env::prefixed("APP_").split("__"))
    }

    pub fn load(config_dir: &Path, environment: Environment) -> ConfigResult<Self> {
        let config = Self::figment(config_dir, environment).extract()?;
        Ok(config)
    }
}

// ###################################
// ->   TRY FROMs
// ###################################
impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(ConfigError::StringToEnvironmentFail(value)),
        }
    }
}

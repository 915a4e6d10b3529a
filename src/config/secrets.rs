//! Mailchimp secrets, looked up fresh on every request.
use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};

pub const MAILCHIMP_API_KEY: &str = "MAILCHIMP_API_KEY";
pub const MAILCHIMP_LIST_ID: &str = "MAILCHIMP_LIST_ID";

/// Something we can look up secrets in by name.
pub trait SecretSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads straight from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl SecretSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// A fixed set of secrets.
#[derive(Debug, Clone, Default)]
pub struct StaticSecrets(HashMap<String, String>);

impl StaticSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Shorthand for a source holding both Mailchimp secrets.
    pub fn mailchimp(api_key: impl Into<String>, list_id: impl Into<String>) -> Self {
        Self::new()
            .with(MAILCHIMP_API_KEY, api_key)
            .with(MAILCHIMP_LIST_ID, list_id)
    }
}

impl SecretSource for StaticSecrets {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

#[derive(Debug, Clone)]
pub struct MailchimpSecrets {
    api_key: SecretString,
    pub list_id: String,
}

impl MailchimpSecrets {
    /// Returns `None` if either secret is missing. Empty values count as missing.
    pub fn load(source: &dyn SecretSource) -> Option<Self> {
        let non_empty = |key: &str| source.get(key).filter(|val| !val.is_empty());

        let api_key = non_empty(MAILCHIMP_API_KEY)?;
        let list_id = non_empty(MAILCHIMP_LIST_ID)?;

        Some(MailchimpSecrets {
            api_key: SecretString::from(api_key),
            list_id,
        })
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    /// The data center is whatever follows the last dash in the API key, e.g. `us10` in `123abc-us10`.
    /// A key without a dash is its own data center.
    pub fn data_center(&self) -> &str {
        let key = self.api_key.expose_secret();
        key.rsplit('-').next().unwrap_or(key)
    }
}

use once_cell::sync::Lazy;
use std::{env, time::Duration};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

pub static BASE_URL: Lazy<Box<str>> = Lazy::new(|| {
    env::var("OPENAI_BASE_URL")
        .unwrap_or_else(|_| "https://api.openai.com/v1".into())
        .trim_end_matches('/')
        .into()
});

pub static TIMEOUT: Lazy<Duration> = Lazy::new(|| {
    let secs: u64 = env::var("OPENAI_TIMEOUT_SECS")
        .unwrap_or_else(|_| "600".into())
        .parse()
        .expect("OPENAI_TIMEOUT_SECS must be a whole number of seconds");
    Duration::from_secs(secs)
});

pub fn validate() {
    // Trigger the lazy statics to force panics early
    let _ = &*BASE_URL;
    let _ = *TIMEOUT;
}

/// Source of the upstream credential, consulted on every chat call.
pub trait CredentialProvider: Send + Sync + 'static {
    /// Returns the credential, or `None` when it is missing or empty.
    fn get_credential(&self) -> Option<Box<str>>;
}

/// Reads the credential from the process environment each time it is asked.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: Box<str>,
}

impl EnvCredential {
    pub fn new(var: impl Into<Box<str>>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredential {
    fn default() -> Self {
        Self::new(API_KEY_VAR)
    }
}

impl CredentialProvider for EnvCredential {
    fn get_credential(&self) -> Option<Box<str>> {
        env::var(&*self.var)
            .ok()
            .filter(|value| !value.is_empty())
            .map(String::into_boxed_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixedCredential(Option<Box<str>>);

impl FixedCredential {
    pub fn new(credential: impl Into<Box<str>>) -> Self {
        Self(Some(credential.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialProvider for FixedCredential {
    fn get_credential(&self) -> Option<Box<str>> {
        self.0.clone().filter(|value| !value.is_empty())
    }
}

use anyhow::{Context, Result, bail};

use chatapp_api::DEFAULT_MAX_LOGIN_ATTEMPTS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub max_login_attempts: u32,
    pub sample_data: bool,
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_login_attempts: DEFAULT_MAX_LOGIN_ATTEMPTS,
            sample_data: true,
            rng_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("CHATAPP_MAX_LOGIN_ATTEMPTS") {
            let max: u32 = v
                .trim()
                .parse()
                .with_context(|| format!("CHATAPP_MAX_LOGIN_ATTEMPTS: '{}' is not a number", v))?;
            if max == 0 {
                bail!("CHATAPP_MAX_LOGIN_ATTEMPTS must be at least 1");
            }
            config.max_login_attempts = max;
        }

        if let Some(v) = lookup("CHATAPP_SAMPLE_DATA") {
            config.sample_data = parse_bool(&v)
                .with_context(|| format!("CHATAPP_SAMPLE_DATA: '{}' is not a boolean", v))?;
        }

        if let Some(v) = lookup("CHATAPP_RNG_SEED") {
            let seed = v
                .trim()
                .parse()
                .with_context(|| format!("CHATAPP_RNG_SEED: '{}' is not a u64", v))?;
            config.rng_seed = Some(seed);
        }

        Ok(config)
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

use std::{path::PathBuf, str::FromStr};

use anyhow::Context;
use time::UtcOffset;

/// Process settings, read from the environment after loading `.env` if there is one.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub public_dir: PathBuf,
    pub bot_name: String,
    pub utc_offset: UtcOffset,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
        let hours: i8 = parse_or(&var, "UTC_OFFSET_HOURS", 6)?;

        Ok(Config {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parse_or(&var, "PORT", 3000)?,
            public_dir: var("PUBLIC_DIR").unwrap_or_else(|| "public".to_owned()).into(),
            bot_name: var("BOT_NAME").unwrap_or_else(|| "XeroxChat Bot".to_owned()),
            utc_offset: UtcOffset::from_hms(hours, 0, 0)
                .with_context(|| format!("UTC_OFFSET_HOURS={hours} is out of range"))?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw.trim().parse().with_context(|| format!("invalid {key}: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use time::macros::offset;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.bot_name, "XeroxChat Bot");
        assert_eq!(config.utc_offset, offset!(+6));
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("UTC_OFFSET_HOURS", "-5"),
            ("BOT_NAME", "Relay"),
        ]))
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.utc_offset, offset!(-5));
        assert_eq!(config.bot_name, "Relay");
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(Config::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
        assert!(Config::from_lookup(lookup(&[("PORT", "70000")])).is_err());
        assert!(Config::from_lookup(lookup(&[("UTC_OFFSET_HOURS", "30")])).is_err());
    }
}

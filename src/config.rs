// Настройки бота из переменных окружения (.env подхватывается в main)
use crate::codec::DelimiterPolicy;
use crate::shortener::DEFAULT_API_URL;
use thiserror::Error;
use url::Url;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TUTORIAL_LINK: &str = "https://example.com/tutorial";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} не задан в окружении или .env файле")]
    Missing(&'static str),
    #[error("{name} имеет неверное значение '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub webhook_url: Url,
    pub port: u16,
    pub shortener_api_url: String,
    pub shortener_api_key: String,
    pub photo_url: Option<Url>,
    pub tutorial_link: String,
    pub delimiter_policy: DelimiterPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Пустые строки считаем незаданными
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let telegram_token = require("TELEGRAM_TOKEN")?;
        let raw_webhook_url = require("WEBHOOK_URL")?;
        let shortener_api_key = require("URL_SHORTENER_API_KEY")?;

        let webhook_url = Url::parse(&raw_webhook_url).map_err(|e| ConfigError::Invalid {
            name: "WEBHOOK_URL",
            value: raw_webhook_url.clone(),
            reason: e.to_string(),
        })?;

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let photo_url = match get("PHOTO_URL") {
            Some(raw) => Some(Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                name: "PHOTO_URL",
                value: raw.clone(),
                reason: e.to_string(),
            })?),
            None => None,
        };

        let delimiter_policy = match get("STRICT_LINK_FORMAT").as_deref() {
            Some("1") | Some("true") | Some("TRUE") | Some("yes") => DelimiterPolicy::Strict,
            _ => DelimiterPolicy::UrlOnly,
        };

        Ok(Config {
            telegram_token,
            webhook_url,
            port,
            shortener_api_url: get("SHORTENER_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            shortener_api_key,
            photo_url,
            tutorial_link: get("TUTORIAL_LINK").unwrap_or_else(|| DEFAULT_TUTORIAL_LINK.to_string()),
            delimiter_policy,
        })
    }
}

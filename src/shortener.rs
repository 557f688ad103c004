use log::{error, info};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://publicearn.com/api";
// Дольше ждать нельзя: пользователь все это время без ответа
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ShortenResponse {
    status: Option<String>,
    #[serde(rename = "shortenedUrl")]
    shortened_url: Option<String>,
}

impl ShortenResponse {
    fn into_short_url(self) -> Option<String> {
        if self.status.as_deref() != Some("success") {
            return None;
        }
        self.shortened_url.filter(|url| !url.trim().is_empty())
    }
}

#[derive(Clone)]
pub struct ShortenerClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ShortenerClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self::with_timeout(api_url, api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_url: String, api_key: String, timeout: Duration) -> Self {
        let client = match Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                error!("Не удалось создать HTTP клиент с таймаутом: {}", e);
                Client::new()
            }
        };

        Self {
            client,
            api_url,
            api_key,
        }
    }

    // Никогда не падает: при любой ошибке возвращаем исходную ссылку
    pub async fn shorten(&self, long_url: &str) -> String {
        match self.fetch_short_url(long_url).await {
            Ok(short_url) => {
                info!("Ссылка сокращена: {} -> {}", long_url, short_url);
                short_url
            }
            Err(e) => {
                error!("Не удалось сократить ссылку {}: {}", long_url, e);
                long_url.to_string()
            }
        }
    }

    async fn fetch_short_url(&self, long_url: &str) -> Result<String, String> {
        let response = match self.client
            .get(&self.api_url)
            .query(&[("api", self.api_key.as_str()), ("url", long_url)])
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => return Err(format!("ошибка сетевого запроса: {}", e)),
        };

        if !response.status().is_success() {
            let status = response.status();
            let error_text = match response.text().await {
                Ok(text) => text,
                Err(_) => "неизвестная ошибка".to_string(),
            };
            return Err(format!("сервис вернул ошибку: {} - {}", status, error_text));
        }

        match response.json::<ShortenResponse>().await {
            Ok(data) => data
                .into_short_url()
                .ok_or_else(|| "неожиданный формат ответа".to_string()),
            Err(e) => Err(format!("ошибка парсинга ответа: {}", e)),
        }
    }
}

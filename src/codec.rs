// Кодирование ссылок для параметра /start
//
// Токен - это URL-safe Base64 от строки "{url}&&{name}" без завершающих '='.
// Шифрованием это не является: любой может собрать токен на произвольный URL.
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use thiserror::Error;

// Разделитель между URL и именем файла внутри токена
pub const DELIMITER: &str = "&&";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub url: String,
    pub name: String,
}

impl LinkRecord {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

// Что делать, если в декодированной строке нет разделителя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelimiterPolicy {
    // Вся строка считается URL, имя пустое
    #[default]
    UrlOnly,
    // Ошибка MissingDelimiter
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("token is not valid base64: {0}")]
    MalformedToken(String),
    #[error("decoded bytes are not valid UTF-8: {0}")]
    InvalidEncoding(String),
    #[error("decoded text has no '&&' separator")]
    MissingDelimiter,
}

pub fn encode(url: &str, name: &str) -> String {
    let joined = format!("{}{}{}", url, DELIMITER, name);
    URL_SAFE_NO_PAD.encode(joined.as_bytes())
}

pub fn decode(token: &str) -> Result<LinkRecord, DecodeError> {
    decode_with(token, DelimiterPolicy::default())
}

pub fn decode_with(token: &str, policy: DelimiterPolicy) -> Result<LinkRecord, DecodeError> {
    let padded = restore_padding(token.trim());

    let bytes = URL_SAFE
        .decode(padded.as_bytes())
        .map_err(|e| DecodeError::MalformedToken(e.to_string()))?;

    let text = String::from_utf8(bytes).map_err(|e| DecodeError::InvalidEncoding(e.to_string()))?;

    match text.split_once(DELIMITER) {
        Some((url, name)) => Ok(LinkRecord::new(url, name)),
        None => match policy {
            DelimiterPolicy::UrlOnly => Ok(LinkRecord::new(text, "")),
            DelimiterPolicy::Strict => Err(DecodeError::MissingDelimiter),
        },
    }
}

// Добавляем (-len) mod 4 символов '=', уже дополненный токен не меняется
fn restore_padding(token: &str) -> String {
    let missing = (4 - token.len() % 4) % 4;
    let mut padded = String::with_capacity(token.len() + missing);
    padded.push_str(token);
    padded.extend(std::iter::repeat('=').take(missing));
    padded
}

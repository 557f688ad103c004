// Разбор аргумента команды /start в готовую ссылку или типизированную ошибку
use crate::codec::{self, DecodeError, DelimiterPolicy, LinkRecord};
use thiserror::Error;

pub const USAGE_MESSAGE: &str = "Please provide the encoded string in the command.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("decoded link has an empty URL")]
    EmptyUrl,
}

impl LinkError {
    // Текст для пользователя; подробности остаются в логах
    pub fn user_message(&self) -> &'static str {
        match self {
            LinkError::Decode(DecodeError::MalformedToken(_))
            | LinkError::Decode(DecodeError::InvalidEncoding(_)) => "Error decoding base64 string.",
            LinkError::Decode(DecodeError::MissingDelimiter) | LinkError::EmptyUrl => {
                "Invalid format of the encoded string."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved(LinkRecord),
    UsageError,
    DecodeError(LinkError),
}

// Аргументы после /start: teloxide отдает их одной строкой
pub fn split_args(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

pub fn handle<S: AsRef<str>>(args: &[S]) -> Outcome {
    handle_with(args, DelimiterPolicy::default())
}

pub fn handle_with<S: AsRef<str>>(args: &[S], policy: DelimiterPolicy) -> Outcome {
    let token = match args {
        [token] => token.as_ref(),
        _ => return Outcome::UsageError,
    };

    match codec::decode_with(token, policy) {
        Ok(record) if record.url.is_empty() => Outcome::DecodeError(LinkError::EmptyUrl),
        Ok(record) => Outcome::Resolved(record),
        Err(e) => Outcome::DecodeError(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    #[test]
    fn test_resolves_single_token() {
        let token = encode("https://host/file.bin", "report.pdf");
        assert_eq!(
            handle(&[token]),
            Outcome::Resolved(LinkRecord::new("https://host/file.bin", "report.pdf"))
        );
    }

    #[test]
    fn test_wrong_argument_count() {
        let none: [&str; 0] = [];
        assert_eq!(handle(&none), Outcome::UsageError);
        assert_eq!(handle(&["a", "b"]), Outcome::UsageError);
        assert_eq!(handle(&split_args("   ")), Outcome::UsageError);
    }

    #[test]
    fn test_split_args() {
        assert_eq!(split_args(" abc \n"), vec!["abc"]);
        assert_eq!(split_args("a  b"), vec!["a", "b"]);
        assert!(split_args("").is_empty());
    }

    #[test]
    fn test_empty_url_rejected() {
        let token = encode("", "report.pdf");
        assert_eq!(handle(&[token]), Outcome::DecodeError(LinkError::EmptyUrl));

        // пустой токен декодируется в пустую строку
        assert_eq!(handle(&[""]), Outcome::DecodeError(LinkError::EmptyUrl));
    }

    #[test]
    fn test_decode_failures_map_to_decode_error() {
        match handle(&["not-valid-base64!!!"]) {
            Outcome::DecodeError(LinkError::Decode(DecodeError::MalformedToken(_))) => {}
            other => panic!("unexpected outcome: {:?}", other),
        }

        let token = URL_SAFE_NO_PAD.encode("http://example.com");
        assert_eq!(
            handle_with(&[token.as_str()], DelimiterPolicy::Strict),
            Outcome::DecodeError(LinkError::Decode(DecodeError::MissingDelimiter))
        );
        assert_eq!(
            handle(&[token]),
            Outcome::Resolved(LinkRecord::new("http://example.com", ""))
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            LinkError::Decode(DecodeError::MalformedToken("x".into())).user_message(),
            "Error decoding base64 string."
        );
        assert_eq!(
            LinkError::Decode(DecodeError::InvalidEncoding("x".into())).user_message(),
            "Error decoding base64 string."
        );
        assert_eq!(
            LinkError::Decode(DecodeError::MissingDelimiter).user_message(),
            "Invalid format of the encoded string."
        );
        assert_eq!(
            LinkError::EmptyUrl.user_message(),
            "Invalid format of the encoded string."
        );
    }
}

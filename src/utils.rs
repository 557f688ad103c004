// Вспомогательные функции для форматирования ответов бота
use log::error;
use std::fmt::Display;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

pub const UNKNOWN_FILE_NAME: &str = "Unknown";

// Функция экранирования специальных символов Markdown V2
pub fn escape_markdown_v2(text: &str) -> String {
    let special_chars = ['\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!'];
    let mut result = String::with_capacity(text.len() * 2);

    for ch in text.chars() {
        if special_chars.contains(&ch) {
            result.push('\\');
        }
        result.push(ch);
    }

    result
}

// Внутри (...) у ссылки экранируются только ')' и '\'
pub fn escape_link_url(url: &str) -> String {
    let mut result = String::with_capacity(url.len());
    for ch in url.chars() {
        if ch == ')' || ch == '\\' {
            result.push('\\');
        }
        result.push(ch);
    }
    result
}

// Текст ответа с именем файла, ссылкой и инструкцией
pub fn link_message(file_name: &str, link: &str, tutorial_link: &str) -> String {
    let file_name = if file_name.trim().is_empty() {
        UNKNOWN_FILE_NAME
    } else {
        file_name
    };

    format!(
        "📸 *File Name:* {}\n\n\
        🔗 *Link is Here:* [Here]({})\n\n\
        📘 *How to open Tutorial:* [Tutorial]({})",
        escape_markdown_v2(file_name),
        escape_link_url(link),
        escape_link_url(tutorial_link)
    )
}

// Отправка уже размеченного текста с MarkdownV2
pub async fn send_markdown_message(bot: &Bot, chat_id: ChatId, text: String) -> ResponseResult<Message> {
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::MarkdownV2)
        .await
}

// Необязательный шаг ответа: ошибку пишем в лог и продолжаем
pub fn best_effort<T, E: Display>(result: Result<T, E>, action: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!("Не удалось {}: {}", action, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown_v2_special_chars() {
        let input = "report_v2.final (copy) [1]!";
        assert_eq!(
            escape_markdown_v2(input),
            r"report\_v2\.final \(copy\) \[1\]\!"
        );
        assert_eq!(escape_markdown_v2(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_escape_markdown_v2_plain_text() {
        assert_eq!(escape_markdown_v2("Отчёт 2024"), "Отчёт 2024");
        assert_eq!(escape_markdown_v2(""), "");
    }

    #[test]
    fn test_escape_link_url() {
        assert_eq!(
            escape_link_url("https://host/a_(b).bin"),
            r"https://host/a_(b\).bin"
        );
    }

    #[test]
    fn test_link_message() {
        let message = link_message("report.pdf", "https://s.io/x", "https://example.com/tutorial");
        assert_eq!(
            message,
            "📸 *File Name:* report\\.pdf\n\n\
            🔗 *Link is Here:* [Here](https://s.io/x)\n\n\
            📘 *How to open Tutorial:* [Tutorial](https://example.com/tutorial)"
        );
    }

    #[test]
    fn test_link_message_empty_name() {
        let message = link_message("  ", "https://s.io/x", "https://t.io");
        assert!(message.starts_with("📸 *File Name:* Unknown\n\n"));
    }

    #[test]
    fn test_best_effort_swallows_error() {
        let failed: Result<(), String> = Err("chat not found".to_string());
        assert_eq!(best_effort(failed, "показать набор текста"), None);

        let ok: Result<u8, String> = Ok(7);
        assert_eq!(best_effort(ok, "отправить фото"), Some(7));
    }
}

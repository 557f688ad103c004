use dotenv::dotenv;
use fileopener_bot::config::Config;
use fileopener_bot::dispatch::{self, Outcome, USAGE_MESSAGE};
use fileopener_bot::shortener::ShortenerClient;
use fileopener_bot::{utils, webhook};
use log::{error, info, warn};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, ChatAction, InputFile};
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
enum Command {
    #[command(description = "open a link from an encoded string")]
    Start(String),
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    // Уровень логирования info, если не задан
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();
    info!("Запуск FileOpener бота...");

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("Ошибка конфигурации: {}", e);
            std::process::exit(1);
        }
    };

    let bot = Bot::new(config.telegram_token.clone());
    let shortener = ShortenerClient::new(
        config.shortener_api_url.clone(),
        config.shortener_api_key.clone(),
    );

    let commands = vec![BotCommand::new("start", "открыть ссылку из закодированной строки")];
    match bot.set_my_commands(commands).await {
        Ok(_) => info!("Командная панель бота обновлена"),
        Err(e) => error!("Не удалось установить команды бота: {}", e),
    }

    let listener = match webhook::start_listener(bot.clone(), &config).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Не удалось настроить webhook: {}", e);
            std::process::exit(1);
        }
    };

    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(handle_commands);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![config, shortener])
        .enable_ctrlc_handler()
        .build();

    info!("Бот готов к работе!");
    dispatcher
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("Ошибка в обработчике обновлений webhook"),
        )
        .await;
    info!("Бот остановлен");
}

async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: Command,
    config: Arc<Config>,
    shortener: ShortenerClient,
) -> ResponseResult<()> {
    let user_id = msg.chat.id.0;
    let username = msg.from()
        .and_then(|user| user.username.clone())
        .unwrap_or_else(|| format!("ID: {}", user_id));

    match cmd {
        Command::Start(arg) => {
            info!("Пользователь @{} запустил бота с аргументом: {:?}", username, arg);
            let args = dispatch::split_args(&arg);
            let outcome = dispatch::handle_with(&args, config.delimiter_policy);
            send_outcome(&bot, &msg, &config, &shortener, &username, outcome).await?;
        }
    }
    Ok(())
}

async fn send_outcome(
    bot: &Bot,
    msg: &Message,
    config: &Config,
    shortener: &ShortenerClient,
    username: &str,
    outcome: Outcome,
) -> ResponseResult<()> {
    match outcome {
        Outcome::Resolved(record) => {
            info!("Декодированная ссылка для @{}: {} ({})", username, record.url, record.name);
            // Индикатор набора и фото не должны мешать отправке ссылки
            utils::best_effort(
                bot.send_chat_action(msg.chat.id, ChatAction::Typing).await,
                "показать набор текста",
            );

            // При ошибке сервиса сокращения остается исходная ссылка
            let link = shortener.shorten(&record.url).await;

            if let Some(photo_url) = &config.photo_url {
                let sent = bot.send_photo(msg.chat.id, InputFile::url(photo_url.clone())).await;
                utils::best_effort(sent, &format!("отправить фото пользователю @{}", username));
            }

            let text = utils::link_message(&record.name, &link, &config.tutorial_link);
            utils::send_markdown_message(bot, msg.chat.id, text).await?;
        }
        Outcome::UsageError => {
            warn!("Пользователь @{} не передал закодированную строку", username);
            bot.send_message(msg.chat.id, USAGE_MESSAGE).await?;
        }
        Outcome::DecodeError(e) => {
            warn!("Ошибка декодирования для @{}: {}", username, e);
            bot.send_message(msg.chat.id, e.user_message()).await?;
        }
    }
    Ok(())
}

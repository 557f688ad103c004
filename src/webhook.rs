// Приём обновлений от Telegram через webhook
//
// teloxide сам вызывает setWebhook при старте и deleteWebhook при остановке,
// поэтому отдельный маршрут /setwebhook не нужен.
use std::convert::Infallible;
use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use log::{error, info};
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks::{self, Options};
use teloxide::update_listeners::UpdateListener;
use teloxide::RequestError;

use crate::config::Config;

pub const HOME_TEXT: &str = "Hello, World!";

async fn home() -> &'static str {
    HOME_TEXT
}

pub fn home_router() -> Router {
    Router::new().route("/", get(home))
}

// Поднимает HTTP сервер и возвращает listener для диспетчера teloxide
pub async fn start_listener(
    bot: Bot,
    config: &Config,
) -> Result<impl UpdateListener<Err = Infallible>, RequestError> {
    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    let options = Options::new(address, config.webhook_url.clone());

    info!("Устанавливаю webhook: {}", config.webhook_url);
    let (listener, stop_flag, webhook_router) = webhooks::axum_to_router(bot, options).await?;

    // На "/" может висеть сам webhook, тогда домашняя страница не нужна
    let app = if config.webhook_url.path() == "/" {
        webhook_router
    } else {
        home_router().merge(webhook_router)
    };

    info!("Слушаю входящие запросы на {}", address);
    tokio::spawn(async move {
        if let Err(e) = axum::Server::bind(&address)
            .serve(app.into_make_service())
            .with_graceful_shutdown(stop_flag)
            .await
        {
            error!("Ошибка HTTP сервера: {}", e);
        }
    });

    Ok(listener)
}

pub mod codec;
pub mod config;
pub mod dispatch;
pub mod shortener;
pub mod utils;
pub mod webhook;

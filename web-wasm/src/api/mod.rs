//! バックエンドAPI

pub mod extract;

pub use extract::FetchTransport;

use chat_hd_common::DEFAULT_ENDPOINT;

/// 送信先URL（ビルド時に`CHAT_HD_ENDPOINT`で上書き可能）
pub fn endpoint() -> &'static str {
    option_env!("CHAT_HD_ENDPOINT").unwrap_or(DEFAULT_ENDPOINT)
}

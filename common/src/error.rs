//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Image read error: {0}")]
    ImageRead(String),

    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 非成功ステータスによる失敗かどうか
    pub fn is_status(&self) -> bool {
        matches!(self, Error::Status(_))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

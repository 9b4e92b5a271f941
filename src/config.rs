use crate::error::{ChatHdError, Result};
use chat_hd_common::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 送信先を上書きする環境変数
pub const ENDPOINT_ENV: &str = "CHAT_HD_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout_seconds: 30,
        }
    }
}

impl Config {
    /// 設定ファイル → 環境変数 の順に読み込む（保存はしない）
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        Ok(config.with_endpoint(std::env::var(ENDPOINT_ENV).ok()))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ChatHdError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("chat-hd").join("config.json"))
    }

    /// 空文字列は無視する
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint;
        }
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: Option<u64>) -> Self {
        if let Some(secs) = timeout_seconds {
            self.timeout_seconds = secs;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// 設定ファイル読み込み時と、上書きを反映した後に呼ぶ
    pub fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ChatHdError::Config(format!(
                "endpointはhttp(s)のURLで指定してください: {}",
                self.endpoint
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(ChatHdError::Config("timeout_secondsは1以上".into()));
        }
        Ok(())
    }
}

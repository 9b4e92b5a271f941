//! reqwestによるJSON送信

use chat_hd_common::{Error, ExtractRequest, Transport};
use serde_json::Value;
use std::time::Duration;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn post_json(
        &self,
        endpoint: &str,
        request: &ExtractRequest,
    ) -> chat_hd_common::Result<Value> {
        // json()でContent-Type: application/jsonが付く
        let response = self
            .client
            .post(endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::Transport(e.to_string()))
    }
}

//! fetchによるJSON送信

use chat_hd_common::{Error, ExtractRequest, Result, Transport};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

fn transport_error(value: JsValue) -> Error {
    Error::Transport(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

/// ブラウザの`fetch`を使う送信手段
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn post_json(&self, endpoint: &str, request: &ExtractRequest) -> Result<Value> {
        let body = serde_json::to_string(request)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(endpoint, &opts).map_err(transport_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(transport_error)?;

        let window = web_sys::window().ok_or_else(|| Error::Transport("window not available".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport_error)?;
        let resp: Response = resp_value.dyn_into().map_err(transport_error)?;

        if !resp.ok() {
            return Err(Error::Status(resp.status()));
        }

        // 本文がJSONでなければここでrejectされる
        let json = JsFuture::from(resp.json().map_err(transport_error)?)
            .await
            .map_err(transport_error)?;

        serde_wasm_bindgen::from_value(json).map_err(|e| Error::Transport(e.to_string()))
    }
}

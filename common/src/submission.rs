//! 送信フロー
//!
//! `Idle -> Submitting -> Idle` の状態遷移。送信中の再送信は何もせず捨てる
//! （キューイングしない）。失敗はすべてここで吸収し、ユーザーには
//! 回答か固定のエラー文字列のどちらかだけを返す。

use std::cell::Cell;
use std::rc::Rc;

use serde_json::Value;

use crate::encoding::ImageSource;
use crate::error::{Error, Result};
use crate::protocol::{
    extract_answer, render_answer, ExtractRequest, STATUS_FAILURE, TRANSPORT_FAILURE,
};

/// バックエンドへの送信手段
///
/// 非成功ステータスは`Error::Status`、送信やパースの失敗はそれ以外のエラーで返す。
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, endpoint: &str, request: &ExtractRequest) -> Result<Value>;
}

/// 送信状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

/// 送信中フラグ
///
/// ビュー1つにつき1つ。シングルスレッド前提なので`Rc<Cell>`で共有する。
#[derive(Debug, Clone, Default)]
pub struct InFlight(Rc<Cell<bool>>);

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmitState {
        if self.0.get() {
            SubmitState::Submitting
        } else {
            SubmitState::Idle
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.0.get()
    }

    /// 送信を開始する。すでに送信中ならNone
    pub fn try_begin(&self) -> Option<InFlightGuard> {
        if self.0.replace(true) {
            return None;
        }
        Some(InFlightGuard(Rc::clone(&self.0)))
    }
}

/// ドロップ時にIdleへ戻す
#[derive(Debug)]
pub struct InFlightGuard(Rc<Cell<bool>>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// 1回の送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// 回答フィールドの表示用文字列（フィールドが無ければNone）
    Answer(Option<String>),
    /// 非成功ステータス
    StatusFailure,
    /// 送信またはパースの失敗
    TransportFailure,
}

impl Reply {
    /// 表示領域に出す文字列
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Reply::Answer(answer) => answer.as_deref(),
            Reply::StatusFailure => Some(STATUS_FAILURE),
            Reply::TransportFailure => Some(TRANSPORT_FAILURE),
        }
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, Reply::Answer(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 送信中だったため何もしなかった
    Skipped,
    Completed(Reply),
}

/// 送信処理本体
pub struct Submitter<T> {
    transport: T,
    endpoint: String,
    in_flight: InFlight,
    requests: Cell<usize>,
}

impl<T: Transport> Submitter<T> {
    pub fn new(transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            in_flight: InFlight::new(),
            requests: Cell::new(0),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// これまでに発行したリクエスト数
    pub fn requests_issued(&self) -> usize {
        self.requests.get()
    }

    /// テキストと任意の画像を送信し、表示用の結果を返す
    ///
    /// 画像の変換に失敗した場合はログを出し、画像なしで送信を続ける。
    pub async fn submit<I: ImageSource>(&self, text: &str, image: Option<&I>) -> SubmitOutcome {
        let Some(_guard) = self.in_flight.try_begin() else {
            log::debug!("submission already in flight; ignoring");
            return SubmitOutcome::Skipped;
        };

        if text.trim().is_empty() {
            log::debug!("submitting without text");
        }

        let image = match image {
            Some(source) => encode_image(source).await,
            None => None,
        };

        let request = ExtractRequest::new(text, image);
        self.requests.set(self.requests.get() + 1);

        let reply = match self.transport.post_json(&self.endpoint, &request).await {
            Ok(body) => {
                log::debug!("response body: {}", body);
                Reply::Answer(render_answer(extract_answer(&body)))
            }
            Err(Error::Status(status)) => {
                log::error!("backend returned status {}", status);
                Reply::StatusFailure
            }
            Err(e) => {
                log::error!("error sending request: {}", e);
                Reply::TransportFailure
            }
        };

        SubmitOutcome::Completed(reply)
    }
}

async fn encode_image<I: ImageSource>(source: &I) -> Option<String> {
    match source.encode().await {
        Ok(payload) => {
            log::debug!("image {} encoded ({} chars)", source.name(), payload.len());
            Some(payload)
        }
        Err(e) => {
            log::error!("error converting image {} to base64: {}", source.name(), e);
            None
        }
    }
}

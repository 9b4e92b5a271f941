//! デバウンス
//!
//! 入力値が一定時間変化しなかった場合にのみ、最新の値を確定させる。
//! 時刻はミリ秒の`f64`で受け取る（ブラウザの`Date.now()`と同じ単位）。
//! タイマー自体は呼び出し側が持ち、発火時に`poll`を呼ぶ。

use std::time::Duration;

/// チャット入力欄の既定デバウンス時間
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    since_ms: f64,
}

/// 保留中の値は常に1つだけ
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn delay_ms(&self) -> f64 {
        self.delay.as_micros() as f64 / 1000.0
    }

    /// 新しい値を受け取り、待機をやり直す
    ///
    /// 以前に保留していた値は破棄される。確定予定時刻（ms）を返す。
    pub fn update(&mut self, value: T, now_ms: f64) -> f64 {
        self.pending = Some(Pending {
            value,
            since_ms: now_ms,
        });
        now_ms + self.delay_ms()
    }

    /// 静止時間が経過していれば保留中の値を取り出す
    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        let since_ms = self.pending.as_ref()?.since_ms;
        if now_ms - since_ms < self.delay_ms() {
            return None;
        }
        self.pending.take().map(|p| p.value)
    }

    /// 確定までの残り時間。保留がなければNone
    pub fn remaining(&self, now_ms: f64) -> Option<Duration> {
        let pending = self.pending.as_ref()?;
        let left = (pending.since_ms + self.delay_ms() - now_ms).max(0.0);
        Some(Duration::from_micros((left * 1000.0).round() as u64))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// 保留中の値を破棄（ビュー破棄時）
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for Debounce<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

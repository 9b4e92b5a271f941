//! バックエンドとのリクエスト/レスポンス形式
//!
//! レスポンスの形はバックエンド側で固定されていないため、
//! `serde_json::Value`のまま受け取り、回答フィールドだけを取り出す。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 既定の送信先
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/dev/extract";

/// レスポンス中の回答フィールド名
pub const ANSWER_FIELD: &str = "kb_output";

/// 回答表示時のラベル
pub const REPLY_PREFIX: &str = "HDBank_AI";

/// 非成功ステータス時にユーザーへ表示する文字列
pub const STATUS_FAILURE: &str = "Error: Unable to fetch response.";

/// 送信・パース失敗時にユーザーへ表示する文字列
pub const TRANSPORT_FAILURE: &str = "Error: Failed to send request.";

/// 送信ボディ
///
/// `image`は常に出力され、画像なしの場合は`null`になる
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub image: Option<String>,
    pub user_input: String,
}

impl ExtractRequest {
    pub fn new(user_input: impl Into<String>, image: Option<String>) -> Self {
        Self {
            image,
            user_input: user_input.into(),
        }
    }
}

/// レスポンスから回答フィールドを取り出す
pub fn extract_answer(body: &Value) -> Option<&Value> {
    body.get(ANSWER_FIELD)
}

/// 回答を表示用文字列に変換
///
/// 文字列はそのまま、それ以外のJSON値は2スペースインデントで整形する。
/// フィールドが無ければNone（表示領域は空になる）。
pub fn render_answer(answer: Option<&Value>) -> Option<String> {
    match answer? {
        Value::String(text) => Some(text.clone()),
        other => serde_json::to_string_pretty(other).ok(),
    }
}

/// 表示領域の1行を組み立てる
pub fn format_reply_line(reply: &str) -> String {
    format!("{}: {}", REPLY_PREFIX, reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialize_without_image() {
        let request = ExtractRequest::new("Hello", None);
        let json = serde_json::to_string(&request).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"image":null,"user_input":"Hello"}"#);
    }

    #[test]
    fn test_request_serialize_with_image() {
        let request = ExtractRequest::new("", Some("iVBORw0KGgo=".to_string()));
        let value = serde_json::to_value(&request).expect("シリアライズ失敗");
        assert_eq!(value, json!({ "image": "iVBORw0KGgo=", "user_input": "" }));
    }

    #[test]
    fn test_extract_answer() {
        let body = json!({ "kb_output": "Hi there", "other": 1 });
        assert_eq!(extract_answer(&body), Some(&json!("Hi there")));
        assert_eq!(extract_answer(&json!({ "answer": "x" })), None);
        assert_eq!(extract_answer(&json!(["kb_output"])), None);
    }

    #[test]
    fn test_render_answer_string() {
        let value = json!("Hi there");
        assert_eq!(render_answer(Some(&value)), Some("Hi there".to_string()));
    }

    #[test]
    fn test_render_answer_structured() {
        let value = json!({ "rate": 5.5 });
        assert_eq!(
            render_answer(Some(&value)),
            Some("{\n  \"rate\": 5.5\n}".to_string())
        );
    }

    #[test]
    fn test_render_answer_scalars() {
        assert_eq!(render_answer(Some(&json!(42))), Some("42".to_string()));
        assert_eq!(render_answer(Some(&json!(null))), Some("null".to_string()));
        assert_eq!(render_answer(Some(&json!(true))), Some("true".to_string()));
    }

    #[test]
    fn test_render_answer_missing() {
        assert_eq!(render_answer(None), None);
    }

    #[test]
    fn test_format_reply_line() {
        assert_eq!(format_reply_line("Hi there"), "HDBank_AI: Hi there");
    }
}

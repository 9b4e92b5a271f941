//! Chat HD Common Library
//!
//! ブラウザ(WASM)版とターミナル版で共有される送信フローとユーティリティ

pub mod debounce;
pub mod encoding;
pub mod error;
pub mod protocol;
pub mod submission;

pub use debounce::{Debounce, DEFAULT_DEBOUNCE};
pub use encoding::{decode_payload, encode_bytes, mime_type_of_data_url, strip_data_url_prefix, ImageSource};
pub use error::{Error, Result};
pub use protocol::{
    extract_answer, format_reply_line, render_answer, ExtractRequest, ANSWER_FIELD,
    DEFAULT_ENDPOINT, REPLY_PREFIX, STATUS_FAILURE, TRANSPORT_FAILURE,
};
pub use submission::{InFlight, InFlightGuard, Reply, SubmitOutcome, SubmitState, Submitter, Transport};

//! バイナリ→テキスト変換
//!
//! 画像ファイルの内容をJSONに埋め込めるBase64文字列へ変換する。
//! ブラウザの`readAsDataURL`が付ける`data:image/png;base64,`のような
//! 先頭部分は取り除き、ペイロード部分のみを送信する。

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::Result;

/// 選択された画像ファイル
///
/// 実体はブラウザの`File`やローカルファイルパスなど、フロントエンドごとに異なる。
/// 読み込みは送信時にのみ行い、結果はキャッシュしない。
#[allow(async_fn_in_trait)]
pub trait ImageSource {
    /// 表示用のファイル名
    fn name(&self) -> &str;

    /// ファイル内容をBase64ペイロード（プレフィックスなし）として返す
    ///
    /// 読み込みに失敗した場合は`Error::ImageRead`
    async fn encode(&self) -> Result<String>;
}

/// バイト列をBase64（標準アルファベット、パディングあり）に変換
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Base64ペイロードを元のバイト列に戻す
pub fn decode_payload(payload: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(payload)?)
}

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
///
/// # Returns
/// カンマ以降のデータ部分、カンマがなければNone
pub fn strip_data_url_prefix(data_url: &str) -> Option<&str> {
    data_url.split_once(',').map(|(_, payload)| payload)
}

/// Data URLからMIMEタイプを抽出
pub fn mime_type_of_data_url(data_url: &str) -> Option<&str> {
    let header = data_url.strip_prefix("data:")?;
    let (header, _) = header.split_once(',')?;
    header
        .split(';')
        .next()
        .filter(|mime| !mime.is_empty())
}

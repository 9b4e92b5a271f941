//! 選択画像の読み込み
//!
//! `FileReader::readAsDataURL`のコールバックをfutureに変換し、
//! Data URLの先頭部分を取り除いたBase64ペイロードを返す。

use std::cell::RefCell;
use std::rc::Rc;

use chat_hd_common::{mime_type_of_data_url, strip_data_url_prefix, Error, ImageSource, Result};
use futures::channel::oneshot;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader, ProgressEvent};

fn read_error(value: JsValue) -> Error {
    Error::ImageRead(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

/// ユーザーが選択した画像ファイル
#[derive(Debug, Clone)]
pub struct BrowserImage {
    file: File,
    name: String,
}

impl BrowserImage {
    pub fn new(file: File) -> Self {
        let name = file.name();
        Self { file, name }
    }
}

impl ImageSource for BrowserImage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn encode(&self) -> Result<String> {
        let data_url = read_as_data_url(&self.file).await?;
        log::debug!(
            "read {} as {}",
            self.name,
            mime_type_of_data_url(&data_url).unwrap_or("unknown type")
        );
        strip_data_url_prefix(&data_url)
            .map(str::to_owned)
            .ok_or_else(|| Error::ImageRead(format!("unexpected data URL for {}", self.name)))
    }
}

/// ファイルをData URLとして読み込む
pub async fn read_as_data_url(file: &File) -> Result<String> {
    let reader = FileReader::new().map_err(read_error)?;
    let (tx, rx) = oneshot::channel::<Result<String>>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let onload = {
        let reader = reader.clone();
        let tx = Rc::clone(&tx);
        Closure::wrap(Box::new(move |_: ProgressEvent| {
            let result = reader
                .result()
                .map_err(read_error)
                .and_then(|value| {
                    value
                        .as_string()
                        .ok_or_else(|| Error::ImageRead("reader result is not a string".into()))
                });
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(result);
            }
        }) as Box<dyn FnMut(_)>)
    };

    let onerror = {
        let reader = reader.clone();
        let tx = Rc::clone(&tx);
        Closure::wrap(Box::new(move |_: ProgressEvent| {
            let message = reader
                .error()
                .map(|e| e.message())
                .unwrap_or_else(|| "unknown read error".to_string());
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Err(Error::ImageRead(message)));
            }
        }) as Box<dyn FnMut(_)>)
    };

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    reader.read_as_data_url(file).map_err(read_error)?;

    let result = rx
        .await
        .unwrap_or_else(|_| Err(Error::ImageRead("reader was dropped".into())));

    // コールバックは読み込み完了まで生かしておく
    reader.set_onload(None);
    reader.set_onerror(None);
    drop(onload);
    drop(onerror);

    result
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use chat_hd_common::{decode_payload, encode_bytes};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn make_file(bytes: &[u8], name: &str) -> File {
        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes));
        File::new_with_u8_array_sequence(&parts, name).expect("File生成失敗")
    }

    #[wasm_bindgen_test]
    async fn wasm_browser_image_encode_strips_prefix() {
        let bytes = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let image = BrowserImage::new(make_file(&bytes, "photo.png"));

        let payload = image.encode().await.expect("読み込み失敗");

        assert_eq!(image.name(), "photo.png");
        assert!(!payload.starts_with("data:"));
        assert_eq!(payload, encode_bytes(&bytes));
        assert_eq!(decode_payload(&payload).expect("デコード失敗"), bytes);
    }

    #[wasm_bindgen_test]
    async fn wasm_read_as_data_url_keeps_header() {
        let file = make_file(b"hello", "note.txt");
        let data_url = read_as_data_url(&file).await.expect("読み込み失敗");
        assert!(data_url.starts_with("data:"));
        assert!(data_url.ends_with(&encode_bytes(b"hello")));
    }
}

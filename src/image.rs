//! ローカル画像ファイル

use chat_hd_common::{encode_bytes, Error, ImageSource};
use std::path::{Path, PathBuf};

use crate::error::{ChatHdError, Result};

/// ブラウザ版の`accept="image/*"`に相当する拡張子
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// 拡張子が画像形式かどうか（大文字小文字は区別しない）
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// 送信時に読み込まれる画像ファイル
#[derive(Debug, Clone)]
pub struct FileImage {
    path: PathBuf,
    name: String,
}

impl FileImage {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ChatHdError::FileNotFound(path.display().to_string()));
        }
        if !is_image_path(path) {
            return Err(ChatHdError::UnsupportedImage(path.display().to_string()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for FileImage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn encode(&self) -> chat_hd_common::Result<String> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| Error::ImageRead(format!("{}: {}", self.path.display(), e)))?;
        Ok(encode_bytes(&bytes))
    }
}

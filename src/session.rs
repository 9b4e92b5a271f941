//! ターミナル上のチャットセッション
//!
//! ブラウザ版の画面1つ分に相当する状態（選択画像と送信フロー）を持つ。

use chat_hd_common::{format_reply_line, ImageSource, SubmitOutcome, Submitter, Transport};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::image::FileImage;

pub struct ChatSession<T> {
    submitter: Submitter<T>,
    image: Option<FileImage>,
}

impl<T: Transport> ChatSession<T> {
    pub fn new(transport: T, endpoint: &str) -> Self {
        Self {
            submitter: Submitter::new(transport, endpoint),
            image: None,
        }
    }

    pub fn submitter(&self) -> &Submitter<T> {
        &self.submitter
    }

    pub fn image(&self) -> Option<&FileImage> {
        self.image.as_ref()
    }

    /// 画像を選択する（既存の選択は置き換え）
    pub fn select_image(&mut self, path: &Path) -> Result<&FileImage> {
        let image = FileImage::open(path)?;
        log::info!("image selected: {}", image.path().display());
        Ok(self.image.insert(image))
    }

    pub fn delete_image(&mut self) -> Option<FileImage> {
        self.image.take()
    }

    pub async fn send(&self, text: &str) -> SubmitOutcome {
        self.submitter.submit(text, self.image.as_ref()).await
    }

    /// 送信中はスピナーを表示する
    pub async fn send_with_progress(&self, text: &str) -> SubmitOutcome {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Sending...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let outcome = self.send(text).await;

        spinner.finish_and_clear();
        outcome
    }
}

/// 対話モードの入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Ask(String),
    Image(PathBuf),
    Delete,
    Quit,
}

/// 1行の入力を解釈する
///
/// `:image PATH` `:delete` `:quit` 以外はすべて質問として扱う
pub fn parse_line(line: &str) -> ChatCommand {
    let trimmed = line.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((":image", path)) if !path.trim().is_empty() => {
            ChatCommand::Image(PathBuf::from(path.trim()))
        }
        _ => match trimmed {
            ":delete" => ChatCommand::Delete,
            ":quit" | ":q" => ChatCommand::Quit,
            _ => ChatCommand::Ask(line.to_string()),
        },
    }
}

/// 表示領域に相当する出力
pub fn print_outcome(outcome: &SubmitOutcome) {
    if let SubmitOutcome::Completed(reply) = outcome {
        if let Some(text) = reply.display_text() {
            println!("{}", format_reply_line(text));
        }
    }
}

/// 対話モード
///
/// 画像が未選択のまま空行を入力すると終了する
pub async fn run_interactive<T: Transport>(session: &mut ChatSession<T>) -> Result<()> {
    println!("コマンド: :image PATH（画像選択） :delete（画像削除） :quit（終了）\n");

    loop {
        let line: String = Input::new()
            .with_prompt("Ask a question")
            .allow_empty(true)
            .interact_text()?;

        match parse_line(&line) {
            ChatCommand::Quit => break,
            ChatCommand::Image(path) => match session.select_image(&path) {
                Ok(image) => println!("Selected Image: {}", image.name()),
                Err(e) => eprintln!("{}", e),
            },
            ChatCommand::Delete => {
                if let Some(image) = session.delete_image() {
                    println!("✔ 画像を削除しました: {}", image.name());
                }
            }
            ChatCommand::Ask(text) => {
                if text.trim().is_empty() && session.image().is_none() {
                    break;
                }
                let outcome = session.send_with_progress(&text).await;
                print_outcome(&outcome);
            }
        }
    }

    Ok(())
}

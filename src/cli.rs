use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chat-hd")]
#[command(about = "HD Bank AIチャット（ターミナル版）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 送信先URL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// リクエストのタイムアウト（秒）
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 質問を1回送信して回答を表示
    Send {
        /// 質問文
        text: Option<String>,

        /// 添付する画像ファイル
        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// 対話モード
    Chat,

    /// 設定を表示
    Config {
        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

use chat_hd::{cli, config, error, logging, session, transport};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use session::{print_outcome, ChatSession};
use std::process::ExitCode;
use transport::HttpTransport;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = Config::load()?
        .with_endpoint(cli.endpoint)
        .with_timeout(cli.timeout);
    // 環境変数・フラグでの上書きも同じ条件で検証する
    config.validate()?;

    match cli.command {
        Commands::Send { text, image } => {
            let mut session = ChatSession::new(HttpTransport::new(config.timeout())?, &config.endpoint);
            if let Some(path) = image {
                session.select_image(&path)?;
            }

            let outcome = session
                .send_with_progress(text.as_deref().unwrap_or_default())
                .await;
            print_outcome(&outcome);

            if let chat_hd_common::SubmitOutcome::Completed(reply) = &outcome {
                if reply.is_failure() {
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Commands::Chat => {
            println!("💬 Chat with HD Bank AI\n");
            let mut session = ChatSession::new(HttpTransport::new(config.timeout())?, &config.endpoint);
            session::run_interactive(&mut session).await?;
        }

        Commands::Config { show } => {
            let path = Config::config_path()?;
            if show {
                println!("設定:");
                println!("  設定ファイル: {}", path.display());
                println!("  送信先: {}", config.endpoint);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            } else {
                println!("設定ファイル: {}", path.display());
                println!("`chat-hd config --show` で現在の設定を表示します");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

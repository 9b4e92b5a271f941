use flexi_logger::{DeferredNow, Logger, Record};

use crate::error::Result;

/// ログ出力を初期化する
///
/// 回答は標準出力に出すため、ログは標準エラーへ。`RUST_LOG`があればそちらを優先。
pub fn init(verbose: bool) -> Result<()> {
    let level = if verbose { "info" } else { "warn" };

    Logger::try_with_env_or_str(level)?
        .format(cli_format)
        .log_to_stderr()
        .start()?;

    Ok(())
}

fn cli_format(
    w: &mut dyn std::io::Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write!(w, "[{}] {}", record.level(), record.args())
}

use crate::config::LogConfig;
use crate::error::InitProcessError;
use env_logger::{Builder, Target};
use std::fs::File;
use std::io::Write;

pub fn setup_logger(config: &LogConfig) -> Result<(), InitProcessError> {
    let level = config.level_filter()?;

    let mut builder = Builder::new();
    builder
        // ログレベルの設定
        .filter_level(level)
        // タイムスタンプ付きのフォーマット
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(), // モジュールパスが表示される
                record.args()
            )
        });

    // レポートは標準出力に出すので、ログはファイルか標準エラーに出力する
    match &config.file {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                InitProcessError::LoggerError(format!("{}: {}", path.display(), e))
            })?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| InitProcessError::LoggerError(e.to_string()))
}

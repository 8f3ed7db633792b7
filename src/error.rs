use thiserror::Error;

pub type CheckResult<T> = Result<T, CheckError>;

/// パケット検査で発生するエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("InvalidHexEncoding: 16進数文字列として解釈できません: {0}")]
    InvalidHexEncoding(String),

    #[error("TruncatedInput: パケットが短すぎます (必要: {needed} バイト, 実際: {actual} バイト)")]
    TruncatedInput { needed: usize, actual: usize },
}

#[derive(Error, Debug)]
pub enum InitProcessError {
    #[error("ロガーのセットアップに失敗しました: {0}")]
    LoggerError(String),

    #[error("環境変数の解析に失敗しました: {0}")]
    EnvVarParseError(String),

    #[error("入力の読み込みに失敗しました: {0}")]
    InputReadError(String),

    #[error("レポートのシリアライズに失敗しました: {0}")]
    ReportSerializeError(String),

    #[error("レポートの出力に失敗しました: {0}")]
    OutputWriteError(String),
}

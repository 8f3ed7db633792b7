use crate::error::InitProcessError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = InitProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(InitProcessError::EnvVarParseError(format!(
                "IPCHK_OUTPUT に未対応の形式が指定されました: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub log: LogConfig,
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// error / warn / info / debug / trace / off
    pub level: String,
    pub file: Option<PathBuf>,
}

impl LogConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, InitProcessError> {
        LevelFilter::from_str(&self.level).map_err(|_| {
            InitProcessError::EnvVarParseError(format!("無効なログレベル: {}", self.level))
        })
    }
}

impl AppConfig {
    /// .env ファイルと環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, InitProcessError> {
        // .env がなくても環境変数だけで動作する
        dotenv::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self, InitProcessError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log = LogConfig {
            level: lookup("IPCHK_LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
            file: lookup("IPCHK_LOG_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        };
        // 起動時に検証しておく
        log.level_filter()?;

        let output = match lookup("IPCHK_OUTPUT") {
            Some(value) => value.parse()?,
            None => OutputFormat::Text,
        };

        Ok(Self { log, output })
    }

    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            log: LogConfig {
                level: "debug".to_string(),
                file: None,
            },
            output: OutputFormat::Json,
        }
    }
}

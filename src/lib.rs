//! IPv4 ヘッダのチェックサム検証
//!
//! 16進数文字列で与えられたパケットからIPv4ヘッダを解析し、
//! インターネットチェックサムを再計算して宣言値が正しいかを判定する。

pub mod config;
pub mod error;
pub mod hex;
pub mod input;
pub mod packet;
pub mod report;
pub mod setup_logger;

pub use error::{CheckError, CheckResult, InitProcessError};
pub use packet::{internet_checksum, IpHeader};
pub use report::{check_packet, check_packet_hex, ChecksumReport};

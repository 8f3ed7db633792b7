use crate::config::OutputFormat;
use crate::error::{CheckError, CheckResult, InitProcessError};
use crate::hex::decode_hex;
use crate::packet::{internet_checksum, IpHeader, IPV4_MIN_HEADER_LEN};
use log::{debug, warn};
use serde::{Serialize, Serializer};
use std::fmt;
use std::io::Write;

/// 1パケット分の検査結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecksumReport {
    pub header: IpHeader,
    #[serde(serialize_with = "serialize_hex16")]
    pub declared_checksum: u16,
    #[serde(serialize_with = "serialize_hex16")]
    pub computed_checksum: u16,
    /// 再計算したチェックサムが0であれば正しい
    pub valid: bool,
    pub captured_length: usize,
    pub options_len: usize,
}

fn serialize_hex16<S: Serializer>(value: &u16, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("0x{:04x}", value))
}

/// 16進数文字列で与えられたパケットを検査する
pub fn check_packet_hex(packet_hex: &str) -> CheckResult<ChecksumReport> {
    let packet = decode_hex(packet_hex)?;
    check_packet(&packet)
}

/// パケットのヘッダを解析し、宣言されたヘッダ長の範囲でチェックサムを再計算する
pub fn check_packet(packet: &[u8]) -> CheckResult<ChecksumReport> {
    let header = IpHeader::parse(packet)?;

    let header_len = header.header_len();
    let header_bytes = packet.get(..header_len).ok_or(CheckError::TruncatedInput {
        needed: header_len,
        actual: packet.len(),
    })?;

    if header.version != 4 {
        warn!("IPv4以外のバージョンです: {}", header.version);
    }
    if header_len < IPV4_MIN_HEADER_LEN {
        warn!(
            "ヘッダ長が最小値を下回っています: {} バイト (宣言されたヘッダ長の範囲のみで計算します)",
            header_len
        );
    }
    if header.total_length as usize != packet.len() {
        warn!(
            "トータル長 {} と入力されたバイト数 {} が一致しません",
            header.total_length,
            packet.len()
        );
    }

    // チェックサムフィールドは0にせずそのまま含める
    let computed_checksum = internet_checksum(header_bytes);
    debug!(
        "{} -> {} のヘッダ ({} バイト) のチェックサム: 0x{:04x}",
        header.src_ip, header.dst_ip, header_len, computed_checksum
    );

    Ok(ChecksumReport {
        declared_checksum: header.header_checksum,
        computed_checksum,
        valid: computed_checksum == 0,
        captured_length: packet.len(),
        options_len: header.options_len(),
        header,
    })
}

/// 複数のパケットを順に検査し、レポートを `out` に、入力エラーを `err` に書き出す。
///
/// 入力エラーがあっても残りのパケットの検査は続ける。全パケットのレポートを
/// 出力できた場合 (チェックサムの正誤は問わない) に true を返す。
pub fn check_all<O, E>(
    packets: &[String],
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) -> Result<bool, InitProcessError>
where
    O: Write,
    E: Write,
{
    let write_error = |e: std::io::Error| InitProcessError::OutputWriteError(e.to_string());
    let mut all_ok = true;

    for (index, packet_hex) in packets.iter().enumerate() {
        let rendered = check_packet_hex(packet_hex)
            .map_err(|e| e.to_string())
            .and_then(|report| match format {
                OutputFormat::Text => Ok(report.to_string()),
                OutputFormat::Json => report.to_json().map_err(|e| e.to_string()),
            });

        match rendered {
            Ok(text) => {
                if index > 0 && format == OutputFormat::Text {
                    writeln!(out).map_err(write_error)?;
                }
                writeln!(out, "{}", text).map_err(write_error)?;
            }
            Err(message) => {
                writeln!(err, "{} 番目のパケット: {}", index + 1, message).map_err(write_error)?;
                all_ok = false;
            }
        }
    }

    Ok(all_ok)
}

impl ChecksumReport {
    pub fn verdict(&self) -> &'static str {
        if self.valid {
            "CORRECT"
        } else {
            "INCORRECT"
        }
    }

    pub fn to_json(&self) -> Result<String, InitProcessError> {
        serde_json::to_string(self).map_err(|e| InitProcessError::ReportSerializeError(e.to_string()))
    }
}

impl fmt::Display for ChecksumReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.header;
        writeln!(f, "IP Header Fields:")?;
        writeln!(f, "  version: {}", h.version)?;
        writeln!(f, "  ihl: {}", h.ihl)?;
        writeln!(f, "  type_of_service: {}", h.type_of_service)?;
        writeln!(f, "  total_length: {}", h.total_length)?;
        writeln!(f, "  identification: {}", h.identification)?;
        writeln!(f, "  flags_fragment_offset: {}", h.flags_fragment_offset)?;
        writeln!(f, "  ttl: {}", h.ttl)?;
        writeln!(f, "  protocol: {}", h.protocol)?;
        writeln!(f, "  header_checksum: 0x{:04x}", h.header_checksum)?;
        writeln!(f, "  src_ip: {}", h.src_ip)?;
        writeln!(f, "  dst_ip: {}", h.dst_ip)?;
        if self.options_len > 0 {
            writeln!(f, "  options_length: {}", self.options_len)?;
        }
        writeln!(f)?;
        writeln!(f, "Original checksum in packet: 0x{:04x}", self.declared_checksum)?;
        writeln!(f, "Calculated checksum:         0x{:04x}", self.computed_checksum)?;
        write!(f, "Checksum is {}.", self.verdict())
    }
}

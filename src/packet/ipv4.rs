use crate::error::{CheckError, CheckResult};
use serde::Serialize;
use std::net::Ipv4Addr;

/// オプションを含まない固定部分のヘッダ長
pub const IPV4_MIN_HEADER_LEN: usize = 20;

// 0                   1                   2                   3
// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |Version|  IHL  |Type of Service|          Total Length         |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |         Identification        |Flags|      Fragment Offset    |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |  Time to Live |    Protocol   |         Header Checksum       |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                       Source Address                          |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                    Destination Address                        |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpHeader {
    pub version: u8,
    /// 32ビットワード単位のヘッダ長
    pub ihl: u8,
    pub type_of_service: u8,
    pub total_length: u16,
    pub identification: u16,
    /// フラグとフラグメントオフセットを分解せずに保持する
    pub flags_fragment_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub header_checksum: u16,
    pub src_ip: Ipv4Addr,
    pub dst_ip: Ipv4Addr,
}

impl IpHeader {
    /// 先頭20バイトからヘッダを構造的に解析する。
    ///
    /// バージョンやフィールドの組み合わせの妥当性は検証しない。
    pub fn parse(data: &[u8]) -> CheckResult<Self> {
        if data.len() < IPV4_MIN_HEADER_LEN {
            return Err(CheckError::TruncatedInput {
                needed: IPV4_MIN_HEADER_LEN,
                actual: data.len(),
            });
        }

        Ok(Self {
            version: data[0] >> 4,
            ihl: data[0] & 0x0f,
            type_of_service: data[1],
            total_length: u16::from_be_bytes([data[2], data[3]]),
            identification: u16::from_be_bytes([data[4], data[5]]),
            flags_fragment_offset: u16::from_be_bytes([data[6], data[7]]),
            ttl: data[8],
            protocol: data[9],
            header_checksum: u16::from_be_bytes([data[10], data[11]]),
            src_ip: Ipv4Addr::new(data[12], data[13], data[14], data[15]),
            dst_ip: Ipv4Addr::new(data[16], data[17], data[18], data[19]),
        })
    }

    /// バイト単位のヘッダ長
    pub fn header_len(&self) -> usize {
        self.ihl as usize * 4
    }

    /// 固定部分を超えて宣言されたオプションのバイト数
    pub fn options_len(&self) -> usize {
        self.header_len().saturating_sub(IPV4_MIN_HEADER_LEN)
    }
}

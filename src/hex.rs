use crate::error::{CheckError, CheckResult};

/// 16進数文字列をバイト列に変換する (大文字小文字は区別しない)
pub fn decode_hex(input: &str) -> CheckResult<Vec<u8>> {
    // 位置はバイトではなく文字単位で数える
    if let Some((position, c)) = input.chars().enumerate().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(CheckError::InvalidHexEncoding(format!(
            "{} 文字目に16進数以外の文字 '{}' があります",
            position + 1,
            c
        )));
    }

    // ここから先は ASCII のみ
    let digits = input.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(CheckError::InvalidHexEncoding(format!(
            "文字数が奇数です ({} 文字)",
            digits.len()
        )));
    }

    Ok(digits
        .chunks_exact(2)
        .map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1]))
        .collect())
}

fn nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

/// インターネットチェックサム (RFC 1071)
///
/// データを16ビットのビッグエンディアンのワード列として加算し、
/// 桁あふれを下位16ビットに折り返した後、1の補数を返す。
/// 奇数長の場合は末尾に0x00があるものとして計算する (呼び出し元のバッファは変更しない)。
pub fn internet_checksum(data: &[u8]) -> u16 {
    let mut sum: u64 = 0;

    let mut chunks = data.chunks_exact(2);
    for chunk in &mut chunks {
        sum += u16::from_be_bytes([chunk[0], chunk[1]]) as u64;
    }

    // 奇数長: 最後の1バイトを上位バイトとして扱う
    if let [last] = chunks.remainder() {
        sum += (*last as u64) << 8;
    }

    // 上位ビットがなくなるまで折り返す
    while (sum >> 16) != 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }

    !(sum as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 192.168.0.1 -> 192.168.0.199, TCP (チェックサム 0x9c5d)
    #[rustfmt::skip]
    const REFERENCE_HEADER: [u8; 20] = [
        0x45, 0x00, 0x00, 0x3c,
        0x1c, 0x46, 0x40, 0x00,
        0x40, 0x06, 0x9c, 0x5d,
        0xc0, 0xa8, 0x00, 0x01,
        0xc0, 0xa8, 0x00, 0xc7,
    ];

    #[test]
    fn valid_header_sums_to_zero() {
        assert_eq!(internet_checksum(&REFERENCE_HEADER), 0);
    }

    #[test]
    fn zeroed_checksum_field_yields_declared_value() {
        let mut header = REFERENCE_HEADER;
        header[10] = 0;
        header[11] = 0;
        assert_eq!(internet_checksum(&header), 0x9c5d);
    }

    #[test]
    fn odd_length_pads_trailing_byte() {
        // 0xff -> ワード 0xff00 -> 補数 0x00ff
        assert_eq!(internet_checksum(&[0xff]), 0x00ff);
        assert_eq!(internet_checksum(&[0x12, 0x34, 0x56]), !(0x1234u16 + 0x5600));
    }

    #[test]
    fn odd_length_does_not_touch_input() {
        let data = vec![0x01u8, 0x02, 0x03];
        let _ = internet_checksum(&data);
        assert_eq!(data, vec![0x01, 0x02, 0x03]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(internet_checksum(&[]), 0xffff);
    }

    #[test]
    fn carry_is_folded_repeatedly() {
        // 0xffff + 0xffff = 0x1fffe -> 0xffff -> 補数 0x0000
        assert_eq!(internet_checksum(&[0xff, 0xff, 0xff, 0xff]), 0x0000);
        // 0x8000 + 0x8000 = 0x10000 -> 0x0001 -> 補数 0xfffe
        assert_eq!(internet_checksum(&[0x80, 0x00, 0x80, 0x00]), 0xfffe);
    }

    #[test]
    fn large_input_folds_until_no_carry() {
        let data = vec![0xffu8; 1 << 20];
        assert_eq!(internet_checksum(&data), 0x0000);
    }

    #[test]
    fn inconsistent_checksum_field_is_not_zero() {
        // 0xb1e6 は 192.168.0.1 -> 192.168.0.199 のヘッダに対して正しくない
        let mut header = REFERENCE_HEADER;
        header[10] = 0xb1;
        header[11] = 0xe6;
        assert_eq!(internet_checksum(&header), 0xea76);
    }

    #[test]
    fn single_bit_flip_is_detected() {
        assert_eq!(internet_checksum(&REFERENCE_HEADER), 0);
        for bit in 0..REFERENCE_HEADER.len() * 8 {
            let mut header = REFERENCE_HEADER;
            header[bit / 8] ^= 1 << (bit % 8);
            assert_ne!(internet_checksum(&header), 0, "ビット {} の反転を検出できませんでした", bit);
        }
    }

    #[test]
    fn matches_pnet_reference() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x1071);
        for _ in 0..256 {
            let len = rng.gen_range(1..64);
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            // skipword に範囲外を指定すると全ワードが対象になる
            let expected = pnet::packet::util::checksum(&data, usize::MAX / 2);
            assert_eq!(internet_checksum(&data), expected, "data: {:02x?}", data);
        }
    }
}

pub mod checksum;
pub mod ipv4;

pub use checksum::internet_checksum;
pub use ipv4::{IpHeader, IPV4_MIN_HEADER_LEN};

use crate::error::InitProcessError;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "ip-checksum-checker")]
#[command(about = "IPv4 ヘッダのチェックサムを検証する")]
pub struct Cli {
    /// 検査するパケット (16進数文字列、複数指定可)
    pub packets: Vec<String>,

    /// 1行に1パケットを記述したファイル
    #[arg(short, long, conflicts_with = "packets")]
    pub file: Option<PathBuf>,
}

/// 検査対象のパケットをどこから読み込むか
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Arguments(Vec<String>),
    File(PathBuf),
    Prompt,
}

impl From<Cli> for InputSource {
    fn from(cli: Cli) -> Self {
        match (cli.file, cli.packets) {
            (Some(path), _) => InputSource::File(path),
            (None, packets) if packets.is_empty() => InputSource::Prompt,
            (None, packets) => InputSource::Arguments(packets),
        }
    }
}

impl InputSource {
    pub fn read_packets(self) -> Result<Vec<String>, InitProcessError> {
        match self {
            InputSource::Arguments(args) => Ok(args.iter().map(|a| a.trim().to_string()).collect()),
            InputSource::File(path) => read_packet_file(&path),
            InputSource::Prompt => prompt_packet().map(|packet| vec![packet]),
        }
    }
}

fn read_packet_file(path: &Path) -> Result<Vec<String>, InitProcessError> {
    let file = std::fs::File::open(path)
        .map_err(|e| InitProcessError::InputReadError(format!("{}: {}", path.display(), e)))?;
    parse_packet_lines(io::BufReader::new(file))
}

/// 1行に1パケット。空行と # で始まる行は読み飛ばす
pub fn parse_packet_lines<R: BufRead>(reader: R) -> Result<Vec<String>, InitProcessError> {
    let mut packets = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| InitProcessError::InputReadError(e.to_string()))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        packets.push(line.to_string());
    }
    Ok(packets)
}

fn prompt_packet() -> Result<String, InitProcessError> {
    print!("Enter IP packet (hex): ");
    io::stdout()
        .flush()
        .map_err(|e| InitProcessError::InputReadError(e.to_string()))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| InitProcessError::InputReadError(e.to_string()))?;

    Ok(input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(list: &[&str]) -> Result<InputSource, clap::Error> {
        let argv = std::iter::once("ip-checksum-checker").chain(list.iter().copied());
        Cli::try_parse_from(argv).map(InputSource::from)
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_prompts() {
        assert_eq!(parse(&[]).unwrap(), InputSource::Prompt);
    }

    #[test]
    fn positional_arguments_are_packets() {
        let source = parse(&["4500", " abcd "]).unwrap();
        assert_eq!(source.read_packets().unwrap(), args(&["4500", "abcd"]));
    }

    #[test]
    fn file_option_takes_a_path() {
        assert_eq!(
            parse(&["--file", "packets.txt"]).unwrap(),
            InputSource::File(PathBuf::from("packets.txt"))
        );
        assert_eq!(
            parse(&["-f", "packets.txt"]).unwrap(),
            InputSource::File(PathBuf::from("packets.txt"))
        );
        assert!(parse(&["-f"]).is_err());
    }

    #[test]
    fn file_option_conflicts_with_packets() {
        let err = parse(&["4500", "--file", "x"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn help_is_not_treated_as_packet() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(parse(&["--bogus"]).is_err());
    }

    #[test]
    fn missing_file_is_read_error() {
        let source = InputSource::File(PathBuf::from("/nonexistent/ip-checksum-checker/packets.txt"));
        assert!(matches!(source.read_packets(), Err(InitProcessError::InputReadError(_))));
    }

    #[test]
    fn packet_lines_skip_comments_and_blanks() {
        let text = "# reference\n4500003c1c46400040069c5dc0a80001c0a800c7\n\n  DEADBEEF  \n";
        let packets = parse_packet_lines(text.as_bytes()).unwrap();
        assert_eq!(
            packets,
            args(&["4500003c1c46400040069c5dc0a80001c0a800c7", "DEADBEEF"])
        );
    }
}

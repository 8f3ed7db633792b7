use clap::Parser;
use ip_checksum_checker::config::AppConfig;
use ip_checksum_checker::input::{Cli, InputSource};
use ip_checksum_checker::report::check_all;
use ip_checksum_checker::setup_logger::setup_logger;
use ip_checksum_checker::InitProcessError;
use log::info;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}

/// 全パケットのレポートを出力できた場合に true を返す
fn run(cli: Cli) -> Result<bool, InitProcessError> {
    let config = AppConfig::from_env()?;
    setup_logger(&config.log)?;

    let packets = InputSource::from(cli).read_packets()?;
    info!("{} 件のパケットを検査します", packets.len());

    check_all(
        &packets,
        config.output,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}

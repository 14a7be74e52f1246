use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use spdlog::{info, warn};

use adveritatem::logger::configure_logger;
use adveritatem::server::server_run;

use crate::config::{default_config_path, open_config};
use crate::config_data::write_sample_cfg;

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "adveritatem.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Writes a sample configuration (to the config path or the user config dir) and exits
    #[arg(long)]
    init: bool,
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    if args.init {
        let path = match config_path {
            Some(path) => path,
            None => default_config_path().map_err(anyhow::Error::msg)?,
        };
        write_sample_cfg(&path)?;
        println!("Sample configuration written to {}", path.display());
        return Ok(());
    }

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run adveritatem --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting Ad Veritatem =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
    info!("Listening on {}:{}", config.server.address, config.server.port);

    server_run(config).await?;
    Ok(())
}

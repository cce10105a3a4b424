use std::path::PathBuf;

use clap::Parser;
use docdiff_config_file::DocdiffConfigToml;

/// Gateway for comparing a standard contract against a customer contract
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file; built-in defaults are used without one
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,
}

impl Args {
    pub fn apply(&self, config: &mut DocdiffConfigToml) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

use clap::Parser;
use docdiff_config_file::DocdiffConfigToml;
use docdiff_server::{api::run_server, args::Args, config::server_config_from_toml};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => DocdiffConfigToml::load(path)?,
        None => DocdiffConfigToml::default(),
    };
    args.apply(&mut config);

    let server_config = server_config_from_toml(&config).await?;
    run_server(server_config).await?;
    Ok(())
}

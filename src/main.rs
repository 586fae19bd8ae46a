use clap::Parser;
use medchat::GatewayKind;
use medchat::core::config;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "medchat", about = "Medical assistant chat in your terminal")]
struct Args {
    /// Gateway that answers messages
    #[arg(short, long, value_enum)]
    gateway: Option<GatewayKind>,

    /// Base URL of the remote backend (http gateway only)
    #[arg(long)]
    base_url: Option<String>,

    /// Start in dark mode
    #[arg(long)]
    dark: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("medchat.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Ignoring unusable config file: {}", e);
            config::MedchatConfig::default()
        }
    };

    let mut resolved = config::resolve(&file_config, args.gateway, args.base_url.as_deref());
    if args.dark {
        resolved.dark_mode = true;
    }

    log::info!(
        "medchat starting up with {:?} gateway ({})",
        resolved.gateway,
        resolved.base_url
    );

    medchat::tui::run(resolved)
}

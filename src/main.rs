use clap::Parser;

use attendance_tracker::cli::Cli;
use attendance_tracker::config::{get_config, init_config};
use attendance_tracker::runtime::modes;
use attendance_tracker::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());

    let config = get_config();
    let _guard = init_logging(&config.logging);

    match cli.command {
        None => modes::run_server().await,
        Some(cmd) => {
            if let Err(e) = modes::run_cli(cmd).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

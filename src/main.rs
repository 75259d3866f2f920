use beverage_api::cli::{self, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_and_merge_config(&cli)?;

    // Dry runs report on stdout and leave the subscriber uninstalled
    if !cli.is_dry_run() {
        cli::init_logger_from_settings(&settings)?;
    }

    cli::execute_command(&cli, settings).await
}

mod cli;
mod run;
mod telemetry;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let args = match cli.command {
        Some(Commands::Run(args)) => args,
        None => cli.run,
    };

    telemetry::init_telemetry(args.verbose);
    run::execute(args).await
}

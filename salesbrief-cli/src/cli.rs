use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "salesbrief")]
#[command(about = "Salesforce sales performance report pipeline", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the report pipeline (default when no command is given)
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Working directory for charts and stage documents
    #[arg(long, default_value = ".")]
    pub workdir: PathBuf,

    /// Extra request text passed to the analyst stage
    #[arg(long, default_value = "")]
    pub request: String,

    /// Use the scripted offline model instead of the OpenAI API
    #[arg(long)]
    pub offline: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

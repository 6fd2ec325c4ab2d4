use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "callmate")]
#[command(author, version, about = "Real-time call assistant backend")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP backend
    Serve(ServeArgs),

    /// Replay a scripted call against a running backend
    Simulate {
        /// Backend base URL
        #[arg(short, long, default_value = "http://127.0.0.1:8000")]
        target: String,

        /// Conversation id to use for the scripted call
        #[arg(short, long, default_value = "demo-call")]
        call_id: String,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "callmate.yaml")]
    pub config: PathBuf,

    /// Listen address (overrides the config file)
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Listen port (overrides the config file)
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Directory for feedback and consent logs (overrides the config file)
    #[arg(long, env = "CALLMATE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

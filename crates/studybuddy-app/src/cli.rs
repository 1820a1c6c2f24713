use std::path::PathBuf;

use clap::Parser;

/// Study Buddy: a terminal chat with an AI study assistant.
#[derive(Parser, Debug)]
#[command(name = "studybuddy", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Model name override, e.g. gemini-1.5-pro.
    #[arg(short = 'm', long)]
    pub model: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

use anyhow::Result;
use clap::Parser;

use feeguard::app::{self, AppCfg};

#[derive(Parser, Debug)]
#[command(version, about = "Manipulation-aware fee engine for protected AMM pools")]
struct Args {
    /// Path to the scenario config file
    #[arg(long, default_value = "Scenario.toml")]
    config: String,

    /// Emit one JSON line per decision
    #[arg(long)]
    json_lines: bool,

    /// Log filter (tracing env-filter syntax)
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(args.log.as_str())
        .init();

    app::run(AppCfg {
        config_path: args.config,
        json_lines: args.json_lines,
    })
}

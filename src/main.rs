use anyhow::Result;
use clap::Parser;
use repodoctor::cli::{Cli, Commands};
use repodoctor::commands::{self, AnalyzeConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            config,
            no_history,
            fail_on_critical,
            verbosity: _,
        } => commands::handle_analyze(AnalyzeConfig {
            path,
            format,
            output,
            config_file: config,
            no_history,
            fail_on_critical,
        }),
        Commands::Init { path, force } => commands::init_config(&path, force),
    }
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level one step from warn
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod input;
mod output;

pub use args::*;
use commands::Command;

const LOG_ENV: &str = "ARAZZO_LOG";

#[derive(Debug, Parser)]
#[command(name = "arazzo", version, about = "Arazzo workflow document validator")]
struct Cli {
    /// Log at debug level (overrides ARAZZO_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Validate {
            path,
            input,
            output,
        } => cmd::validate::validate_cmd(&path, input, output).await,
        Command::Resolve {
            path,
            input,
            output,
        } => cmd::resolve::resolve_cmd(&path, input, output).await,
        Command::Workflows {
            path,
            input,
            output,
        } => cmd::workflows::workflows_cmd(&path, input, output).await,
        Command::Inspect {
            path,
            workflow,
            input,
            output,
        } => cmd::inspect::inspect_cmd(&path, workflow.as_deref(), input, output).await,
    }
}

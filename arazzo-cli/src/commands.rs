use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode, resolve and validate a document.
    Validate {
        path: PathBuf,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Resolve component references and list what each one binds to.
    Resolve {
        path: PathBuf,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List workflows in dependency order.
    Workflows {
        path: PathBuf,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show the steps, inputs and outputs of one workflow.
    Inspect {
        path: PathBuf,
        #[arg(long)]
        workflow: Option<String>,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

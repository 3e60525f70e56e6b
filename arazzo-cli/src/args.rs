use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Document format tag (json, yaml, yml or auto). Defaults to the file extension.
    #[arg(long = "input-format", value_name = "TAG")]
    pub input_format: Option<String>,
}

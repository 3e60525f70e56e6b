use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
    /// Graphviz; only `workflows` renders a graph, other commands fall back to JSON.
    Dot,
}

pub fn print_result<T: Serialize>(format: OutputFormat, quiet: bool, result: &T) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string(result) {
                println!("{json}");
            }
        }
        OutputFormat::Yaml => {
            if let Ok(yaml) = serde_yaml::to_string(result) {
                print!("{yaml}");
            }
        }
        OutputFormat::Text | OutputFormat::Dot => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{json}");
            }
        }
    }
}

pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    tracing::debug!(%message, "command failed");
    if quiet {
        return;
    }
    match format {
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
        OutputFormat::Text | OutputFormat::Yaml | OutputFormat::Dot => eprintln!("error: {message}"),
    }
}

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the solution file whose test projects will be mutation-tested.
    #[arg(value_name = "SOLUTION")]
    pub solution: PathBuf,

    /// Regenerate every report regardless of staleness.
    #[arg(long)]
    pub force: bool,

    /// External dotnet command (overrides config `dotnet`).
    #[arg(long)]
    pub dotnet: Option<String>,

    /// Logging level (overrides config). One of: trace, debug, info, warn, error
    #[arg(long = "log.level")]
    pub log_level: Option<String>,

    /// Logging color control: "on" to force colors, "off" to disable; omit for auto
    #[arg(long = "log.color")]
    pub log_color: Option<String>,

    /// Arguments passed through verbatim to the mutation-test command.
    #[arg(
        value_name = "STRYKER_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub passthrough: Vec<String>,
}

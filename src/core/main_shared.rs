use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::{CommandFactory, Parser};
use log::warn;

use crate::core::cli::Args;
use crate::core::cmds;
use crate::core::dotnet::DotnetTool;
use crate::core::logging::init_logging;
use crate::types::AppResult;
use crate::types::config::{CliOverrides, init_with_overrides};

pub fn run_main() -> AppResult<()> {
    // A bare invocation prints usage and exits cleanly
    if env::args().len() <= 1 {
        Args::command().print_help()?;
        return Ok(());
    }

    let args = Args::parse();

    // Build CLI overrides for config precedence
    let cli_overrides = CliOverrides {
        dotnet: args.dotnet.clone(),
        log_level: args.log_level.clone(),
        log_color: args.log_color.clone(),
    };

    // Initialize configuration (file first, then CLI overrides)
    init_with_overrides(&cli_overrides);

    // Initialize logging after config so level/color are applied
    init_logging();

    let tool = DotnetTool::from_config();

    // Setup running flag to handle signals from ctrl-c
    let running = Arc::new(AtomicBool::new(true));
    let running_ctrlc = Arc::clone(&running);

    ctrlc::set_handler(move || {
        warn!("Received Ctrl-C, cleaning up..");
        running_ctrlc.store(false, Ordering::SeqCst);
    })
    .expect("Error creating a Ctrl-C handler");

    let summary = cmds::execute_run(&args, &tool, &running)?;

    let exit_code = if !running.load(Ordering::SeqCst) {
        // Run was interrupted between pairs
        2
    } else if summary.any_failed() {
        // At least one pair's report could not be refreshed
        1
    } else {
        0
    };

    // Exit with appropriate code
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

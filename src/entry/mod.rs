mod plan;

use std::ffi::OsString;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::ProfilerArgs;
use crate::config::default_config_path;
use crate::error::{AppError, AppResult, ValidationError};
use plan::{build_plan, execute_plan};

/// Parses the command line, then performs the configured runs on a
/// single-threaded runtime.
///
/// # Errors
///
/// Returns the first configuration, transport, store or export failure.
pub fn run() -> AppResult<()> {
    let (args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(ValidationError::RuntimeBuildFailed { source: err }))?;

    runtime.block_on(run_async(args, &matches))
}

fn parse_args() -> AppResult<Option<(ProfilerArgs, ArgMatches)>> {
    let mut cmd = ProfilerArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = ProfilerArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    default_config_path().is_none() && std::env::var_os("APIPROF_HOST").is_none()
}

async fn run_async(args: ProfilerArgs, matches: &ArgMatches) -> AppResult<()> {
    let plan = build_plan(args, matches)?;
    execute_plan(plan).await
}

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveUsize, ProfilerArgs, parse_endpoint, parse_root_segment};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, ExportConfig};

/// Set on the command line or through the option's environment variable.
fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

/// Applies configuration values to CLI arguments.
///
/// Values given on the command line or through environment variables win
/// over the file.
///
/// # Errors
///
/// Returns an error when config values are invalid or conflict with each other.
pub fn apply_config(
    args: &mut ProfilerArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    apply_connection(args, matches, config)?;
    apply_measurement(args, matches, config)?;

    if !is_explicit(matches, "output")
        && let Some(output) = config.output.clone()
    {
        args.output = output;
    }

    if let Some(export) = config.export.as_ref() {
        apply_export(args, matches, export)?;
    }
    Ok(())
}

fn apply_connection(
    args: &mut ProfilerArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if config.password.is_some() && config.password_env.is_some() {
        return Err(AppError::config(ConfigError::Conflict {
            left: "password",
            right: "password_env",
        }));
    }

    if !is_explicit(matches, "host")
        && let Some(host) = config.host.clone()
    {
        args.host = Some(host);
    }

    if !is_explicit(matches, "username")
        && let Some(username) = config.username.clone()
    {
        args.username = Some(username);
    }

    if !is_explicit(matches, "password") {
        if let Some(password) = config.password.clone() {
            args.password = Some(password);
        } else if let Some(name) = config.password_env.as_ref() {
            let password = std::env::var(name).map_err(|_err| {
                AppError::config(ConfigError::PasswordEnvMissing { name: name.clone() })
            })?;
            args.password = Some(password);
        }
    }

    if !is_explicit(matches, "scheme")
        && let Some(scheme) = config.scheme
    {
        args.scheme = scheme;
    }

    if !is_explicit(matches, "root_segment")
        && let Some(root) = config.root_segment.as_deref()
    {
        args.root_segment = parse_root_segment(root).map_err(AppError::validation)?;
    }

    if !is_explicit(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = timeout.to_duration("timeout")?;
    }

    if !is_explicit(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = timeout.to_duration("connect_timeout")?;
    }

    if !is_explicit(matches, "insecure")
        && let Some(insecure) = config.insecure
    {
        args.insecure = insecure;
    }
    Ok(())
}

fn apply_measurement(
    args: &mut ProfilerArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "endpoints")
        && let Some(endpoints) = config.endpoints.as_ref()
    {
        let mut parsed = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            parsed.push(
                parse_endpoint(endpoint)
                    .map_err(|err| AppError::config(ConfigError::InvalidEndpoint { source: err }))?,
            );
        }
        args.endpoints = parsed;
    }

    if !is_explicit(matches, "iterations")
        && let Some(iterations) = config.iterations
    {
        args.iterations = iterations;
    }

    if !is_explicit(matches, "warmup_calls")
        && let Some(warmup_calls) = config.warmup_calls
    {
        args.warmup_calls = warmup_calls;
    }

    if !is_explicit(matches, "reduction")
        && let Some(reduction) = config.reduction
    {
        args.reduction = reduction;
    }

    if !is_explicit(matches, "pinned_version")
        && let Some(version) = config.version.clone()
    {
        args.pinned_version = Some(version);
    }

    if !is_explicit(matches, "runs")
        && let Some(runs) = config.runs
    {
        args.runs = ensure_positive_usize(runs, "runs")?;
    }
    Ok(())
}

fn apply_export(
    args: &mut ProfilerArgs,
    matches: &ArgMatches,
    export: &ExportConfig,
) -> AppResult<()> {
    if !is_explicit(matches, "export_csv")
        && let Some(dir) = export.csv_dir.clone()
    {
        args.export_csv = Some(dir);
    }

    if !is_explicit(matches, "include_header")
        && let Some(include_header) = export.include_header
    {
        args.include_header = include_header;
    }

    if !is_explicit(matches, "export_retries")
        && let Some(retries) = export.retries
    {
        args.export_retries = retries;
    }

    if !is_explicit(matches, "export_retry_delay")
        && let Some(delay) = export.retry_delay.as_ref()
    {
        args.export_retry_delay = delay.to_duration("export.retry_delay")?;
    }
    Ok(())
}
